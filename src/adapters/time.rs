//! System clock adapter.
//!
//! Provides wall-clock timestamps for outbound events.  Cadence timing
//! in the driver loop uses `std::time::Instant` separately, so a wall
//! clock step never disturbs the sampling period.

use chrono::{DateTime, Utc};

use crate::app::ports::Clock;

/// [`Clock`] backed by the host's UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// [`Clock`] pinned to one instant.  Useful for replays and tests that
/// compare timestamps.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
