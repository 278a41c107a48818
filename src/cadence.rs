//! Fixed-period cycle pacing.
//!
//! The driver loop runs one cycle to completion and then sleeps for
//! whatever is left of the period.  A cycle that runs long (typically a
//! blocking telemetry send) is not made up: the next cycle starts
//! immediately and the overrun is counted.

use std::time::Duration;

use log::warn;

#[derive(Debug, Clone)]
pub struct Cadence {
    period: Duration,
    overruns: u64,
}

impl Cadence {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            overruns: 0,
        }
    }

    pub fn from_millis(ms: u32) -> Self {
        Self::new(Duration::from_millis(u64::from(ms)))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left to sleep after a cycle that took `elapsed`.
    pub fn remaining(&mut self, elapsed: Duration) -> Duration {
        match self.period.checked_sub(elapsed) {
            Some(rest) => rest,
            None => {
                self.overruns += 1;
                warn!(
                    "cycle overran its {}ms period by {}ms",
                    self.period.as_millis(),
                    (elapsed - self.period).as_millis()
                );
                Duration::ZERO
            }
        }
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}
