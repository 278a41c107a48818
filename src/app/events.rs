//! Outbound telemetry events.
//!
//! The [`StateEngine`](crate::engine::StateEngine) produces one
//! [`TelemetryEvent`] per reportable change.  They flow through the
//! [`EventSink`](super::ports::EventSink) port; the production sink is
//! [`TelemetrySink`](crate::telemetry::sink::TelemetrySink).

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status-record codes understood by the remote telemetry service.
///
/// The discriminants are wire values and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum EventCode {
    Brake = 1,
    Odometer = 5,
    LeftSignal = 41,
    RightSignal = 42,
    Hazard = 2090,
    HighBeam = 2091,
    Ignition = 10000,
}

impl EventCode {
    /// Integer identifier sent on the wire.
    pub const fn wire(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Brake => "BRAKE",
            Self::Odometer => "ODOMETER",
            Self::LeftSignal => "LEFT_SIGNAL",
            Self::RightSignal => "RIGHT_SIGNAL",
            Self::Hazard => "HAZARD",
            Self::HighBeam => "HIGH_BEAM",
            Self::Ignition => "IGNITION",
        };
        write!(f, "{}({})", name, self.wire())
    }
}

/// One reportable change.  Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub code: EventCode,
    /// `0`/`1` for flags, the odometer reading for [`EventCode::Odometer`].
    pub value: i64,
    /// Captured when the engine emitted the event, not when it is sent.
    pub timestamp: DateTime<Utc>,
}

impl TelemetryEvent {
    pub fn flag(code: EventCode, on: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            code,
            value: i64::from(on),
            timestamp,
        }
    }
}
