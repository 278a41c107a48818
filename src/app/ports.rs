//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ VehicleService (domain)
//! ```
//!
//! Driven adapters (panel I/O, telemetry transport, clock, config file)
//! implement these traits.  The [`VehicleService`](super::service::VehicleService)
//! consumes them via generics, so the state engine never touches
//! hardware or the network directly.

use core::fmt;

use chrono::{DateTime, Utc};

use crate::config::SystemConfig;

use super::events::{EventCode, TelemetryEvent};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: raw pin-level sampling.
///
/// Reads always yield a value; adapters deal with their own bus errors.
pub trait SensorPort {
    /// Level of a digital input.
    fn read_digital(&mut self, pin: u8) -> bool;

    /// Analog sample in `[0, ANALOG_MAX)`.
    fn read_analog(&mut self, pin: u8) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: indicator lamp outputs.
pub trait ActuatorPort {
    fn write_digital(&mut self, pin: u8, level: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → telemetry)
// ───────────────────────────────────────────────────────────────

/// The service forwards every engine event through this port.
pub trait EventSink {
    fn emit(&mut self, event: &TelemetryEvent);
}

// ───────────────────────────────────────────────────────────────
// Telemetry client port (driven adapter: domain → remote service)
// ───────────────────────────────────────────────────────────────

/// Identity returned by the administrative login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub user_id: String,
    pub session_id: String,
}

/// Credentials issued by the telemetry service.
#[derive(Clone, PartialEq, Eq)]
pub struct TelemetryCredentials {
    pub token: String,
    pub token_expiry: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_expiry: DateTime<Utc>,
}

/// Request/response client for the remote identity and telemetry services.
///
/// Framing, transport and transport-level retries are the implementor's
/// concern.  Calls may block.
pub trait TelemetryClient {
    /// Log in to the administrative identity service.
    fn authenticate_admin(&mut self) -> Result<AdminIdentity, ClientError>;

    /// Obtain telemetry credentials.  Called only after a successful
    /// [`authenticate_admin`](Self::authenticate_admin).
    fn authenticate_telemetry(&mut self) -> Result<TelemetryCredentials, ClientError>;

    /// Submit one generic status record.
    fn send_status(
        &mut self,
        token: &str,
        serial_number: &str,
        code: EventCode,
        value: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), ClientError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for event timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ← persisted config)
// ───────────────────────────────────────────────────────────────

/// Loads the system configuration once at startup.
///
/// Implementations MUST run [`SystemConfig::validate`] before returning.
pub trait ConfigPort {
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found (first boot, wrong path).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`TelemetryClient`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The service answered but did not acknowledge success.
    Rejected,
    /// The request never got a well-formed answer.
    Transport(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "request not acknowledged"),
            Self::Transport(msg) => write!(f, "transport: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for ClientError {}

// Tokens stay out of logs.
impl fmt::Debug for TelemetryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryCredentials")
            .field("token", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .field("refresh_token", &"<redacted>")
            .field("refresh_expiry", &self.refresh_expiry)
            .finish()
    }
}
