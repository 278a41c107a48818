//! Remote telemetry: session bootstrap and best-effort delivery.
//!
//! ```text
//!   startup:   TelemetryClient ──▶ auth::bootstrap ──▶ Option<AuthSession>
//!   per event: TelemetryEvent ──▶ TelemetrySink ──▶ TelemetryClient::send_status
//! ```

pub mod auth;
pub mod sink;
