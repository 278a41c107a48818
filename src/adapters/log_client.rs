//! Log-only telemetry client.
//!
//! Stands in for the remote identity and telemetry services during dry
//! runs and on the bench: logins always succeed with locally minted
//! tokens and every status record goes to the log instead of the wire.
//! A real network client would implement the same trait.

use chrono::{DateTime, Duration, Utc};
use log::info;

use crate::app::events::EventCode;
use crate::app::ports::{AdminIdentity, ClientError, TelemetryClient, TelemetryCredentials};

const ACCESS_LIFETIME_MINS: i64 = 60;
const REFRESH_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Default)]
pub struct LogTelemetryClient {
    sent: u64,
}

impl LogTelemetryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status records accepted so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl TelemetryClient for LogTelemetryClient {
    fn authenticate_admin(&mut self) -> Result<AdminIdentity, ClientError> {
        Ok(AdminIdentity {
            user_id: "local".into(),
            session_id: format!("local-{}", std::process::id()),
        })
    }

    fn authenticate_telemetry(&mut self) -> Result<TelemetryCredentials, ClientError> {
        let now = Utc::now();
        Ok(TelemetryCredentials {
            token: format!("local-access-{}", now.timestamp()),
            token_expiry: now + Duration::minutes(ACCESS_LIFETIME_MINS),
            refresh_token: format!("local-refresh-{}", now.timestamp()),
            refresh_expiry: now + Duration::days(REFRESH_LIFETIME_DAYS),
        })
    }

    fn send_status(
        &mut self,
        _token: &str,
        serial_number: &str,
        code: EventCode,
        value: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), ClientError> {
        self.sent += 1;
        info!(
            "STATUS | serial={} | code={} | value={} | at={}",
            serial_number,
            code.wire(),
            value,
            timestamp.to_rfc3339()
        );
        Ok(())
    }
}
