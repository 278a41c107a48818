//! Telemetry session bootstrap.
//!
//! Two-step login performed once at startup:
//!
//! 1. Administrative identity service → `AdminIdentity { user_id, session_id }`
//! 2. Telemetry service → access token + refresh token with expiries
//!
//! The resulting [`AuthSession`] is read-only for the rest of the run.
//! Renewal before expiry is the telemetry client's business.

use core::fmt;

use chrono::{DateTime, Utc};
use log::{error, info};

use crate::app::ports::{AdminIdentity, ClientError, TelemetryClient, TelemetryCredentials};

// ── Errors ───────────────────────────────────────────────────

/// Which bootstrap step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    Admin(ClientError),
    Telemetry(ClientError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin(e) => write!(f, "admin authentication failed: {e}"),
            Self::Telemetry(e) => write!(f, "telemetry authentication failed: {e}"),
        }
    }
}

impl std::error::Error for AuthError {}

// ── Session ──────────────────────────────────────────────────

/// Established telemetry credentials.
#[derive(Clone)]
pub struct AuthSession {
    admin: AdminIdentity,
    credentials: TelemetryCredentials,
}

impl AuthSession {
    /// Run both login steps against `client`.
    pub fn establish(client: &mut impl TelemetryClient) -> Result<Self, AuthError> {
        let admin = client.authenticate_admin().map_err(AuthError::Admin)?;
        let credentials = client
            .authenticate_telemetry()
            .map_err(AuthError::Telemetry)?;
        Ok(Self { admin, credentials })
    }

    pub fn access_token(&self) -> &str {
        &self.credentials.token
    }

    pub fn access_expiry(&self) -> DateTime<Utc> {
        self.credentials.token_expiry
    }

    pub fn refresh_token(&self) -> &str {
        &self.credentials.refresh_token
    }

    pub fn refresh_expiry(&self) -> DateTime<Utc> {
        self.credentials.refresh_expiry
    }

    pub fn admin(&self) -> &AdminIdentity {
        &self.admin
    }

    /// Whether the access token is still inside its validity window.
    pub fn access_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.credentials.token_expiry
    }

    pub fn refresh_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.credentials.refresh_expiry
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("admin", &self.admin)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Establish a session, or log why not and continue without one.
///
/// A `None` result puts the caller in degraded (non-reporting) mode; it
/// is never fatal.
pub fn bootstrap(client: &mut impl TelemetryClient) -> Option<AuthSession> {
    match AuthSession::establish(client) {
        Ok(session) => {
            info!(
                "auth: session established for user {} (token valid until {})",
                session.admin.user_id,
                session.access_expiry()
            );
            Some(session)
        }
        Err(e) => {
            error!("auth: {e}; telemetry reporting disabled");
            None
        }
    }
}

// ── Tests ────────────────────────────────────────────────────
