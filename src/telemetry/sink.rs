//! Best-effort telemetry delivery.
//!
//! [`TelemetrySink`] sends each [`TelemetryEvent`] exactly once through a
//! [`TelemetryClient`].  A failed send is logged and the event dropped:
//! no retry, no queue.  Delivery outcome never feeds back into the
//! state engine.
//!
//! The send call may block on the network.  Because the driver loop is
//! single-threaded, a slow send stalls that cycle's sampling cadence;
//! there is no timeout here.

use chrono::Utc;
use log::{debug, info, warn};

use crate::app::events::TelemetryEvent;
use crate::app::ports::{EventSink, TelemetryClient};

use super::auth::{self, AuthSession};

/// What happened to one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The service acknowledged the record.
    Delivered,
    /// The send was attempted and failed; the event is gone.
    Failed,
    /// Reporting is switched off or no session exists.
    Skipped,
}

/// Running delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl DeliveryStats {
    fn record(&mut self, outcome: Delivery) {
        match outcome {
            Delivery::Delivered => self.delivered += 1,
            Delivery::Failed => self.failed += 1,
            Delivery::Skipped => self.skipped += 1,
        }
    }
}

/// Delivers events to the remote telemetry service.
pub struct TelemetrySink<C: TelemetryClient> {
    client: C,
    session: Option<AuthSession>,
    serial_number: String,
    enabled: bool,
    expiry_warned: bool,
    stats: DeliveryStats,
}

impl<C: TelemetryClient> TelemetrySink<C> {
    /// Bootstrap a session (when `enabled`) and build the sink.
    ///
    /// Authentication failure is logged inside and yields a degraded sink.
    pub fn connect(mut client: C, serial_number: impl Into<String>, enabled: bool) -> Self {
        let session = if enabled {
            auth::bootstrap(&mut client)
        } else {
            info!("telemetry: reporting disabled by configuration");
            None
        };
        Self::with_session(client, session, serial_number, enabled)
    }

    /// Build a sink around an already-established (or absent) session.
    pub fn with_session(
        client: C,
        session: Option<AuthSession>,
        serial_number: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            client,
            session,
            serial_number: serial_number.into(),
            enabled,
            expiry_warned: false,
            stats: DeliveryStats::default(),
        }
    }

    /// Attempt delivery of one event.
    pub fn dispatch(&mut self, event: &TelemetryEvent) -> Delivery {
        info!("sending {} for {}", event.value, event.code);

        let outcome = self.try_send(event);
        self.stats.record(outcome);
        outcome
    }

    fn try_send(&mut self, event: &TelemetryEvent) -> Delivery {
        if !self.enabled {
            return Delivery::Skipped;
        }
        let Some(session) = &self.session else {
            debug!("telemetry: no session, {} not sent", event.code);
            return Delivery::Skipped;
        };

        if !self.expiry_warned && !session.access_valid_at(Utc::now()) {
            warn!(
                "telemetry: access token expired at {}, sends will likely fail",
                session.access_expiry()
            );
            self.expiry_warned = true;
        }

        match self.client.send_status(
            session.access_token(),
            &self.serial_number,
            event.code,
            event.value,
            event.timestamp,
        ) {
            Ok(()) => Delivery::Delivered,
            Err(e) => {
                warn!("telemetry: status record {} dropped: {}", event.code, e);
                Delivery::Failed
            }
        }
    }

    /// True when events can actually reach the service.
    pub fn is_reporting(&self) -> bool {
        self.enabled && self.session.is_some()
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn stats(&self) -> DeliveryStats {
        self.stats
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }
}

impl<C: TelemetryClient> EventSink for TelemetrySink<C> {
    fn emit(&mut self, event: &TelemetryEvent) {
        let _ = self.dispatch(event);
    }
}
