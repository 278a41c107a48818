//! Mock adapters for integration tests.
//!
//! `MockPanel` records every lamp write so tests can assert on the full
//! output history.  `ScriptedClient` plays the remote services with
//! configurable outcomes.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use vehiclemon::app::events::{EventCode, TelemetryEvent};
use vehiclemon::app::ports::{
    ActuatorPort, AdminIdentity, ClientError, Clock, EventSink, SensorPort, TelemetryClient,
    TelemetryCredentials,
};
use vehiclemon::engine::RawSamples;
use vehiclemon::pins;

// ── MockPanel ─────────────────────────────────────────────────

pub struct MockPanel {
    pub inputs: RawSamples,
    pub writes: Vec<(u8, bool)>,
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new() -> Self {
        Self {
            inputs: RawSamples::neutral(),
            writes: Vec::new(),
        }
    }

    /// Last level written to `pin`, `false` if never written.
    pub fn lamp(&self, pin: u8) -> bool {
        self.writes
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .is_some_and(|(_, level)| *level)
    }

    pub fn writes_to(&self, pin: u8) -> Vec<bool> {
        self.writes
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, l)| *l)
            .collect()
    }
}

impl SensorPort for MockPanel {
    fn read_digital(&mut self, pin: u8) -> bool {
        match pin {
            pins::IGNITION_PIN => self.inputs.ignition,
            pins::BRAKE_PEDAL_PIN => self.inputs.brake_pedal,
            pins::HIGH_BEAM_BUTTON_PIN => self.inputs.high_beam_button,
            pins::HAZARD_BUTTON_PIN => self.inputs.hazard_button,
            _ => false,
        }
    }

    fn read_analog(&mut self, pin: u8) -> u16 {
        match pin {
            pins::JOYSTICK_X_PIN => self.inputs.joystick_x,
            pins::TURN_POT_PIN => self.inputs.turn_pot,
            _ => 512,
        }
    }
}

impl ActuatorPort for MockPanel {
    fn write_digital(&mut self, pin: u8, level: bool) {
        self.writes.push((pin, level));
    }
}

// ── Clock ─────────────────────────────────────────────────────

pub struct EpochClock;

impl Clock for EpochClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }
}

// ── Recording sink ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<TelemetryEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn values(&self, code: EventCode) -> Vec<i64> {
        self.events
            .iter()
            .filter(|e| e.code == code)
            .map(|e| e.value)
            .collect()
    }

    pub fn codes(&self) -> Vec<EventCode> {
        self.events.iter().map(|e| e.code).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &TelemetryEvent) {
        self.events.push(event.clone());
    }
}

// ── ScriptedClient ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRecord {
    pub token: String,
    pub serial: String,
    pub code: u16,
    pub value: i64,
}

pub struct ScriptedClient {
    pub admin_ok: bool,
    pub telemetry_ok: bool,
    /// Per-send verdicts; once drained every send uses `default_send_ok`.
    pub send_script: VecDeque<bool>,
    pub default_send_ok: bool,
    pub token_lifetime: Duration,
    pub sent: Vec<SentRecord>,
    pub auth_calls: u32,
}

#[allow(dead_code)]
impl ScriptedClient {
    pub fn healthy() -> Self {
        Self {
            admin_ok: true,
            telemetry_ok: true,
            send_script: VecDeque::new(),
            default_send_ok: true,
            token_lifetime: Duration::hours(1),
            sent: Vec::new(),
            auth_calls: 0,
        }
    }

    pub fn rejecting_sends() -> Self {
        Self {
            default_send_ok: false,
            ..Self::healthy()
        }
    }

    pub fn admin_down() -> Self {
        Self {
            admin_ok: false,
            ..Self::healthy()
        }
    }

    pub fn codes(&self) -> Vec<u16> {
        self.sent.iter().map(|r| r.code).collect()
    }
}

impl TelemetryClient for ScriptedClient {
    fn authenticate_admin(&mut self) -> Result<AdminIdentity, ClientError> {
        self.auth_calls += 1;
        if self.admin_ok {
            Ok(AdminIdentity {
                user_id: "bench".into(),
                session_id: "sess-1".into(),
            })
        } else {
            Err(ClientError::Transport("connection refused".into()))
        }
    }

    fn authenticate_telemetry(&mut self) -> Result<TelemetryCredentials, ClientError> {
        self.auth_calls += 1;
        if !self.telemetry_ok {
            return Err(ClientError::Rejected);
        }
        let now = Utc::now();
        Ok(TelemetryCredentials {
            token: "tok-123".into(),
            token_expiry: now + self.token_lifetime,
            refresh_token: "ref-456".into(),
            refresh_expiry: now + Duration::days(7),
        })
    }

    fn send_status(
        &mut self,
        token: &str,
        serial_number: &str,
        code: EventCode,
        value: i64,
        _timestamp: DateTime<Utc>,
    ) -> Result<(), ClientError> {
        self.sent.push(SentRecord {
            token: token.into(),
            serial: serial_number.into(),
            code: code.wire(),
            value,
        });
        let ok = self.send_script.pop_front().unwrap_or(self.default_send_ok);
        if ok {
            Ok(())
        } else {
            Err(ClientError::Transport("timeout".into()))
        }
    }
}
