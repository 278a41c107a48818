//! Integration tests for session bootstrap and best-effort delivery,
//! driven through the full service pipeline.

use chrono::Duration;

use super::mock_hw::{EpochClock, MockPanel, ScriptedClient};

use vehiclemon::app::service::VehicleService;
use vehiclemon::config::SystemConfig;
use vehiclemon::pins;
use vehiclemon::telemetry::sink::TelemetrySink;

const SERIAL: &str = "SN-0009";

/// Ignition on, a hazard press and release, then a left signal.
fn drive_script(
    svc: &mut VehicleService,
    panel: &mut MockPanel,
    sink: &mut TelemetrySink<ScriptedClient>,
) {
    panel.inputs.ignition = true;
    svc.tick(panel, &EpochClock, sink);
    panel.inputs.hazard_button = true;
    svc.tick(panel, &EpochClock, sink);
    panel.inputs.hazard_button = false;
    svc.tick(panel, &EpochClock, sink);
    panel.inputs.turn_pot = 10;
    panel.inputs.joystick_x = 900;
    for _ in 0..30 {
        svc.tick(panel, &EpochClock, sink);
    }
}

#[test]
fn events_reach_the_service_with_token_and_serial() {
    let mut sink = TelemetrySink::connect(ScriptedClient::healthy(), SERIAL, true);
    let mut svc = VehicleService::new(&SystemConfig::default());
    let mut panel = MockPanel::new();

    panel.inputs.ignition = true;
    svc.tick(&mut panel, &EpochClock, &mut sink);

    let sent = &sink.client().sent;
    assert_eq!(sent.len(), 2);
    assert_eq!((sent[0].code, sent[0].value), (10000, 1));
    assert_eq!((sent[1].code, sent[1].value), (5, 0));
    assert!(sent.iter().all(|r| r.token == "tok-123" && r.serial == SERIAL));
    assert_eq!(sink.stats().delivered, 2);
}

#[test]
fn delivery_failures_never_change_derived_state() {
    let config = SystemConfig::default();

    let mut ok_sink = TelemetrySink::connect(ScriptedClient::healthy(), SERIAL, true);
    let mut ok_svc = VehicleService::new(&config);
    let mut ok_panel = MockPanel::new();
    drive_script(&mut ok_svc, &mut ok_panel, &mut ok_sink);

    let mut bad_sink = TelemetrySink::connect(ScriptedClient::rejecting_sends(), SERIAL, true);
    let mut bad_svc = VehicleService::new(&config);
    let mut bad_panel = MockPanel::new();
    drive_script(&mut bad_svc, &mut bad_panel, &mut bad_sink);

    assert_eq!(ok_svc.context(), bad_svc.context());
    assert_eq!(ok_panel.writes, bad_panel.writes);
    assert_eq!(ok_sink.client().codes(), bad_sink.client().codes());
    assert_eq!(bad_sink.stats().delivered, 0);
    assert_eq!(bad_sink.stats().failed, ok_sink.stats().delivered);
}

#[test]
fn failed_send_is_not_retried() {
    let mut client = ScriptedClient::healthy();
    client.send_script.extend([false, true]);
    let mut sink = TelemetrySink::connect(client, SERIAL, true);
    let mut svc = VehicleService::new(&SystemConfig::default());
    let mut panel = MockPanel::new();

    panel.inputs.ignition = true;
    svc.tick(&mut panel, &EpochClock, &mut sink);

    // IGNITION failed, ODOMETER delivered, one attempt each.
    assert_eq!(sink.client().codes(), vec![10000, 5]);
    assert_eq!(sink.stats().failed, 1);
    assert_eq!(sink.stats().delivered, 1);
}

#[test]
fn admin_login_failure_degrades_but_keeps_running() {
    let mut sink = TelemetrySink::connect(ScriptedClient::admin_down(), SERIAL, true);
    assert!(!sink.is_reporting());
    // Telemetry login is never attempted after the admin step fails.
    assert_eq!(sink.client().auth_calls, 1);

    let mut svc = VehicleService::new(&SystemConfig::default());
    let mut panel = MockPanel::new();
    drive_script(&mut svc, &mut panel, &mut sink);

    assert!(sink.client().sent.is_empty());
    assert!(sink.stats().skipped > 0);
    assert!(panel.lamp(pins::LEFT_LAMP_PIN));
    assert!(svc.state().ignition);
}

#[test]
fn disabled_reporting_skips_login_entirely() {
    let sink = TelemetrySink::connect(ScriptedClient::healthy(), SERIAL, false);
    assert_eq!(sink.client().auth_calls, 0);
    assert!(sink.session().is_none());
}

#[test]
fn expired_token_still_attempts_delivery() {
    let mut client = ScriptedClient::healthy();
    client.token_lifetime = Duration::seconds(-5);
    let mut sink = TelemetrySink::connect(client, SERIAL, true);
    let mut svc = VehicleService::new(&SystemConfig::default());
    let mut panel = MockPanel::new();

    svc.tick(&mut panel, &EpochClock, &mut sink);
    svc.tick(&mut panel, &EpochClock, &mut sink);

    assert_eq!(sink.client().sent.len(), 1);
    assert_eq!(sink.stats().delivered, 1);
}
