//! Integration tests for the panel → VehicleService → lamps/events pipeline.

use super::mock_hw::{EpochClock, MockPanel, RecordingSink};

use vehiclemon::adapters::replay::ReplayPanel;
use vehiclemon::app::events::EventCode;
use vehiclemon::app::service::VehicleService;
use vehiclemon::config::SystemConfig;
use vehiclemon::pins;

fn make_service() -> (VehicleService, MockPanel, RecordingSink) {
    (
        VehicleService::new(&SystemConfig::default()),
        MockPanel::new(),
        RecordingSink::default(),
    )
}

fn run_cycles(
    svc: &mut VehicleService,
    panel: &mut MockPanel,
    sink: &mut RecordingSink,
    n: usize,
) {
    for _ in 0..n {
        svc.tick(panel, &EpochClock, sink);
    }
}

#[test]
fn panel_at_rest_reports_only_the_first_odometer() {
    let (mut svc, mut panel, mut sink) = make_service();
    run_cycles(&mut svc, &mut panel, &mut sink, 10);
    assert_eq!(sink.codes(), vec![EventCode::Odometer]);
    assert!(panel.writes.is_empty());
}

#[test]
fn ignition_is_reported_on_each_change_only() {
    let (mut svc, mut panel, mut sink) = make_service();
    run_cycles(&mut svc, &mut panel, &mut sink, 1);

    panel.inputs.ignition = true;
    run_cycles(&mut svc, &mut panel, &mut sink, 3);
    panel.inputs.ignition = false;
    run_cycles(&mut svc, &mut panel, &mut sink, 3);

    assert_eq!(sink.values(EventCode::Ignition), vec![1, 0]);
    assert!(!svc.state().ignition);
}

#[test]
fn hazard_button_toggles_lamp_and_repeats_on_release() {
    let (mut svc, mut panel, mut sink) = make_service();

    for pressed in [true, false, true, false] {
        panel.inputs.hazard_button = pressed;
        run_cycles(&mut svc, &mut panel, &mut sink, 2);
    }

    assert_eq!(sink.values(EventCode::Hazard), vec![1, 1, 0, 0]);
    assert_eq!(
        panel.writes_to(pins::HAZARD_LAMP_PIN),
        vec![true, true, false, false]
    );
    assert!(!svc.state().hazard_on);
}

#[test]
fn high_beam_latch_survives_release() {
    let (mut svc, mut panel, mut sink) = make_service();
    panel.inputs.high_beam_button = true;
    run_cycles(&mut svc, &mut panel, &mut sink, 1);
    panel.inputs.high_beam_button = false;
    run_cycles(&mut svc, &mut panel, &mut sink, 5);

    assert!(svc.state().high_beam_on);
    assert!(panel.lamp(pins::HIGH_BEAM_LAMP_PIN));
    assert_eq!(sink.values(EventCode::HighBeam), vec![1, 1]);
}

#[test]
fn throttle_then_brake_to_standstill() {
    let (mut svc, mut panel, mut sink) = make_service();
    panel.inputs.joystick_x = 1023;
    run_cycles(&mut svc, &mut panel, &mut sink, 20);
    assert!(svc.state().speed > 19.0);
    assert!(svc.state().position > 0);

    panel.inputs.brake_pedal = true;
    run_cycles(&mut svc, &mut panel, &mut sink, 3);
    assert!(svc.state().speed.abs() < f64::EPSILON);
    let parked = svc.state().position;

    // Held brake overrides full throttle and reports once.
    run_cycles(&mut svc, &mut panel, &mut sink, 10);
    assert!(svc.state().speed.abs() < f64::EPSILON);
    assert_eq!(svc.state().position, parked);
    assert_eq!(sink.values(EventCode::Brake), vec![1]);
}

#[test]
fn odometer_polls_every_twenty_five_cycles() {
    let (mut svc, mut panel, mut sink) = make_service();
    panel.inputs.joystick_x = 768;
    run_cycles(&mut svc, &mut panel, &mut sink, 50);
    assert_eq!(sink.values(EventCode::Odometer), vec![0, 6]);
}

#[test]
fn turn_pot_sweep_drives_both_signals() {
    let (mut svc, mut panel, mut sink) = make_service();
    for pot in [100, 100, 512, 900, 900, 256] {
        panel.inputs.turn_pot = pot;
        run_cycles(&mut svc, &mut panel, &mut sink, 1);
    }

    assert_eq!(sink.values(EventCode::LeftSignal), vec![1, 0]);
    assert_eq!(sink.values(EventCode::RightSignal), vec![1, 0]);
    assert_eq!(panel.writes_to(pins::LEFT_LAMP_PIN), vec![true, false]);
    assert_eq!(panel.writes_to(pins::RIGHT_LAMP_PIN), vec![true, false]);
    assert!(svc.context().mirrors_synchronised());
}

#[test]
fn shutdown_leaves_every_lamp_dark() {
    let (mut svc, mut panel, mut sink) = make_service();
    panel.inputs.hazard_button = true;
    panel.inputs.turn_pot = 0;
    run_cycles(&mut svc, &mut panel, &mut sink, 1);
    assert!(panel.lamp(pins::HAZARD_LAMP_PIN));
    assert!(panel.lamp(pins::LEFT_LAMP_PIN));

    svc.shutdown(&mut panel);
    for pin in pins::LAMP_PINS {
        assert!(!panel.lamp(pin), "pin {pin} still lit");
    }
}

#[test]
fn replayed_recording_drives_the_service() {
    let mut panel = ReplayPanel::from_json(
        r#"[
            {"ignition": true, "joystickX": 512, "turnPot": 512},
            {"ignition": true, "joystickX": 512, "turnPot": 512, "hazardButton": true},
            {"ignition": true, "joystickX": 512, "turnPot": 512}
        ]"#,
    )
    .unwrap();
    let mut svc = VehicleService::new(&SystemConfig::default());
    let mut sink = RecordingSink::default();

    for _ in 0..panel.len() {
        svc.tick(&mut panel, &EpochClock, &mut sink);
    }

    assert_eq!(
        sink.codes(),
        vec![
            EventCode::Ignition,
            EventCode::Odometer,
            EventCode::Hazard,
            EventCode::Hazard
        ]
    );
    assert!(panel.lamps().get(pins::HAZARD_LAMP_PIN));
}
