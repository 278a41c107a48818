//! Per-cycle vehicle state derivation.
//!
//! [`StateEngine::step`] turns one set of [`RawSamples`] into an updated
//! [`VehicleContext`] plus the telemetry events and lamp writes that the
//! cycle produced.  It never touches hardware, the network, or a clock:
//! the caller supplies the timestamp and applies the outputs.
//!
//! Handlers run in a fixed order, which is also the event order:
//!
//! ```text
//!  ignition ─▶ high beam ─▶ hazard ─▶ joystick (speed · position · brake · odometer) ─▶ turn signals (L, R)
//! ```

pub mod kinematics;
pub mod state;

use chrono::{DateTime, Utc};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::app::events::{EventCode, TelemetryEvent};
use crate::config::SystemConfig;
use crate::thresholds::{self, LEFT_THRESHOLD, RIGHT_THRESHOLD};

pub use state::{EdgeMemory, Lamp, Latch, Side, VehicleContext, VehicleState};

/// Most events a single cycle can emit (one per handler outcome).
pub const MAX_EVENTS_PER_CYCLE: usize = 8;
/// Most lamp writes a single cycle can request.
pub const MAX_LAMPS_PER_CYCLE: usize = 4;

// ---------------------------------------------------------------------------
// Inputs / outputs
// ---------------------------------------------------------------------------

/// One cycle's worth of raw panel readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSamples {
    pub ignition: bool,
    pub high_beam_button: bool,
    pub hazard_button: bool,
    /// Joystick X axis, `[0, ANALOG_MAX)`.
    pub joystick_x: u16,
    pub brake_pedal: bool,
    /// Turn-signal pot, `[0, ANALOG_MAX)`.
    pub turn_pot: u16,
}

impl RawSamples {
    /// Samples for a panel at rest: everything released, sticks centred.
    pub fn neutral() -> Self {
        Self {
            joystick_x: thresholds::ANALOG_CENTRE,
            turn_pot: thresholds::ANALOG_CENTRE,
            ..Self::default()
        }
    }
}

/// A requested indicator lamp level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampCommand {
    pub lamp: Lamp,
    pub on: bool,
}

/// Everything a cycle produced, in handler order.
#[derive(Debug, Default)]
pub struct CycleOutput {
    pub events: heapless::Vec<TelemetryEvent, MAX_EVENTS_PER_CYCLE>,
    pub lamps: heapless::Vec<LampCommand, MAX_LAMPS_PER_CYCLE>,
}

impl CycleOutput {
    fn emit(&mut self, event: TelemetryEvent) {
        if let Err(dropped) = self.events.push(event) {
            warn!("engine: event buffer full, dropping {}", dropped.code);
        }
    }

    fn drive(&mut self, lamp: Lamp, on: bool) {
        if self.lamps.push(LampCommand { lamp, on }).is_err() {
            warn!("engine: lamp buffer full, dropping {:?}", lamp);
        }
    }

    /// Events carrying `code`, in emission order.
    pub fn events_for(&self, code: EventCode) -> impl Iterator<Item = &TelemetryEvent> {
        self.events.iter().filter(move |e| e.code == code)
    }
}

// ---------------------------------------------------------------------------
// StateEngine
// ---------------------------------------------------------------------------

/// Fixed parameters of the derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    /// Integration step, seconds.
    pub cycle_period_secs: f64,
    /// Cycles between odometer reports.  Must be at least 1.
    pub odometer_poll_count: u32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            cycle_period_secs: f64::from(thresholds::CYCLE_PERIOD_MS) / 1000.0,
            odometer_poll_count: thresholds::ODOMETER_POLL_COUNT,
        }
    }
}

impl From<&SystemConfig> for EngineParams {
    fn from(config: &SystemConfig) -> Self {
        Self {
            cycle_period_secs: config.cycle_period_secs(),
            odometer_poll_count: config.odometer_poll_count.max(1),
        }
    }
}

/// Stateless rule set applied to a caller-owned [`VehicleContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StateEngine {
    params: EngineParams,
}

impl StateEngine {
    /// A poll count of zero is raised to 1 (report every cycle).
    pub fn new(params: EngineParams) -> Self {
        if params.odometer_poll_count == 0 {
            warn!("engine: odometer poll count 0 raised to 1");
        }
        Self {
            params: EngineParams {
                odometer_poll_count: params.odometer_poll_count.max(1),
                ..params
            },
        }
    }

    pub fn params(&self) -> EngineParams {
        self.params
    }

    /// Run one full cycle.  `now` stamps every event emitted.
    pub fn step(
        &self,
        ctx: &mut VehicleContext,
        samples: &RawSamples,
        now: DateTime<Utc>,
    ) -> CycleOutput {
        let mut out = CycleOutput::default();

        self.ignition(ctx, samples.ignition, now, &mut out);
        self.toggle_latch(ctx, Latch::HighBeam, samples.high_beam_button, now, &mut out);
        self.toggle_latch(ctx, Latch::Hazard, samples.hazard_button, now, &mut out);
        self.joystick(ctx, samples.joystick_x, samples.brake_pedal, now, &mut out);
        self.turn_signals(ctx, samples.turn_pot, now, &mut out);

        if !ctx.mirrors_synchronised() {
            warn!(
                "engine: turn-signal report mirrors drifted from state ({:?} vs {:?})",
                ctx.state, ctx.memory
            );
        }

        trace!(
            "cycle {} | speed={:.2} pos={} events={}",
            ctx.cycle_index,
            ctx.state.speed,
            ctx.state.position,
            out.events.len()
        );
        ctx.cycle_index = ctx.cycle_index.wrapping_add(1);
        out
    }

    // ── Ignition ──────────────────────────────────────────────

    /// Level-triggered: report whenever the sample differs from the
    /// stored state.
    fn ignition(
        &self,
        ctx: &mut VehicleContext,
        ignition: bool,
        now: DateTime<Utc>,
        out: &mut CycleOutput,
    ) {
        if ignition != ctx.state.ignition {
            ctx.state.ignition = ignition;
            debug!("ignition -> {}", ignition);
            out.emit(TelemetryEvent::flag(EventCode::Ignition, ignition, now));
        }
    }

    // ── Toggle latches (brake, high beam, hazard) ─────────────

    /// Edge-triggered latch.  A press toggles the flag; both press and
    /// release re-drive the lamp and report the current latch value, so
    /// a release repeats the value sent on the press.
    fn toggle_latch(
        &self,
        ctx: &mut VehicleContext,
        latch: Latch,
        raw: bool,
        now: DateTime<Utc>,
        out: &mut CycleOutput,
    ) {
        let stored = ctx.memory.raw_mut(latch);
        if *stored == raw {
            return;
        }
        *stored = raw;

        let flag = ctx.state.latch_mut(latch);
        if raw {
            *flag = !*flag;
            debug!("{:?} latch -> {}", latch, *flag);
        }
        let value = *flag;

        if let Some(lamp) = latch.lamp() {
            out.drive(lamp, value);
        }
        out.emit(TelemetryEvent::flag(latch.code(), value, now));
    }

    // ── Joystick: speed, position, brake, odometer ────────────

    fn joystick(
        &self,
        ctx: &mut VehicleContext,
        x: u16,
        brake_pedal: bool,
        now: DateTime<Utc>,
        out: &mut CycleOutput,
    ) {
        let period = self.params.cycle_period_secs;
        let previous_speed = ctx.state.speed;

        let accel = kinematics::acceleration(x);
        let speed = kinematics::next_speed(previous_speed, accel, brake_pedal, period);
        ctx.state.acceleration = accel;
        ctx.state.speed = speed;
        ctx.state.position = ctx
            .state
            .position
            .saturating_add(kinematics::distance_increment(previous_speed, speed, period));

        self.toggle_latch(ctx, Latch::Brake, brake_pedal, now, out);

        if ctx.cycle_index % u64::from(self.params.odometer_poll_count) == 0 {
            out.emit(TelemetryEvent {
                code: EventCode::Odometer,
                value: i64::try_from(ctx.state.position).unwrap_or(i64::MAX),
                timestamp: now,
            });
        }
    }

    // ── Turn signals ──────────────────────────────────────────

    /// Single-threshold toggling per side: left asserts below
    /// `LEFT_THRESHOLD` and clears above it, right asserts above
    /// `RIGHT_THRESHOLD` and clears below it.  A pot sitting exactly on
    /// a threshold changes nothing.
    fn turn_signals(
        &self,
        ctx: &mut VehicleContext,
        pot: u16,
        now: DateTime<Utc>,
        out: &mut CycleOutput,
    ) {
        let left_on = ctx.state.left_signal_on;
        if pot < LEFT_THRESHOLD && !left_on {
            self.set_signal(ctx, Side::Left, true, now, out);
        } else if pot > LEFT_THRESHOLD && left_on {
            self.set_signal(ctx, Side::Left, false, now, out);
        }

        let right_on = ctx.state.right_signal_on;
        if pot > RIGHT_THRESHOLD && !right_on {
            self.set_signal(ctx, Side::Right, true, now, out);
        } else if pot < RIGHT_THRESHOLD && right_on {
            self.set_signal(ctx, Side::Right, false, now, out);
        }
    }

    fn set_signal(
        &self,
        ctx: &mut VehicleContext,
        side: Side,
        on: bool,
        now: DateTime<Utc>,
        out: &mut CycleOutput,
    ) {
        *ctx.state.signal_mut(side) = on;
        out.drive(side.lamp(), on);

        // Always true while the mirror invariant holds; kept so a broken
        // invariant cannot produce a duplicate report.
        let reported = ctx.memory.reported_mut(side);
        if *reported != on {
            *reported = on;
            debug!("{:?} signal -> {}", side, on);
            out.emit(TelemetryEvent::flag(side.code(), on, now));
        }
    }
}
