//! Application service: the hexagonal core.
//!
//! [`VehicleService`] owns the [`StateEngine`] and the single
//! [`VehicleContext`].  Each tick it samples the panel, runs one engine
//! cycle, applies the requested lamp levels, and forwards events to the
//! sink.  All I/O flows through port traits injected at call sites.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     VehicleService      │
//! ActuatorPort ◀──│  StateEngine · Context  │ ◀── Clock
//!                 └────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::engine::{
    CycleOutput, EngineParams, RawSamples, StateEngine, VehicleContext, VehicleState,
};
use crate::pins;

use super::ports::{ActuatorPort, Clock, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// VehicleService
// ───────────────────────────────────────────────────────────────

/// Orchestrates one sampling-and-derivation cycle at a time.
pub struct VehicleService {
    engine: StateEngine,
    ctx: VehicleContext,
}

impl VehicleService {
    /// Construct the service from configuration.  State starts all-zero.
    pub fn new(config: &SystemConfig) -> Self {
        Self::with_params(EngineParams::from(config))
    }

    pub fn with_params(params: EngineParams) -> Self {
        Self {
            engine: StateEngine::new(params),
            ctx: VehicleContext::new(),
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: sample → derive → lamps → events.
    ///
    /// `hw` is the one panel that is both read and written.  Returns the
    /// number of events handed to `sink`.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> usize {
        // 1. Sample every input via SensorPort
        let samples = sample(hw);

        // 2. Pure derivation, stamped with the emission time
        let output = self.engine.step(&mut self.ctx, &samples, clock.now());

        // 3. Lamps before delivery
        apply_lamps(&output, hw);

        // 4. Best-effort delivery
        for event in &output.events {
            sink.emit(event);
        }
        output.events.len()
    }

    /// Orderly shutdown: drive every lamp low.
    pub fn shutdown(&mut self, hw: &mut impl ActuatorPort) {
        for pin in pins::LAMP_PINS {
            hw.write_digital(pin, false);
        }
        info!(
            "VehicleService stopped after {} cycles (position={})",
            self.ctx.cycle_index, self.ctx.state.position
        );
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &VehicleState {
        &self.ctx.state
    }

    pub fn context(&self) -> &VehicleContext {
        &self.ctx
    }

    /// Cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.ctx.cycle_index
    }

    pub fn params(&self) -> EngineParams {
        self.engine.params()
    }
}

// ── Sampling ──────────────────────────────────────────────────

/// Read one cycle's inputs from the panel.
pub fn sample(hw: &mut impl SensorPort) -> RawSamples {
    RawSamples {
        ignition: hw.read_digital(pins::IGNITION_PIN),
        high_beam_button: hw.read_digital(pins::HIGH_BEAM_BUTTON_PIN),
        hazard_button: hw.read_digital(pins::HAZARD_BUTTON_PIN),
        joystick_x: hw.read_analog(pins::JOYSTICK_X_PIN),
        brake_pedal: hw.read_digital(pins::BRAKE_PEDAL_PIN),
        turn_pot: hw.read_analog(pins::TURN_POT_PIN),
    }
}

fn apply_lamps(output: &CycleOutput, hw: &mut impl ActuatorPort) {
    for cmd in &output.lamps {
        hw.write_digital(cmd.lamp.pin(), cmd.on);
    }
}
