//! In-memory panel for host runs.
//!
//! Inputs are plain fields set by the caller; lamp writes land in a
//! [`LampBank`].  With no caller intervention the panel sits at rest.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::engine::RawSamples;
use crate::pins;

use super::LampBank;

#[derive(Debug, Clone)]
pub struct SimulatedPanel {
    pub inputs: RawSamples,
    lamps: LampBank,
}

impl Default for SimulatedPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPanel {
    pub fn new() -> Self {
        Self {
            inputs: RawSamples::neutral(),
            lamps: LampBank::default(),
        }
    }

    pub fn lamps(&self) -> &LampBank {
        &self.lamps
    }
}

impl SensorPort for SimulatedPanel {
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
            _ => crate::thresholds::ANALOG_CENTRE,
        }
    }
}

impl ActuatorPort for SimulatedPanel {
    fn write_digital(&mut self, pin: u8, level: bool) {
        self.lamps.set(pin, level);
    }
}
