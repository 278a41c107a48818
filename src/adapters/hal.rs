//! Hardware adapter: bridges real panel peripherals to the port traits.
//!
//! Digital lines use the `embedded-hal` 1.0 [`InputPin`] / [`OutputPin`]
//! traits, so any HAL crate (Linux GPIO, a microcontroller HAL) can back
//! the panel.  `embedded-hal` 1.0 has no ADC trait; [`AnalogChannel`]
//! fills that gap.
//!
//! Pin errors never reach the engine: a failed read is logged and
//! treated as low (digital) or centre (analog), a failed write is
//! logged and skipped.

use embedded_hal::digital::{InputPin, OutputPin};
use log::{error, warn};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::pins;
use crate::thresholds::{ANALOG_CENTRE, ANALOG_MAX};

/// Multi-channel ADC.
pub trait AnalogChannel {
    type Error: core::fmt::Debug;

    /// Raw conversion on `channel`.
    fn read(&mut self, channel: u8) -> Result<u16, Self::Error>;
}

/// Digital inputs, in [`pins`] order.
pub struct PanelInputs<I> {
    pub ignition: I,
    pub brake_pedal: I,
    pub high_beam_button: I,
    pub hazard_button: I,
}

/// Lamp outputs, in [`pins::LAMP_PINS`] order.
pub struct PanelOutputs<O> {
    pub left: O,
    pub right: O,
    pub high_beam: O,
    pub hazard: O,
}

/// Panel adapter over `embedded-hal` pins and an ADC.
pub struct HalPanel<I, O, A> {
    inputs: PanelInputs<I>,
    outputs: PanelOutputs<O>,
    adc: A,
}

impl<I, O, A> HalPanel<I, O, A>
where
    I: InputPin,
    O: OutputPin,
    A: AnalogChannel,
{
    pub fn new(inputs: PanelInputs<I>, outputs: PanelOutputs<O>, adc: A) -> Self {
        Self {
            inputs,
            outputs,
            adc,
        }
    }

    pub fn release(self) -> (PanelInputs<I>, PanelOutputs<O>, A) {
        (self.inputs, self.outputs, self.adc)
    }
}

impl<I, O, A> SensorPort for HalPanel<I, O, A>
where
    I: InputPin,
    O: OutputPin,
    A: AnalogChannel,
{
    fn read_digital(&mut self, pin: u8) -> bool {
        let line = match pin {
            pins::IGNITION_PIN => &mut self.inputs.ignition,
            pins::BRAKE_PEDAL_PIN => &mut self.inputs.brake_pedal,
            pins::HIGH_BEAM_BUTTON_PIN => &mut self.inputs.high_beam_button,
            pins::HAZARD_BUTTON_PIN => &mut self.inputs.hazard_button,
            _ => {
                warn!("HalPanel: no digital input on pin {}", pin);
                return false;
            }
        };
        line.is_high().unwrap_or_else(|e| {
            error!("HalPanel: digital read on pin {} failed: {:?}", pin, e);
            false
        })
    }

    fn read_analog(&mut self, pin: u8) -> u16 {
        match self.adc.read(pin) {
            Ok(raw) => raw.min(ANALOG_MAX - 1),
            Err(e) => {
                error!("HalPanel: analog read on channel {} failed: {:?}", pin, e);
                ANALOG_CENTRE
            }
        }
    }
}

impl<I, O, A> ActuatorPort for HalPanel<I, O, A>
where
    I: InputPin,
    O: OutputPin,
    A: AnalogChannel,
{
    fn write_digital(&mut self, pin: u8, level: bool) {
        let line = match pin {
            pins::LEFT_LAMP_PIN => &mut self.outputs.left,
            pins::RIGHT_LAMP_PIN => &mut self.outputs.right,
            pins::HIGH_BEAM_LAMP_PIN => &mut self.outputs.high_beam,
            pins::HAZARD_LAMP_PIN => &mut self.outputs.hazard,
            _ => {
                warn!("HalPanel: no output on pin {}", pin);
                return;
            }
        };
        let result = if level { line.set_high() } else { line.set_low() };
        if let Err(e) = result {
            error!("HalPanel: write to pin {} failed: {:?}", pin, e);
        }
    }
}
