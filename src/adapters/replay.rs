//! Replay panel: feeds a recorded sample sequence into the service.
//!
//! A recording is a JSON array of [`RawSamples`] objects, one per cycle:
//!
//! ```json
//! [{"ignition": true}, {"ignition": true, "joystickX": 900}]
//! ```
//!
//! Omitted fields take their zero value.  The cursor advances on each
//! ignition read, since that is the first pin sampled every cycle; once
//! the recording runs out the last sample is held.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::engine::RawSamples;
use crate::pins;

use super::LampBank;

pub struct ReplayPanel {
    frames: Vec<RawSamples>,
    cursor: usize,
    current: RawSamples,
    lamps: LampBank,
}

impl ReplayPanel {
    pub fn new(frames: Vec<RawSamples>) -> Result<Self> {
        if frames.is_empty() {
            bail!("replay recording holds no samples");
        }
        Ok(Self {
            current: frames[0],
            frames,
            cursor: 0,
            lamps: LampBank::default(),
        })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let frames: Vec<RawSamples> =
            serde_json::from_str(text).context("replay recording is not a sample array")?;
        Self::new(frames)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading replay file {}", path.display()))?;
        let panel = Self::from_json(&text)
            .with_context(|| format!("parsing replay file {}", path.display()))?;
        info!("ReplayPanel: {} samples from {}", panel.len(), path.display());
        Ok(panel)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True once every recorded sample has been served.
    pub fn exhausted(&self) -> bool {
        self.cursor >= self.frames.len()
    }

    pub fn lamps(&self) -> &LampBank {
        &self.lamps
    }

    fn advance(&mut self) {
        match self.frames.get(self.cursor) {
            Some(frame) => {
                self.current = *frame;
                self.cursor += 1;
            }
            None => debug!("ReplayPanel: holding last sample"),
        }
    }
}

impl SensorPort for ReplayPanel {
    fn read_digital(&mut self, pin: u8) -> bool {
        match pin {
            pins::IGNITION_PIN => {
                self.advance();
                self.current.ignition
            }
            pins::BRAKE_PEDAL_PIN => self.current.brake_pedal,
            pins::HIGH_BEAM_BUTTON_PIN => self.current.high_beam_button,
            pins::HAZARD_BUTTON_PIN => self.current.hazard_button,
            _ => false,
        }
    }

    fn read_analog(&mut self, pin: u8) -> u16 {
        match pin {
            pins::JOYSTICK_X_PIN => self.current.joystick_x,
            pins::TURN_POT_PIN => self.current.turn_pot,
            _ => crate::thresholds::ANALOG_CENTRE,
        }
    }
}

impl ActuatorPort for ReplayPanel {
    fn write_digital(&mut self, pin: u8, level: bool) {
        self.lamps.set(pin, level);
    }
}
