//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `config_file`  | ConfigPort         | JSON file on disk            |
//! | `hal`          | SensorPort         | embedded-hal input pins, ADC |
//! |                | ActuatorPort       | embedded-hal output pins     |
//! | `log_client`   | TelemetryClient    | Log output (dry run)         |
//! | `replay`       | SensorPort         | Recorded sample sequence     |
//! |                | ActuatorPort       | In-memory lamp state         |
//! | `sim_panel`    | SensorPort         | In-memory inputs             |
//! |                | ActuatorPort       | In-memory lamp state         |
//! | `time`         | Clock              | System wall clock            |

pub mod config_file;
pub mod hal;
pub mod log_client;
pub mod replay;
pub mod sim_panel;
pub mod time;

/// Lamp levels as last written, indexed by output pin.
///
/// Shared by the in-memory panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LampBank {
    levels: [bool; 4],
}

impl LampBank {
    fn slot(pin: u8) -> Option<usize> {
        crate::pins::LAMP_PINS.iter().position(|&p| p == pin)
    }

    pub fn set(&mut self, pin: u8, level: bool) {
        match Self::slot(pin) {
            Some(i) => self.levels[i] = level,
            None => log::warn!("write to unknown output pin {}", pin),
        }
    }

    pub fn get(&self, pin: u8) -> bool {
        Self::slot(pin).is_some_and(|i| self.levels[i])
    }

    pub fn any_on(&self) -> bool {
        self.levels.iter().any(|&l| l)
    }
}
