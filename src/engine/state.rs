//! Derived vehicle state and the edge memory used for change detection.
//!
//! [`VehicleContext`] is the single owned blackboard the
//! [`StateEngine`](super::StateEngine) reads from and writes to each
//! cycle.  It is created all-zero at startup, lives for the whole
//! process, and is never shared.

use serde::Serialize;

use crate::app::events::EventCode;
use crate::pins;

// ---------------------------------------------------------------------------
// VehicleState
// ---------------------------------------------------------------------------

/// Current derived state of the vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VehicleState {
    pub ignition: bool,
    /// Cumulative distance.  Never decreases; there is no reset rule.
    pub position: u64,
    /// Always `>= 0`.
    pub speed: f64,
    /// Last computed joystick acceleration (display only).
    pub acceleration: f64,
    pub brake_on: bool,
    pub high_beam_on: bool,
    pub hazard_on: bool,
    pub left_signal_on: bool,
    pub right_signal_on: bool,
}

impl VehicleState {
    pub fn latch(&self, latch: Latch) -> bool {
        match latch {
            Latch::Brake => self.brake_on,
            Latch::HighBeam => self.high_beam_on,
            Latch::Hazard => self.hazard_on,
        }
    }

    pub(crate) fn latch_mut(&mut self, latch: Latch) -> &mut bool {
        match latch {
            Latch::Brake => &mut self.brake_on,
            Latch::HighBeam => &mut self.high_beam_on,
            Latch::Hazard => &mut self.hazard_on,
        }
    }

    pub fn signal(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_signal_on,
            Side::Right => self.right_signal_on,
        }
    }

    pub(crate) fn signal_mut(&mut self, side: Side) -> &mut bool {
        match side {
            Side::Left => &mut self.left_signal_on,
            Side::Right => &mut self.right_signal_on,
        }
    }
}

// ---------------------------------------------------------------------------
// EdgeMemory
// ---------------------------------------------------------------------------

/// Last raw sample per toggle input, and last reported value per
/// turn signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EdgeMemory {
    pub brake_pedal_raw: bool,
    pub high_beam_button_raw: bool,
    pub hazard_button_raw: bool,
    pub left_reported: bool,
    pub right_reported: bool,
}

impl EdgeMemory {
    pub fn raw(&self, latch: Latch) -> bool {
        match latch {
            Latch::Brake => self.brake_pedal_raw,
            Latch::HighBeam => self.high_beam_button_raw,
            Latch::Hazard => self.hazard_button_raw,
        }
    }

    pub(crate) fn raw_mut(&mut self, latch: Latch) -> &mut bool {
        match latch {
            Latch::Brake => &mut self.brake_pedal_raw,
            Latch::HighBeam => &mut self.high_beam_button_raw,
            Latch::Hazard => &mut self.hazard_button_raw,
        }
    }

    pub fn reported(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_reported,
            Side::Right => self.right_reported,
        }
    }

    pub(crate) fn reported_mut(&mut self, side: Side) -> &mut bool {
        match side {
            Side::Left => &mut self.left_reported,
            Side::Right => &mut self.right_reported,
        }
    }
}

// ---------------------------------------------------------------------------
// Flag identities
// ---------------------------------------------------------------------------

/// Inputs that toggle a latched flag on each press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latch {
    Brake,
    HighBeam,
    Hazard,
}

impl Latch {
    pub const fn code(self) -> EventCode {
        match self {
            Self::Brake => EventCode::Brake,
            Self::HighBeam => EventCode::HighBeam,
            Self::Hazard => EventCode::Hazard,
        }
    }

    /// Indicator lamp mirroring this latch.  The brake has none.
    pub const fn lamp(self) -> Option<Lamp> {
        match self {
            Self::Brake => None,
            Self::HighBeam => Some(Lamp::HighBeam),
            Self::Hazard => Some(Lamp::Hazard),
        }
    }
}

/// Turn-signal side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn code(self) -> EventCode {
        match self {
            Self::Left => EventCode::LeftSignal,
            Self::Right => EventCode::RightSignal,
        }
    }

    pub const fn lamp(self) -> Lamp {
        match self {
            Self::Left => Lamp::Left,
            Self::Right => Lamp::Right,
        }
    }
}

/// Indicator lamps driven by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lamp {
    Left,
    Right,
    HighBeam,
    Hazard,
}

impl Lamp {
    pub const fn pin(self) -> u8 {
        match self {
            Self::Left => pins::LEFT_LAMP_PIN,
            Self::Right => pins::RIGHT_LAMP_PIN,
            Self::HighBeam => pins::HIGH_BEAM_LAMP_PIN,
            Self::Hazard => pins::HAZARD_LAMP_PIN,
        }
    }
}

// ---------------------------------------------------------------------------
// VehicleContext
// ---------------------------------------------------------------------------

/// Everything the engine mutates, owned by exactly one caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VehicleContext {
    pub state: VehicleState,
    pub memory: EdgeMemory,
    /// Zero-based index of the next cycle to run.
    pub cycle_index: u64,
}

impl VehicleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every reported-flag mirror matches its state flag.
    pub fn mirrors_synchronised(&self) -> bool {
        self.memory.left_reported == self.state.left_signal_on
            && self.memory.right_reported == self.state.right_signal_on
    }
}
