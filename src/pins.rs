//! Pin assignments for the vehicle sensor panel.
//!
//! Single source of truth: the service and every adapter reference this
//! module rather than hard-coding pin numbers.  Digital and analog pins
//! live in separate numbering spaces on the board, so analog pin 2 and
//! digital pin 2 are distinct inputs.

// ---------------------------------------------------------------------------
// Digital inputs
// ---------------------------------------------------------------------------

/// Ignition key switch. HIGH = ignition on.
pub const IGNITION_PIN: u8 = 2;
/// Joystick push (Z axis), used as the brake pedal. HIGH = pressed.
pub const BRAKE_PEDAL_PIN: u8 = 3;
/// High-beam momentary push-button. HIGH = pressed.
pub const HIGH_BEAM_BUTTON_PIN: u8 = 4;
/// Hazard momentary push-button. HIGH = pressed.
pub const HAZARD_BUTTON_PIN: u8 = 5;

// ---------------------------------------------------------------------------
// Analog inputs
// ---------------------------------------------------------------------------

/// Joystick X axis: throttle / deceleration.
pub const JOYSTICK_X_PIN: u8 = 0;
/// Joystick Y axis. Wired on the panel but not used by the engine.
pub const JOYSTICK_Y_PIN: u8 = 1;
/// Turn-signal stalk potentiometer.
pub const TURN_POT_PIN: u8 = 2;

// ---------------------------------------------------------------------------
// Digital outputs (indicator LEDs)
// ---------------------------------------------------------------------------

pub const LEFT_LAMP_PIN: u8 = 6;
pub const RIGHT_LAMP_PIN: u8 = 7;
pub const HIGH_BEAM_LAMP_PIN: u8 = 8;
pub const HAZARD_LAMP_PIN: u8 = 9;

/// Every output pin, in the order they are driven low on shutdown.
pub const LAMP_PINS: [u8; 4] = [
    LEFT_LAMP_PIN,
    RIGHT_LAMP_PIN,
    HIGH_BEAM_LAMP_PIN,
    HAZARD_LAMP_PIN,
];
