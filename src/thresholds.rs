//! Fixed numeric configuration for the state engine.
//!
//! These values define the analog sample range, the turn-signal cut
//! points, and the default cycle cadence.  They are compile-time
//! constants; only the cycle period and odometer poll count may be
//! overridden (once, at startup) through [`SystemConfig`](crate::config::SystemConfig).

/// Exclusive upper bound of every analog sample (10-bit ADC).
pub const ANALOG_MAX: u16 = 1024;

/// Midpoint of the analog range: joystick centre, zero acceleration.
pub const ANALOG_CENTRE: u16 = ANALOG_MAX / 2;

/// Pot readings below this assert the left turn signal (25 % of range).
pub const LEFT_THRESHOLD: u16 = ANALOG_MAX / 4;

/// Pot readings above this assert the right turn signal (75 % of range).
pub const RIGHT_THRESHOLD: u16 = ANALOG_MAX * 3 / 4;

/// Acceleration magnitude at full joystick deflection.
pub const ACCEL_SCALE: f64 = 10.0;

/// Speed removed per cycle while the brake pedal is held.
pub const BRAKE_DECEL: f64 = 10.0;

/// Default sampling period in milliseconds (10 Hz).
pub const CYCLE_PERIOD_MS: u32 = 100;

/// Default number of cycles between odometer reports.
pub const ODOMETER_POLL_COUNT: u32 = 25;
