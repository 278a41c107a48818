//! Joystick-to-motion arithmetic.
//!
//! Pure functions, kept apart from the engine so the integration rules
//! can be checked against hand-computed traces.

use crate::thresholds::{ACCEL_SCALE, ANALOG_CENTRE, BRAKE_DECEL};

/// Map a joystick sample to acceleration: zero at centre, linear to
/// `±ACCEL_SCALE` at the ends of the range.
pub fn acceleration(x: u16) -> f64 {
    let centre = f64::from(ANALOG_CENTRE);
    (f64::from(x) - centre) * ACCEL_SCALE / centre
}

/// Speed after one cycle.  Braking overrides the joystick.  Never negative.
pub fn next_speed(speed: f64, acceleration: f64, braking: bool, period_secs: f64) -> f64 {
    let candidate = if braking {
        speed - BRAKE_DECEL
    } else {
        speed + acceleration * period_secs
    };
    candidate.max(0.0)
}

/// Distance covered in one cycle by trapezoidal integration, truncated
/// toward zero.  Each cycle's contribution is truncated on its own.
pub fn distance_increment(previous_speed: f64, speed: f64, period_secs: f64) -> u64 {
    let d = (previous_speed + speed) / 2.0 * period_secs;
    // Both speeds are >= 0, so `d` is too; the cast saturates on overflow.
    d.trunc() as u64
}
