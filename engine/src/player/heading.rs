//! Eight-way movement heading relative to the camera azimuth.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::input::MovementIntent;

/// Angle added to the base heading for the held directional intents.
///
/// Forward wins over backward and left wins over right when both are held.
/// Returns `None` when no directional intent is held.
pub fn heading_offset(intent: &MovementIntent) -> Option<f32> {
    let longitudinal = if intent.forward {
        Some(true)
    } else if intent.backward {
        Some(false)
    } else {
        None
    };
    let lateral = if intent.strafe_left {
        Some(true)
    } else if intent.strafe_right {
        Some(false)
    } else {
        None
    };

    let offset = match (longitudinal, lateral) {
        (Some(true), None) => 0.0,
        (Some(true), Some(true)) => FRAC_PI_4,
        (Some(true), Some(false)) => -FRAC_PI_4,
        (Some(false), None) => PI,
        (Some(false), Some(true)) => 3.0 * FRAC_PI_4,
        (Some(false), Some(false)) => -3.0 * FRAC_PI_4,
        (None, Some(true)) => FRAC_PI_2,
        (None, Some(false)) => -FRAC_PI_2,
        (None, None) => return None,
    };
    Some(offset)
}

/// Movement heading for `intent` given the camera azimuth `base`.
pub fn movement_heading(base: f32, intent: &MovementIntent) -> Option<f32> {
    heading_offset(intent).map(|offset| base + offset)
}
