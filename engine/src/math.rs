//! Geometry Helpers
//!
//! Orientation/direction conversions shared by the camera rigs and the
//! subject controller. All directions follow the right-handed convention
//! where an identity orientation looks down -Z with +Y up.

use glam::{EulerRot, Quat, Vec3};

/// Canonical forward direction of an identity orientation.
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Squared length below which a vector counts as degenerate.
const DEGENERATE_LENGTH_SQ: f32 = 1.0e-12;

/// Normalize `v`, returning `fallback` when `v` is zero-length or non-finite.
#[inline]
pub fn normalize_or_fallback(v: Vec3, fallback: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if !len_sq.is_finite() || len_sq < DEGENERATE_LENGTH_SQ {
        fallback
    } else {
        v / len_sq.sqrt()
    }
}

/// Forward direction of `orientation`: `(0, 0, -1)` rotated and normalized.
///
/// A pathological orientation (zero or NaN quaternion) yields `fallback`.
#[inline]
pub fn forward_from(orientation: Quat, fallback: Vec3) -> Vec3 {
    normalize_or_fallback(orientation * FORWARD, fallback)
}

/// Orientation that yaws about world +Y, then pitches about the local +X axis.
///
/// `yaw = 0, pitch = 0` looks down -Z. Positive pitch looks up.
#[inline]
pub fn yaw_pitch_orientation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
}

/// Inverse of [`yaw_pitch_orientation`]. Any roll component is discarded.
///
/// Returns `None` for a degenerate quaternion.
pub fn yaw_pitch_from(orientation: Quat) -> Option<(f32, f32)> {
    let len_sq = orientation.length_squared();
    if !len_sq.is_finite() || len_sq < DEGENERATE_LENGTH_SQ {
        return None;
    }
    let (yaw, pitch, _roll) = orientation.normalize().to_euler(EulerRot::YXZ);
    Some((yaw, pitch))
}

/// Wrap an angle into `[-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU);
    wrapped - std::f32::consts::PI
}
