//! Free-Fly Camera Rig
//!
//! A 6-DOF camera with its own position and yaw/pitch orientation. Look
//! input rotates it directly with no smoothing; movement intents translate
//! it along its full 3D forward/right vectors, with world up/down on the
//! vertical intents.
//!
//! The rig only changes while active. Deactivating it freezes the pose, so
//! a later activation without an explicit pose resumes where it left off.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::FrameInput;
use crate::math::{FORWARD, forward_from, normalize_or_fallback};
use crate::math::{wrap_angle, yaw_pitch_from, yaw_pitch_orientation};

/// Tunables for the fly rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyConfig {
    /// Movement speed in m/s.
    pub speed: f32,
    /// Movement speed while boost is held, in m/s.
    pub boost_speed: f32,
    /// Radians of rotation per unit of look delta.
    pub look_sensitivity: f32,
    /// Symmetric pitch limit in degrees.
    pub pitch_limit_degrees: f32,
}

impl Default for FlyConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            boost_speed: 30.0,
            look_sensitivity: 2.0,
            pitch_limit_degrees: 89.0,
        }
    }
}

/// Free-fly camera.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    /// Yaw about world +Y in radians (positive turns left).
    pub yaw: f32,
    /// Pitch in radians (positive looks up), clamped to the limits.
    pub pitch: f32,
    position: Vec3,
    orientation: Quat,
    pitch_limits: (f32, f32),
    config: FlyConfig,
    active: bool,
}

impl FlyCamera {
    pub fn new(config: &FlyConfig) -> Self {
        let limit = config.pitch_limit_degrees.to_radians();
        Self {
            yaw: 0.0,
            pitch: 0.0,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            pitch_limits: (-limit, limit),
            config: *config,
            active: false,
        }
    }

    /// Take control, optionally jumping to `pose` first.
    ///
    /// The pose's orientation is decomposed into yaw and pitch; any roll is
    /// dropped and pitch is clamped to the limits.
    pub fn activate(&mut self, pose: Option<(Vec3, Quat)>) {
        if let Some((position, orientation)) = pose {
            self.position = position;
            if let Some((yaw, pitch)) = yaw_pitch_from(orientation) {
                self.yaw = wrap_angle(yaw);
                self.pitch = pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
            }
            self.refresh_orientation();
        }
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    #[inline]
    pub fn pitch_limits(&self) -> (f32, f32) {
        self.pitch_limits
    }

    /// Unit forward vector.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        forward_from(self.orientation, FORWARD)
    }

    /// Unit right vector.
    #[inline]
    pub fn right(&self) -> Vec3 {
        normalize_or_fallback(self.orientation * Vec3::X, Vec3::X)
    }

    /// Apply one frame of look and movement input. No-op while inactive.
    pub fn update(&mut self, delta_time: f32, input: &FrameInput) {
        if !self.active {
            return;
        }

        let look = input.look;
        if !look.is_zero() {
            // Positive x turns right, which is negative yaw.
            self.yaw = wrap_angle(self.yaw - look.x * self.config.look_sensitivity);
            let pitch = self.pitch - look.y * self.config.look_sensitivity;
            self.pitch = pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
            self.refresh_orientation();
        }

        let movement = input.movement;
        let wish = self.forward() * movement.forward_axis()
            + self.right() * movement.right_axis()
            + Vec3::Y * movement.vertical_axis();
        let direction = normalize_or_fallback(wish, Vec3::ZERO);
        let speed = if movement.boost {
            self.config.boost_speed
        } else {
            self.config.speed
        };

        self.position += direction * speed * delta_time;
    }

    fn refresh_orientation(&mut self) {
        self.orientation = yaw_pitch_orientation(self.yaw, self.pitch);
    }
}
