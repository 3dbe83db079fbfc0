//! Third-Person Orbit Rig
//!
//! Orbits a target point on a sphere described by an azimuth `theta`
//! (about +Y, zero behind the target on +Z) and a polar angle `phi`
//! (measured down from +Y). The camera always looks at the target.
//!
//! The rig is recomputed every frame whether or not it is the active
//! camera, so `theta` stays valid as the subject's base heading. Look input
//! is only applied while active.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::LookDelta;
use crate::math::{wrap_angle, yaw_pitch_orientation};

/// Tunables for the orbit rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThirdPersonConfig {
    /// Initial azimuth in radians.
    pub theta: f32,
    /// Initial polar angle in radians (0 = straight above the target).
    pub phi: f32,
    /// Lowest allowed polar angle.
    pub phi_min: f32,
    /// Highest allowed polar angle (PI/2 = level with the target).
    pub phi_max: f32,
    /// Radians of rotation per unit of look delta.
    pub look_sensitivity: f32,
}

impl Default for ThirdPersonConfig {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: std::f32::consts::PI * 0.35,
            phi_min: 0.15,
            phi_max: 1.45,
            look_sensitivity: 2.0,
        }
    }
}

/// Orbit camera following a target at a fixed distance.
#[derive(Debug, Clone)]
pub struct ThirdPersonCamera {
    /// Azimuth in radians, wrapped to [-PI, PI].
    pub theta: f32,
    /// Polar angle in radians, clamped to the configured limits.
    pub phi: f32,
    /// Distance from the target.
    pub distance: f32,
    phi_limits: (f32, f32),
    look_sensitivity: f32,
    target: Vec3,
    position: Vec3,
    orientation: Quat,
    active: bool,
}

impl ThirdPersonCamera {
    /// Create an inactive rig. Call [`update`](Self::update) to place it.
    pub fn new(config: &ThirdPersonConfig, distance: f32) -> Self {
        let phi_limits = (config.phi_min, config.phi_max);
        let mut camera = Self {
            theta: wrap_angle(config.theta),
            phi: config.phi.clamp(phi_limits.0, phi_limits.1),
            distance,
            phi_limits,
            look_sensitivity: config.look_sensitivity,
            target: Vec3::ZERO,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            active: false,
        };
        camera.recompute();
        camera
    }

    pub fn activate(&mut self) {
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
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn phi_limits(&self) -> (f32, f32) {
        self.phi_limits
    }

    /// Track `target`, applying `look` only while active.
    pub fn update(&mut self, target: Vec3, look: LookDelta) {
        if self.active && !look.is_zero() {
            self.theta = wrap_angle(self.theta - look.x * self.look_sensitivity);
            let phi = self.phi - look.y * self.look_sensitivity;
            self.phi = phi.clamp(self.phi_limits.0, self.phi_limits.1);
        }
        self.target = target;
        self.recompute();
    }

    fn recompute(&mut self) {
        let ring_radius = self.phi.sin() * self.distance;
        let offset = Vec3::new(
            self.theta.sin() * ring_radius,
            self.phi.cos() * self.distance,
            self.theta.cos() * ring_radius,
        );
        self.position = self.target + offset;
        // Yaw by theta faces back along -offset horizontally; pitching by
        // phi - PI/2 tilts down onto the target.
        self.orientation =
            yaw_pitch_orientation(self.theta, self.phi - std::f32::consts::FRAC_PI_2);
    }
}
