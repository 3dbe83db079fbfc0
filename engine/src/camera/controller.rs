//! Camera Controller Module
//!
//! Owns the third-person orbit rig and the free-fly rig, tracks which one is
//! active, and resolves a single (position, orientation) pair per frame.
//!
//! ## Mode handoff
//!
//! Switching `ThirdPerson -> Fly` spawns the fly rig exactly where the orbit
//! rig was: `follow_distance` behind the subject along the orbit camera's
//! forward vector, with the same orientation. The resolved pose therefore
//! does not jump. Switching back simply reactivates the orbit rig, which
//! kept its own angles the whole time.
//!
//! While flying, the camera is authoritative: each update pulls the subject
//! to the point `follow_distance` ahead of the camera, which is where the
//! orbit rig's target would be for the same pose.

use glam::{Quat, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use super::fly::{FlyCamera, FlyConfig};
use super::third_person::{ThirdPersonCamera, ThirdPersonConfig};
use crate::input::{FrameInput, LookDelta};
use crate::math::{FORWARD, forward_from};

/// Which rig drives the view.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Orbit camera following the subject
    #[default]
    ThirdPerson,
    /// Free camera; the subject trails it
    Fly,
}

impl CameraMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::ThirdPerson => CameraMode::Fly,
            CameraMode::Fly => CameraMode::ThirdPerson,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CameraMode::ThirdPerson => "third_person",
            CameraMode::Fly => "fly",
        }
    }

    /// Parse the names produced by [`as_str`](Self::as_str).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "third_person" => Some(CameraMode::ThirdPerson),
            "fly" => Some(CameraMode::Fly),
            _ => None,
        }
    }
}

impl std::fmt::Display for CameraMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Camera subsystem configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance between camera and subject, in both modes.
    pub follow_distance: f32,
    pub third_person: ThirdPersonConfig,
    pub fly: FlyConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_distance: 15.0,
            third_person: ThirdPersonConfig::default(),
            fly: FlyConfig::default(),
        }
    }
}

/// Dual-mode camera state machine.
#[derive(Debug, Clone)]
pub struct CameraController {
    mode: CameraMode,
    third_person: ThirdPersonCamera,
    fly: FlyCamera,
    follow_distance: f32,
    position: Vec3,
    orientation: Quat,
    /// Last non-degenerate forward vector
    forward: Vec3,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl CameraController {
    /// Create a controller in third-person mode.
    pub fn new(config: &CameraConfig) -> Self {
        let mut third_person = ThirdPersonCamera::new(&config.third_person, config.follow_distance);
        third_person.activate();

        let mut controller = Self {
            mode: CameraMode::ThirdPerson,
            third_person,
            fly: FlyCamera::new(&config.fly),
            follow_distance: config.follow_distance,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            forward: FORWARD,
        };
        controller.resolve();
        controller
    }

    #[inline]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Resolved camera position of the active rig.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Resolved camera orientation of the active rig.
    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Unit forward vector of the resolved pose.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    #[inline]
    pub fn follow_distance(&self) -> f32 {
        self.follow_distance
    }

    /// Change the follow distance; the orbit radius follows.
    pub fn set_follow_distance(&mut self, distance: f32) {
        self.follow_distance = distance;
        self.third_person.distance = distance;
    }

    #[inline]
    pub fn third_person(&self) -> &ThirdPersonCamera {
        &self.third_person
    }

    #[inline]
    pub fn fly(&self) -> &FlyCamera {
        &self.fly
    }

    /// Base heading for subject movement: the orbit azimuth.
    #[inline]
    pub fn heading(&self) -> f32 {
        self.third_person.theta
    }

    /// Point `follow_distance` ahead of the fly camera. This is where the
    /// subject sits while flying.
    pub fn fly_anchor(&self) -> Vec3 {
        let forward = forward_from(self.fly.orientation(), self.forward);
        self.fly.position() + forward * self.follow_distance
    }

    /// Switch to `mode`, handing the pose over as needed.
    ///
    /// Returns `false` if `mode` was already active.
    pub fn set_mode(&mut self, mode: CameraMode, subject_position: Vec3) -> bool {
        if mode == self.mode {
            return false;
        }

        match mode {
            CameraMode::Fly => {
                let orientation = self.third_person.orientation();
                let forward = forward_from(orientation, self.forward);
                let spawn = subject_position - forward * self.follow_distance;

                self.fly.activate(Some((spawn, orientation)));
                self.third_person.deactivate();
                debug!("camera: third_person -> fly at {spawn:?}");
            }
            CameraMode::ThirdPerson => {
                self.fly.deactivate();
                self.third_person.activate();
                debug!("camera: fly -> third_person");
            }
        }

        self.mode = mode;
        self.resolve();
        true
    }

    /// Flip between third-person and fly.
    pub fn toggle_mode(&mut self, subject_position: Vec3) {
        self.set_mode(self.mode.toggled(), subject_position);
    }

    /// Advance both rigs by one frame.
    ///
    /// In fly mode `subject_position` is overwritten with the point
    /// `follow_distance` ahead of the camera.
    pub fn update(&mut self, delta_time: f32, input: &FrameInput, subject_position: &mut Vec3) {
        self.fly.update(delta_time, input);

        if self.mode == CameraMode::Fly {
            *subject_position = self.fly_anchor();
        }

        let look = match self.mode {
            CameraMode::ThirdPerson => input.look,
            CameraMode::Fly => LookDelta::default(),
        };
        self.third_person.update(*subject_position, look);

        self.resolve();
    }

    fn resolve(&mut self) {
        let (position, orientation) = match self.mode {
            CameraMode::ThirdPerson => (
                self.third_person.position(),
                self.third_person.orientation(),
            ),
            CameraMode::Fly => (self.fly.position(), self.fly.orientation()),
        };
        self.position = position;
        self.orientation = orientation;
        self.forward = forward_from(orientation, self.forward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MovementIntent;

    const EPSILON: f32 = 1e-4;

    fn settled(subject: Vec3) -> CameraController {
        let mut camera = CameraController::default();
        let mut position = subject;
        camera.update(0.016, &FrameInput::default(), &mut position);
        camera
    }

    #[test]
    fn test_starts_in_third_person() {
        let camera = CameraController::default();
        assert_eq!(camera.mode(), CameraMode::ThirdPerson);
        assert!(camera.third_person().is_active());
        assert!(!camera.fly().is_active());
        assert_eq!(camera.follow_distance(), 15.0);
    }

    #[test]
    fn test_exactly_one_rig_active() {
        let mut camera = settled(Vec3::ZERO);
        for _ in 0..4 {
            camera.toggle_mode(Vec3::ZERO);
            let orbiting = camera.third_person().is_active();
            assert!(orbiting != camera.fly().is_active());
            assert_eq!(camera.fly().is_active(), camera.mode() == CameraMode::Fly);
        }
    }

    #[test]
    fn test_fly_handoff_is_continuous() {
        let subject = Vec3::new(10.0, 1.0, 1.0);
        let mut camera = settled(subject);
        let before_position = camera.position();
        let before_forward = camera.forward();

        assert!(camera.set_mode(CameraMode::Fly, subject));

        assert!(camera.position().abs_diff_eq(before_position, EPSILON));
        assert!(camera.forward().abs_diff_eq(before_forward, EPSILON));

        // The first fly frame with no input keeps the pose and the subject.
        let mut position = subject;
        camera.update(0.016, &FrameInput::default(), &mut position);
        assert!(camera.position().abs_diff_eq(before_position, EPSILON));
        assert!(position.abs_diff_eq(subject, EPSILON));
    }

    #[test]
    fn test_round_trip_keeps_orbit_state() {
        let subject = Vec3::new(3.0, 2.0, -4.0);
        let mut camera = settled(subject);
        let theta = camera.third_person().theta;
        let phi = camera.third_person().phi;

        camera.set_mode(CameraMode::Fly, subject);
        let mut position = subject;
        let look = FrameInput {
            look: LookDelta::new(0.4, 0.2),
            ..FrameInput::default()
        };
        camera.update(0.016, &look, &mut position);
        camera.set_mode(CameraMode::ThirdPerson, position);

        assert_eq!(camera.third_person().theta, theta);
        assert_eq!(camera.third_person().phi, phi);
    }

    #[test]
    fn test_fly_pulls_subject() {
        let subject = Vec3::new(0.0, 5.0, 0.0);
        let mut camera = settled(subject);
        camera.set_mode(CameraMode::Fly, subject);

        let input = FrameInput::moving(MovementIntent {
            strafe_right: true,
            ..MovementIntent::default()
        });
        let mut position = subject;
        camera.update(1.0, &input, &mut position);

        let expected = camera.position() + camera.forward() * camera.follow_distance();
        assert!(position.abs_diff_eq(expected, EPSILON));
        assert!(position.x > 9.0);
    }

    #[test]
    fn test_third_person_does_not_move_subject() {
        let mut camera = CameraController::default();
        let mut position = Vec3::new(1.0, 2.0, 3.0);
        camera.update(0.5, &FrameInput::default(), &mut position);
        assert_eq!(position, Vec3::new(1.0, 2.0, 3.0));
        let target = camera.third_person().target();
        assert!(target.abs_diff_eq(position, EPSILON));
    }

    #[test]
    fn test_set_same_mode_is_noop() {
        let mut camera = settled(Vec3::ZERO);
        assert!(!camera.set_mode(CameraMode::ThirdPerson, Vec3::ZERO));
        assert_eq!(camera.mode(), CameraMode::ThirdPerson);
    }

    #[test]
    fn test_look_only_reaches_active_rig() {
        let mut camera = settled(Vec3::ZERO);
        camera.set_mode(CameraMode::Fly, Vec3::ZERO);
        let theta = camera.third_person().theta;

        let input = FrameInput {
            look: LookDelta::new(0.3, 0.0),
            ..FrameInput::default()
        };
        let mut position = Vec3::ZERO;
        camera.update(0.016, &input, &mut position);
        assert_eq!(camera.third_person().theta, theta);
    }

    #[test]
    fn test_follow_distance_updates_orbit() {
        let mut camera = CameraController::default();
        camera.set_follow_distance(8.0);
        let mut position = Vec3::ZERO;
        camera.update(0.016, &FrameInput::default(), &mut position);
        assert!((camera.position().length() - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(CameraMode::parse("fly"), Some(CameraMode::Fly));
        let name = CameraMode::ThirdPerson.as_str();
        assert_eq!(CameraMode::parse(name), Some(CameraMode::ThirdPerson));
        assert_eq!(CameraMode::parse("orbit"), None);
        assert_eq!(CameraMode::Fly.to_string(), "fly");
    }
}
