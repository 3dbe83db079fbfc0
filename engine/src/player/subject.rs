//! Subject Controller
//!
//! Moves the controllable subject across the terrain. In third-person mode
//! the subject integrates its own motion: gravity, eight-way movement
//! relative to the camera azimuth, and a point-vs-heightfield clamp that
//! keeps it `clearance` above the ground. In fly mode the camera owns the
//! position and the subject just trails it.
//!
//! Per-frame order is fixed:
//!
//! 1. edge events (camera toggle, jump)
//! 2. physics or fly mirror
//! 3. position history and speed
//! 4. camera update
//! 5. post-camera terrain re-clamp (third-person only)

use glam::Vec3;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::heading::movement_heading;
use crate::camera::{CameraConfig, CameraController, CameraMode};
use crate::input::{FrameInput, MovementIntent};
use crate::world::TerrainQuery;

/// Base movement speed in m/s
pub const BASE_SPEED: f32 = 10.0;

/// Movement speed with boost held, in m/s
pub const BOOST_SPEED: f32 = 30.0;

/// Gravity acceleration in m/s^2
pub const GRAVITY: f32 = 9.8;

/// Upward velocity applied by a jump, in m/s
pub const JUMP_IMPULSE: f32 = 5.0;

/// Height kept between the subject and the terrain surface
pub const TERRAIN_CLEARANCE: f32 = 1.0;

/// Default spawn point
pub const SPAWN_POSITION: Vec3 = Vec3::new(10.0, 0.0, 1.0);

/// Subject tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    pub speed: f32,
    pub boost_speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub clearance: f32,
    pub spawn_position: Vec3,
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            speed: BASE_SPEED,
            boost_speed: BOOST_SPEED,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            clearance: TERRAIN_CLEARANCE,
            spawn_position: SPAWN_POSITION,
        }
    }
}

/// Current and previous position plus the displacement between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionHistory {
    pub current: Vec3,
    pub previous: Vec3,
    /// `current - previous` as of the last [`advance`](Self::advance).
    pub delta: Vec3,
}

impl PositionHistory {
    pub fn new(position: Vec3) -> Self {
        Self {
            current: position,
            previous: position,
            delta: Vec3::ZERO,
        }
    }

    /// Record one frame: compute the delta, then roll `previous` forward.
    pub fn advance(&mut self) -> Vec3 {
        self.delta = self.current - self.previous;
        self.previous = self.current;
        self.delta
    }
}

/// Physical state of the subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectState {
    pub position: PositionHistory,
    /// Heading in radians; only changes while a directional intent is held.
    pub rotation: f32,
    /// Vertical velocity in m/s (positive up).
    pub vertical_velocity: f32,
    pub is_grounded: bool,
    /// Length of the last frame's displacement.
    pub speed: f32,
}

impl SubjectState {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            position: PositionHistory::new(spawn),
            rotation: 0.0,
            vertical_velocity: 0.0,
            is_grounded: false,
            speed: 0.0,
        }
    }
}

/// Drives the subject and owns its camera.
pub struct SubjectController<T> {
    state: SubjectState,
    config: SubjectConfig,
    camera: CameraController,
    terrain: T,
}

impl<T: TerrainQuery> SubjectController<T> {
    /// Spawn the subject at `config.spawn_position` with its camera in
    /// third-person mode.
    pub fn new(config: SubjectConfig, camera: &CameraConfig, terrain: T) -> Self {
        let mut controller = Self {
            state: SubjectState::new(config.spawn_position),
            config,
            camera: CameraController::new(camera),
            terrain,
        };
        // Prime the orbit rig on the spawn point.
        let mut spawn = controller.state.position.current;
        controller.camera.update(0.0, &FrameInput::default(), &mut spawn);
        controller
    }

    #[inline]
    pub fn state(&self) -> &SubjectState {
        &self.state
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.state.position.current
    }

    #[inline]
    pub fn config(&self) -> &SubjectConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut SubjectConfig {
        &mut self.config
    }

    #[inline]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    #[inline]
    pub fn camera_mode(&self) -> CameraMode {
        self.camera.mode()
    }

    /// Switch camera mode using the subject's current position for the
    /// handoff. Returns `false` if `mode` was already active.
    pub fn set_camera_mode(&mut self, mode: CameraMode) -> bool {
        self.camera.set_mode(mode, self.state.position.current)
    }

    #[inline]
    pub fn set_follow_distance(&mut self, distance: f32) {
        self.camera.set_follow_distance(distance);
    }

    #[inline]
    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    /// Jump if grounded. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.state.is_grounded {
            return false;
        }
        self.state.vertical_velocity = self.config.jump_impulse;
        self.state.is_grounded = false;
        debug!("subject: jump at {:?}", self.state.position.current);
        true
    }

    /// Advance one frame.
    ///
    /// A negative or non-finite `delta_time` is treated as zero.
    pub fn update(&mut self, delta_time: f32, input: &FrameInput) {
        let dt = if delta_time.is_finite() && delta_time >= 0.0 {
            delta_time
        } else {
            warn!("subject: ignoring invalid delta time {delta_time}");
            0.0
        };

        if input.toggle_camera {
            self.camera.toggle_mode(self.state.position.current);
        }
        if input.jump {
            self.jump();
        }

        match self.camera.mode() {
            CameraMode::Fly => {
                self.state.position.current = self.camera.fly_anchor();
                self.state.vertical_velocity = 0.0;
                self.state.is_grounded = false;
            }
            CameraMode::ThirdPerson => self.integrate(dt, &input.movement),
        }

        let delta = self.state.position.advance();
        self.state.speed = delta.length();

        self.camera.update(dt, input, &mut self.state.position.current);

        if self.camera.mode() == CameraMode::ThirdPerson {
            let current = &mut self.state.position.current;
            if let Some(elevation) = surface_elevation(&self.terrain, current.x, current.z) {
                current.y = current.y.max(elevation + self.config.clearance);
            }
        }

        trace!(
            "subject: pos={:?} vy={:.3} grounded={} speed={:.3}",
            self.state.position.current,
            self.state.vertical_velocity,
            self.state.is_grounded,
            self.state.speed
        );
    }

    /// Gravity, movement and terrain collision for one third-person frame.
    fn integrate(&mut self, dt: f32, movement: &MovementIntent) {
        let state = &mut self.state;

        if !state.is_grounded {
            state.vertical_velocity -= self.config.gravity * dt;
        }

        let mut candidate = state.position.current;

        if let Some(heading) = movement_heading(self.camera.heading(), movement) {
            state.rotation = heading;
            let speed = if movement.boost {
                self.config.boost_speed
            } else {
                self.config.speed
            };
            candidate.x -= heading.sin() * dt * speed;
            candidate.z -= heading.cos() * dt * speed;
        }

        candidate.y += state.vertical_velocity * dt;

        let was_grounded = state.is_grounded;
        match surface_elevation(&self.terrain, candidate.x, candidate.z) {
            Some(elevation) => {
                let min_y = elevation + self.config.clearance;
                if candidate.y < min_y {
                    candidate.y = min_y;
                    state.vertical_velocity = 0.0;
                    state.is_grounded = true;
                    if !was_grounded {
                        debug!("subject: landed at elevation {elevation:.3}");
                    }
                } else {
                    state.is_grounded = false;
                }
            }
            None => state.is_grounded = false,
        }

        state.position.current = candidate;
    }
}

/// Terrain elevation, treating non-finite samples as unknown.
fn surface_elevation<T: TerrainQuery>(terrain: &T, x: f32, z: f32) -> Option<f32> {
    terrain.elevation_at(x, z).filter(|e| e.is_finite())
}
