//! Overland Engine Library
//!
//! Movement and viewpoint core for a real-time 3D simulation: a subject
//! walks over height-mapped terrain under gravity while a camera follows it
//! in third person or flies free, with pose-preserving handoffs between the
//! two modes.
//!
//! # Modules
//!
//! - [`player`] - Subject state, locomotion, terrain collision
//! - [`camera`] - Third-person orbit rig, fly rig and the mode controller
//! - [`input`] - Decoded per-frame intents and a key-state tracker
//! - [`world`] - Terrain elevation queries and procedural height fields
//! - [`config`] - Serde configuration tree with validation
//! - [`debug`] - Named property access for inspectors
//! - [`math`] - Orientation and direction helpers
//!
//! # Example
//!
//! ```ignore
//! use overland_engine::camera::CameraConfig;
//! use overland_engine::input::{IntentState, KeyCode};
//! use overland_engine::player::{SubjectConfig, SubjectController};
//! use overland_engine::world::FlatTerrain;
//!
//! let mut subject = SubjectController::new(
//!     SubjectConfig::default(),
//!     &CameraConfig::default(),
//!     FlatTerrain::new(0.0),
//! );
//! let mut intents = IntentState::new();
//!
//! // Per frame
//! intents.handle_key(KeyCode::W, true);
//! subject.update(delta_time, &intents.frame());
//! intents.end_frame();
//!
//! let view = (subject.camera().position(), subject.camera().orientation());
//! ```

pub mod camera;
pub mod config;
pub mod debug;
pub mod input;
pub mod math;
pub mod player;
pub mod world;

pub use camera::{CameraController, CameraMode};
pub use config::{ConfigError, SimConfig};
pub use input::{FrameInput, IntentState, KeyCode};
pub use player::{SubjectConfig, SubjectController};
pub use world::TerrainQuery;
