//! Player Module
//!
//! The controllable subject: physical state, terrain-following locomotion
//! and the camera it owns.
//!
//! # Components
//!
//! - [`SubjectController`] - Per-frame integration, collision and camera handoff
//! - [`SubjectConfig`] - Speeds, gravity, jump impulse, clearance and spawn point
//! - [`heading_offset`] - Eight-way heading table relative to the camera azimuth

pub mod heading;
pub mod subject;

pub use heading::{heading_offset, movement_heading};
pub use subject::{PositionHistory, SubjectConfig, SubjectController, SubjectState};
