//! Camera Module
//!
//! Third-person orbit and free-fly rigs plus the controller that switches
//! between them. Window-system agnostic: only camera state and math.

pub mod controller;
pub mod fly;
pub mod third_person;

pub use controller::{CameraConfig, CameraController, CameraMode};
pub use fly::{FlyCamera, FlyConfig};
pub use third_person::{ThirdPersonCamera, ThirdPersonConfig};
