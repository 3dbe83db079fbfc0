//! Input Module
//!
//! Decoded per-frame input intents. Device polling happens elsewhere; the
//! controllers only see the flags and deltas defined here.
//!
//! # Example
//!
//! ```rust,ignore
//! use overland_engine::input::{IntentState, KeyCode};
//!
//! let mut intents = IntentState::new();
//! intents.handle_key(KeyCode::W, true);
//! intents.handle_look_delta(0.01, 0.0);
//!
//! let frame = intents.frame();
//! subject.update(delta_time, &frame);
//! intents.end_frame();
//! ```

pub mod keyboard;

pub use keyboard::{IntentState, KeyCode};

/// Held movement intents, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub boost: bool,
    /// Fly camera only: rise along world +Y.
    pub up: bool,
    /// Fly camera only: sink along world -Y.
    pub down: bool,
}

impl MovementIntent {
    /// +1 forward, -1 backward, 0 when neither or both are held.
    pub fn forward_axis(&self) -> f32 {
        axis(self.forward, self.backward)
    }

    /// +1 right, -1 left, 0 when neither or both are held.
    pub fn right_axis(&self) -> f32 {
        axis(self.strafe_right, self.strafe_left)
    }

    /// +1 up, -1 down, 0 when neither or both are held.
    pub fn vertical_axis(&self) -> f32 {
        axis(self.up, self.down)
    }
}

#[inline]
fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Look rotation requested this frame, in normalized screen units.
///
/// Positive `x` turns right, positive `y` tilts the view down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookDelta {
    pub x: f32,
    pub y: f32,
}

impl LookDelta {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Everything the controllers consume for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub movement: MovementIntent,
    pub look: LookDelta,
    /// Edge event: switch between third-person and fly camera.
    pub toggle_camera: bool,
    /// Edge event: jump if grounded.
    pub jump: bool,
}

impl FrameInput {
    /// Input with only held movement intents set.
    pub fn moving(movement: MovementIntent) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_intent_is_idle() {
        let intent = MovementIntent::default();
        assert_eq!(intent.forward_axis(), 0.0);
        assert_eq!(intent.right_axis(), 0.0);
        assert_eq!(intent.vertical_axis(), 0.0);
    }

    #[test]
    fn test_boost_and_up_stay_vertical() {
        let intent = MovementIntent {
            boost: true,
            up: true,
            ..MovementIntent::default()
        };
        assert_eq!(intent.forward_axis(), 0.0);
        assert_eq!(intent.right_axis(), 0.0);
        assert_eq!(intent.vertical_axis(), 1.0);
    }

    #[test]
    fn test_opposing_axes_cancel() {
        let intent = MovementIntent {
            forward: true,
            backward: true,
            strafe_left: true,
            strafe_right: true,
            ..MovementIntent::default()
        };
        assert_eq!(intent.forward_axis(), 0.0);
        assert_eq!(intent.right_axis(), 0.0);
    }

    #[test]
    fn test_axes_signs() {
        let intent = MovementIntent {
            backward: true,
            strafe_left: true,
            down: true,
            ..MovementIntent::default()
        };
        assert_eq!(intent.forward_axis(), -1.0);
        assert_eq!(intent.right_axis(), -1.0);
        assert_eq!(intent.vertical_axis(), -1.0);
    }

    #[test]
    fn test_look_delta_zero() {
        assert!(LookDelta::default().is_zero());
        assert!(!LookDelta::new(0.0, 0.1).is_zero());
    }
}
