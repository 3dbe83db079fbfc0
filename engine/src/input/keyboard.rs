//! Key State Tracking
//!
//! Turns generic key press/release events and mouse deltas into the
//! per-frame [`FrameInput`] the controllers consume. Held keys persist
//! across frames; the camera toggle and jump fire once per press.

use super::{FrameInput, LookDelta, MovementIntent};

/// Generic key codes, independent of any windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Forward
    W,
    /// Strafe left
    A,
    /// Backward
    S,
    /// Strafe right
    D,
    /// Fly up
    E,
    /// Fly down
    Q,
    /// Jump
    Space,
    /// Boost
    ShiftLeft,
    /// Boost
    ShiftRight,
    /// Camera mode toggle
    V,
    /// Catch-all for unbound keys
    Unknown,
}

/// Accumulated input state between two frames.
#[derive(Debug, Clone, Default)]
pub struct IntentState {
    movement: MovementIntent,
    boost_left: bool,
    boost_right: bool,

    toggle_held: bool,
    toggle_triggered: bool,
    jump_held: bool,
    jump_triggered: bool,

    look: LookDelta,
}

impl IntentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release.
    ///
    /// Returns `true` if the key is bound to an intent.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W => self.movement.forward = pressed,
            KeyCode::S => self.movement.backward = pressed,
            KeyCode::A => self.movement.strafe_left = pressed,
            KeyCode::D => self.movement.strafe_right = pressed,
            KeyCode::E => self.movement.up = pressed,
            KeyCode::Q => self.movement.down = pressed,
            KeyCode::ShiftLeft => self.boost_left = pressed,
            KeyCode::ShiftRight => self.boost_right = pressed,
            KeyCode::V => {
                // Fire on the press edge only; key repeat does not retrigger.
                if pressed && !self.toggle_held {
                    self.toggle_triggered = true;
                }
                self.toggle_held = pressed;
            }
            KeyCode::Space => {
                if pressed && !self.jump_held {
                    self.jump_triggered = true;
                }
                self.jump_held = pressed;
            }
            KeyCode::Unknown => return false,
        }
        self.movement.boost = self.boost_left || self.boost_right;
        true
    }

    /// Accumulate a look delta; several events per frame add up.
    pub fn handle_look_delta(&mut self, dx: f32, dy: f32) {
        self.look.x += dx;
        self.look.y += dy;
    }

    /// Snapshot of the intents for the current frame.
    pub fn frame(&self) -> FrameInput {
        FrameInput {
            movement: self.movement,
            look: self.look,
            toggle_camera: self.toggle_triggered,
            jump: self.jump_triggered,
        }
    }

    /// Clear per-frame state (look delta and edge events). Held keys persist.
    pub fn end_frame(&mut self) {
        self.look = LookDelta::default();
        self.toggle_triggered = false;
        self.jump_triggered = false;
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_map_to_intents() {
        let mut state = IntentState::new();
        assert!(state.handle_key(KeyCode::W, true));
        assert!(state.handle_key(KeyCode::A, true));
        assert!(state.handle_key(KeyCode::ShiftLeft, true));

        let frame = state.frame();
        assert!(frame.movement.forward);
        assert!(frame.movement.strafe_left);
        assert!(frame.movement.boost);
        assert!(!frame.movement.backward);

        state.end_frame();
        assert!(state.frame().movement.forward);
    }

    #[test]
    fn test_boost_from_either_shift() {
        let mut state = IntentState::new();
        state.handle_key(KeyCode::ShiftLeft, true);
        state.handle_key(KeyCode::ShiftRight, true);
        state.handle_key(KeyCode::ShiftLeft, false);
        assert!(state.frame().movement.boost);
        state.handle_key(KeyCode::ShiftRight, false);
        assert!(!state.frame().movement.boost);
    }

    #[test]
    fn test_toggle_fires_once_per_press() {
        let mut state = IntentState::new();
        state.handle_key(KeyCode::V, true);
        assert!(state.frame().toggle_camera);

        state.end_frame();
        assert!(!state.frame().toggle_camera);

        // Key repeat while held
        state.handle_key(KeyCode::V, true);
        assert!(!state.frame().toggle_camera);

        state.handle_key(KeyCode::V, false);
        state.handle_key(KeyCode::V, true);
        assert!(state.frame().toggle_camera);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut state = IntentState::new();
        state.handle_key(KeyCode::Space, true);
        assert!(state.frame().jump);
        state.end_frame();
        state.handle_key(KeyCode::Space, true);
        assert!(!state.frame().jump);
    }

    #[test]
    fn test_look_delta_accumulates_and_clears() {
        let mut state = IntentState::new();
        state.handle_look_delta(0.5, -0.25);
        state.handle_look_delta(0.25, 0.5);
        assert_eq!(state.frame().look, LookDelta::new(0.75, 0.25));

        state.end_frame();
        assert!(state.frame().look.is_zero());
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut state = IntentState::new();
        assert!(!state.handle_key(KeyCode::Unknown, true));
        assert_eq!(state.frame(), FrameInput::default());
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut state = IntentState::new();
        state.handle_key(KeyCode::D, true);
        state.handle_key(KeyCode::V, true);
        state.reset();
        assert_eq!(state.frame(), FrameInput::default());
    }
}
