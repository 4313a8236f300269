//! Keyboard state to tick input
//!
//! Key names follow `KeyboardEvent.code`. Held keys drive movement; presses
//! of the discrete keys become one-shot flags on the next tick input.

use crate::sim::{DebugInput, TickInput};

/// Tracks held movement keys and pending discrete presses
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    pending: TickInput,
    /// Debug keys are ignored unless enabled
    pub debug_keys: bool,
}

impl KeyState {
    pub fn new(debug_keys: bool) -> Self {
        Self {
            debug_keys,
            ..Default::default()
        }
    }

    /// Returns true if the key is bound
    pub fn key_down(&mut self, code: &str) -> bool {
        match code {
            "ArrowUp" | "KeyW" => self.up = true,
            "ArrowDown" | "KeyS" => self.down = true,
            "ArrowLeft" | "KeyA" => self.left = true,
            "ArrowRight" | "KeyD" => self.right = true,
            "Space" | "Enter" => self.pending.action = true,
            "KeyE" => self.pending.activate_power_up = true,
            "Escape" => self.pending.skip_tutorial = true,
            _ => return self.debug_key(code),
        }
        true
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        match code {
            "ArrowUp" | "KeyW" => self.up = false,
            "ArrowDown" | "KeyS" => self.down = false,
            "ArrowLeft" | "KeyA" => self.left = false,
            "ArrowRight" | "KeyD" => self.right = false,
            _ => return false,
        }
        true
    }

    fn debug_key(&mut self, code: &str) -> bool {
        if !self.debug_keys {
            return false;
        }
        let debug: &mut DebugInput = &mut self.pending.debug;
        match code {
            "F1" => debug.unlock_all = true,
            "F2" => debug.power_up_available = true,
            "F3" => debug.reduce_lives = true,
            "F4" => debug.start_tutorial = true,
            _ => return false,
        }
        true
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }

    /// Build the input for the next frame, consuming pending presses
    pub fn take_input(&mut self, idle_mode: bool) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.up = self.up;
        input.down = self.down;
        input.left = self.left;
        input.right = self.right;
        input.idle_mode = idle_mode;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_persist_presses_do_not() {
        let mut keys = KeyState::new(false);
        keys.key_down("ArrowLeft");
        keys.key_down("Space");

        let first = keys.take_input(false);
        assert!(first.left && first.action);

        let second = keys.take_input(false);
        assert!(second.left);
        assert!(!second.action);

        keys.key_up("KeyA");
        assert!(!keys.take_input(false).left);
    }

    #[test]
    fn test_debug_keys_gated() {
        let mut keys = KeyState::new(false);
        assert!(!keys.key_down("F3"));
        assert!(!keys.take_input(false).debug.reduce_lives);

        let mut keys = KeyState::new(true);
        assert!(keys.key_down("F3"));
        assert!(keys.take_input(false).debug.reduce_lives);
    }

    #[test]
    fn test_unbound_key() {
        let mut keys = KeyState::new(true);
        assert!(!keys.key_down("KeyQ"));
        assert!(!keys.key_up("Space"));
    }
}
