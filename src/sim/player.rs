//! The player avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::edit::CarriedEdits;
use crate::clamp_to_screen;
use crate::consts::*;

/// Facing direction (for sprite selection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub facing: Facing,
    /// Moved during the last tick
    pub moving: bool,
    pub carried: CarriedEdits,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            facing: Facing::Down,
            moving: false,
            carried: CarriedEdits::new(),
        }
    }
}

impl Player {
    /// Move along `dir` (components in -1..=1) for one tick.
    /// Returns true if the position changed.
    pub fn step(&mut self, dir: Vec2, dt: f32) -> bool {
        if dir == Vec2::ZERO {
            self.moving = false;
            return false;
        }

        // Horizontal wins ties so diagonal walking faces sideways
        self.facing = if dir.x.abs() >= dir.y.abs() {
            if dir.x > 0.0 { Facing::Right } else { Facing::Left }
        } else if dir.y > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        };

        let old = self.pos;
        self.pos = clamp_to_screen(
            self.pos + dir.normalize_or_zero() * PLAYER_SPEED * dt,
            PLAYER_RADIUS,
        );
        self.moving = self.pos != old;
        self.moving
    }
}
