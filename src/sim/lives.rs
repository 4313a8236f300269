//! Lives and failure

use serde::{Deserialize, Serialize};

use crate::consts::STARTING_LIVES;

/// What happened when a life was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeOutcome {
    Lost { remaining: u8 },
    /// This loss emptied the counter
    GameOver,
    /// Already at zero; nothing changed
    AlreadyOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lives {
    remaining: u8,
}

impl Default for Lives {
    fn default() -> Self {
        Self {
            remaining: STARTING_LIVES,
        }
    }
}

impl Lives {
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Take one life. Never goes below zero, never regenerates.
    pub fn lose_life(&mut self) -> LifeOutcome {
        if self.remaining == 0 {
            return LifeOutcome::AlreadyOver;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            LifeOutcome::GameOver
        } else {
            LifeOutcome::Lost {
                remaining: self.remaining,
            }
        }
    }
}
