//! Events emitted by the simulation for collaborators
//!
//! The tick appends to `GameState::events`; the session drains them once per
//! frame and forwards them to persistence, audio and rendering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::edit::EditType;

/// Why a player action did nothing. Surfaced as a transient message only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionRejected {
    #[error("already carrying {}", .0.as_str())]
    AlreadyCarrying(EditType),
    #[error("hands full")]
    HandsFull,
    #[error("station {} is locked", .0.as_str())]
    StationLocked(EditType),
    #[error("nothing to apply")]
    NothingCarried,
    #[error("no order there")]
    NoOrder,
    #[error("order doesn't need {}", .0.as_str())]
    NotNeeded(EditType),
    #[error("{} already done", .0.as_str())]
    AlreadyApplied(EditType),
    #[error("power-up not ready")]
    PowerUpNotReady,
}

/// Something collaborators may react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    LifeLost { remaining: u8 },
    StationUnlocked { edit: EditType },
    PowerUpAvailable,
    PowerUpActivated,
    PowerUpDeactivated { used: u32 },
    OrderSpawned { order_id: u32, edits: usize },
    OrderCompleted { order_id: u32, auto: bool },
    /// Incomplete order crossed the midpoint (shown once per order)
    OrderComment { order_id: u32 },
    OrderExited { order_id: u32, complete: bool },
    EditPickedUp { edit: EditType },
    EditApplied { order_id: u32, edit: EditType },
    EditDiscarded { edit: EditType },
    ActionRejected { reason: ActionRejected },
    TutorialStep { step: u8 },
    TutorialCompleted,
    GameOver { final_score: u64 },
}

impl GameEvent {
    /// Named trigger for the audio collaborator
    pub fn audio_cue(&self) -> Option<&'static str> {
        match self {
            GameEvent::EditPickedUp { .. } => Some("pickup"),
            GameEvent::EditApplied { .. } => Some("apply"),
            GameEvent::EditDiscarded { .. } => Some("discard"),
            GameEvent::ActionRejected { .. } => Some("error"),
            GameEvent::OrderCompleted { .. } => Some("order_complete"),
            GameEvent::LifeLost { .. } => Some("life_lost"),
            GameEvent::StationUnlocked { .. } => Some("station_unlock"),
            GameEvent::PowerUpAvailable => Some("power_up_ready"),
            GameEvent::PowerUpActivated => Some("power_up_on"),
            GameEvent::PowerUpDeactivated { .. } => Some("power_up_off"),
            GameEvent::GameOver { .. } => Some("game_over"),
            GameEvent::TutorialCompleted => Some("tutorial_done"),
            _ => None,
        }
    }
}
