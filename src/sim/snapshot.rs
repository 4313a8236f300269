//! Render snapshots
//!
//! A read-only view of the state for the rendering collaborator. Built once per
//! frame; serializes to JSON for the web front end.

use glam::Vec2;
use serde::Serialize;

use super::edit::EditType;
use super::player::Facing;
use super::powerup::PowerUpPhase;
use super::state::{GamePhase, GameState};
use super::tutorial::Highlight;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub facing: Facing,
    pub moving: bool,
    pub carried: Vec<EditType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    pub edit: EditType,
    pub unlocked: bool,
    pub pos: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: u32,
    pub pos: Vec2,
    pub types: Vec<EditType>,
    pub completed: Vec<EditType>,
    pub complete: bool,
    pub created_during_power_up: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub phase: PowerUpPhase,
    pub progress: u32,
    pub requirement: u32,
    pub used_count: u32,
    pub remaining: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TutorialView {
    pub step: u8,
    pub prompt: Option<&'static str>,
    pub highlight: Option<Highlight>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub conveyor_speed: f32,
    pub player: PlayerView,
    pub stations: Vec<StationView>,
    pub orders: Vec<OrderView>,
    pub power_up: PowerUpView,
    pub tutorial: Option<TutorialView>,
    pub message: Option<String>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            lives: state.lives.remaining(),
            conveyor_speed: state.difficulty.conveyor_speed,
            player: PlayerView {
                pos: state.player.pos,
                facing: state.player.facing,
                moving: state.player.moving,
                carried: state.player.carried.iter().collect(),
            },
            stations: state
                .stations
                .iter()
                .map(|s| StationView {
                    edit: s.edit,
                    unlocked: s.unlocked,
                    pos: s.pos,
                })
                .collect(),
            orders: state
                .orders()
                .iter()
                .map(|o| OrderView {
                    id: o.id,
                    pos: o.pos(),
                    types: o.types().to_vec(),
                    completed: o.completed().to_vec(),
                    complete: o.is_complete(),
                    created_during_power_up: o.created_during_power_up,
                })
                .collect(),
            power_up: PowerUpView {
                phase: state.power_up.phase,
                progress: state.power_up.progress,
                requirement: state.power_up.requirement,
                used_count: state.power_up.used_count,
                remaining: state.power_up.remaining,
            },
            tutorial: state.tutorial.active.then(|| TutorialView {
                step: state.tutorial.step,
                prompt: state.tutorial.prompt(),
                highlight: state.tutorial.highlight,
            }),
            message: state.feedback.as_ref().map(|f| f.message.clone()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
