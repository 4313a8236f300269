//! Order Fix - a conveyor order-correction arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (orders, stations, power-ups, tutorial)
//! - `session`: Frame driver wiring the simulation to its collaborators
//! - `persistence`: Cross-session unlock and tutorial state
//! - `leaderboard`: Final score submission and ranking
//! - `platform`: Input mapping and browser bindings
//! - `tuning`: Data-driven game balance

pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use leaderboard::{Leaderboard, LocalLeaderboard, RankInfo};
pub use persistence::{MemoryStore, ResetMode, UnlockRecord, UnlockStore};
pub use session::{ResetKind, Session};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Conveyor runs left to right along this row
    pub const CONVEYOR_Y: f32 = 560.0;
    /// Orders appear just off the left edge
    pub const ORDER_SPAWN_X: f32 = -60.0;
    /// Orders retire once past `SCREEN_WIDTH + EXIT_MARGIN`
    pub const EXIT_MARGIN: f32 = 80.0;
    /// No new order while another sits within this distance of the spawn point
    pub const SPAWN_BUFFER: f32 = 140.0;
    pub const ORDER_WIDTH: f32 = 90.0;
    pub const ORDER_HEIGHT: f32 = 70.0;

    /// Station row
    pub const STATION_Y: f32 = 140.0;
    pub const STATION_FIRST_X: f32 = 190.0;
    pub const STATION_SPACING: f32 = 180.0;
    /// Player must be this close to a station to pick up
    pub const STATION_REACH: f32 = 70.0;

    /// Power-up pad (action key activates when in range)
    pub const POWER_UP_PAD_X: f32 = 1180.0;
    pub const POWER_UP_PAD_Y: f32 = 360.0;
    pub const POWER_UP_PAD_REACH: f32 = 70.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 320.0;
    pub const PLAYER_RADIUS: f32 = 22.0;
    pub const PLAYER_START_X: f32 = 640.0;
    pub const PLAYER_START_Y: f32 = 360.0;

    pub const MAX_CARRIED_EDITS: usize = 3;
    pub const MAX_POWER_UPS: u32 = 3;
    pub const STARTING_LIVES: u8 = 3;
}

/// Clamp a point to the play area, keeping `radius` inside the edges
#[inline]
pub fn clamp_to_screen(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, consts::SCREEN_WIDTH - radius),
        pos.y.clamp(radius, consts::SCREEN_HEIGHT - radius),
    )
}
