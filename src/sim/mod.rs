//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick(dt)`; waits are countdown fields
//! - Seeded RNG only
//! - Stable iteration order (orders kept in spawn order)
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod conveyor;
pub mod difficulty;
pub mod edit;
pub mod events;
pub mod lives;
pub mod matching;
pub mod order;
pub mod player;
pub mod powerup;
pub mod snapshot;
pub mod state;
pub mod stations;
pub mod tick;
pub mod tutorial;

pub use conveyor::{Conveyor, SpawnBlocked};
pub use difficulty::Difficulty;
pub use edit::{CarriedEdits, EditType};
pub use events::{ActionRejected, GameEvent};
pub use lives::{LifeOutcome, Lives};
pub use matching::Applied;
pub use order::Order;
pub use player::{Facing, Player};
pub use powerup::{PowerUp, PowerUpPhase};
pub use snapshot::Snapshot;
pub use state::{Feedback, GamePhase, GameState, Stats};
pub use stations::{Station, Stations};
pub use tick::{DebugInput, TickInput, tick};
pub use tutorial::{Highlight, Tutorial};
