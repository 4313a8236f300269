//! Game state and the operations that mutate it
//!
//! Everything the simulation owns lives here. There is no global state: a
//! session builds a `GameState` from its unlock record and drives it with
//! `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::conveyor::{Conveyor, SpawnBlocked};
use super::difficulty::Difficulty;
use super::edit::EditType;
use super::events::{ActionRejected, GameEvent};
use super::lives::{LifeOutcome, Lives};
use super::matching::{self, Applied};
use super::order::Order;
use super::player::Player;
use super::powerup::PowerUp;
use super::stations::Stations;
use super::tutorial::Tutorial;
use crate::persistence::UnlockRecord;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal; only a reset leaves it
    GameOver,
}

/// A short message shown to the player, fading out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    /// Seconds until it disappears
    pub remaining: f32,
    pub is_error: bool,
}

/// Session statistics for the game-over screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub orders_spawned: u32,
    pub orders_completed: u32,
    pub orders_missed: u32,
    pub edits_applied: u32,
    pub auto_completed_edits: u32,
    /// Seconds of simulated play
    pub play_time: f32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: Lives,
    pub player: Player,
    pub stations: Stations,
    pub conveyor: Conveyor,
    pub power_up: PowerUp,
    pub difficulty: Difficulty,
    pub tutorial: Tutorial,
    pub feedback: Option<Feedback>,
    /// Set by overlays; blocks input-driven transitions only
    pub inputs_disabled: bool,
    pub stats: Stats,
    /// Pending events, drained by the session
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game from a persisted unlock record
    pub fn new(seed: u64, tuning: Tuning, record: &UnlockRecord, start_tutorial: bool) -> Self {
        let stations = Stations::from_record(record);
        let difficulty = Difficulty::derive(stations.unlocked_count(), 0, &tuning);
        log::info!(
            "New game: seed={}, stations={}, speed={:.1}, tutorial={}",
            seed,
            stations.unlocked_count(),
            difficulty.conveyor_speed,
            start_tutorial
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            lives: Lives::default(),
            player: Player::default(),
            conveyor: Conveyor::new(tuning.initial_spawn_delay),
            power_up: PowerUp::new(&tuning),
            tutorial: if start_tutorial {
                Tutorial::start()
            } else {
                Tutorial::inactive()
            },
            feedback: None,
            inputs_disabled: false,
            stats: Stats::default(),
            events: Vec::new(),
            next_id: 1,
            stations,
            difficulty,
            tuning,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn orders(&self) -> &[Order] {
        &self.conveyor.orders
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events not yet drained
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn add_score(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score += points;
        self.emit(GameEvent::ScoreChanged { score: self.score });
    }

    /// Recompute speed, spawn delay and edit table from progression
    pub fn refresh_difficulty(&mut self) {
        self.difficulty = Difficulty::derive(
            self.stations.unlocked_count(),
            self.power_up.used_count,
            &self.tuning,
        );
    }

    /// Show a transient message
    pub fn notify(&mut self, message: impl Into<String>, is_error: bool) {
        self.feedback = Some(Feedback {
            message: message.into(),
            remaining: self.tuning.feedback_duration,
            is_error,
        });
    }

    /// Surface a rejected action to the player
    pub fn reject(&mut self, reason: ActionRejected) {
        log::debug!("Action rejected: {reason}");
        self.notify(reason.to_string(), true);
        self.emit(GameEvent::ActionRejected { reason });
    }

    /// Fade the feedback message
    pub fn tick_feedback(&mut self, dt: f32) {
        if let Some(feedback) = &mut self.feedback {
            feedback.remaining -= dt;
            if feedback.remaining <= 0.0 {
                self.feedback = None;
            }
        }
    }

    /// Take one life; enters game over when none remain
    pub fn lose_life(&mut self) {
        match self.lives.lose_life() {
            LifeOutcome::Lost { remaining } => {
                self.emit(GameEvent::LifeLost { remaining });
            }
            LifeOutcome::GameOver => {
                self.emit(GameEvent::LifeLost { remaining: 0 });
                self.phase = GamePhase::GameOver;
                log::info!(
                    "Game over: score={}, completed={}, missed={}",
                    self.score,
                    self.stats.orders_completed,
                    self.stats.orders_missed
                );
                self.emit(GameEvent::GameOver {
                    final_score: self.score,
                });
            }
            LifeOutcome::AlreadyOver => {}
        }
    }

    /// Try to put a new order on the belt. Returns its id on success.
    pub fn spawn_order(&mut self) -> Result<u32, SpawnBlocked> {
        let unlocked = self.stations.unlocked_types();
        let id = self.next_id;
        let mut order = self.conveyor.spawn_order(&mut self.rng, id, &unlocked)?;
        self.next_id += 1;
        self.stats.orders_spawned += 1;
        self.emit(GameEvent::OrderSpawned {
            order_id: id,
            edits: order.types().len(),
        });

        if self.power_up.is_active() {
            order.created_during_power_up = true;
            let edits = order.auto_complete() as u64;
            self.stats.auto_completed_edits += edits as u32;
            self.add_score(edits * self.tuning.points_per_edit);
            self.emit(GameEvent::OrderCompleted {
                order_id: id,
                auto: true,
            });
        }

        log::debug!("Order {} spawned needing {:?}", id, order.types());
        self.conveyor.push(order);
        Ok(id)
    }

    /// Remove orders past the exit: missed ones cost a life, finished ones pay a bonus.
    /// Nothing after the game-over order is scored.
    pub fn retire_orders(&mut self) {
        for order in self.conveyor.retire() {
            if self.is_game_over() {
                break;
            }
            let complete = order.is_complete();
            self.emit(GameEvent::OrderExited {
                order_id: order.id,
                complete,
            });
            if complete {
                self.add_score(self.tuning.exit_bonus);
            } else {
                self.stats.orders_missed += 1;
                log::debug!("Order {} missed with {:?} done", order.id, order.completed());
                self.lose_life();
            }
        }
    }

    /// Pick up from the station for `edit`
    pub fn pickup(&mut self, edit: EditType) -> Result<EditType, ActionRejected> {
        let station = self.stations.get(edit);
        let picked = matching::pickup(&mut self.player.carried, station)?;
        self.emit(GameEvent::EditPickedUp { edit: picked });
        Ok(picked)
    }

    /// Apply the carried head edit to the order with `order_id`
    pub fn apply_to_order(&mut self, order_id: u32) -> Result<Applied, ActionRejected> {
        let Some(order) = self.conveyor.get_mut(order_id) else {
            return Err(ActionRejected::NoOrder);
        };
        let applied = matching::apply_to_order(&mut self.player.carried, order)?;

        self.stats.edits_applied += 1;
        self.stations.record_edit();
        if self.power_up.record_edit_progress() {
            self.emit(GameEvent::PowerUpAvailable);
            self.notify("Power-up ready!", false);
        }
        self.add_score(self.tuning.points_per_edit);
        self.emit(GameEvent::EditApplied {
            order_id,
            edit: applied.edit,
        });

        if applied.completed_order {
            self.stats.orders_completed += 1;
            self.power_up.record_manual_completion(&self.tuning);
            self.emit(GameEvent::OrderCompleted {
                order_id,
                auto: false,
            });
        }
        Ok(applied)
    }

    /// Drop the carried head edit
    pub fn discard(&mut self) -> Option<EditType> {
        let edit = matching::discard(&mut self.player.carried)?;
        self.emit(GameEvent::EditDiscarded { edit });
        Some(edit)
    }

    /// Turn the power-up on
    pub fn activate_power_up(&mut self) -> Result<(), ActionRejected> {
        self.power_up.activate(&self.tuning)?;
        self.emit(GameEvent::PowerUpActivated);
        self.notify("Auto-complete on!", false);
        Ok(())
    }

    /// Advance the power-up countdown
    pub fn tick_power_up(&mut self, dt: f32) {
        if let Some(done) = self.power_up.tick(dt, &self.tuning) {
            self.emit(GameEvent::PowerUpDeactivated {
                used: done.used_count,
            });
            self.refresh_difficulty();
        }
    }

    /// Unlock the next station if the edit count calls for it
    pub fn check_station_unlock(&mut self) {
        if let Some(edit) = self.stations.check_unlock(self.tuning.edits_per_unlock) {
            self.on_station_unlocked(edit);
        }
    }

    fn on_station_unlocked(&mut self, edit: EditType) {
        self.refresh_difficulty();
        self.notify(format!("New station: {}", edit.as_str()), false);
        self.emit(GameEvent::StationUnlocked { edit });
    }

    /// Debug: open every station
    pub fn unlock_all_stations(&mut self) {
        for edit in self.stations.unlock_all() {
            self.on_station_unlocked(edit);
        }
    }

    /// Debug: make the power-up ready if it could become ready
    pub fn force_power_up_available(&mut self) {
        if self.power_up.force_available() {
            self.emit(GameEvent::PowerUpAvailable);
        }
    }

    /// Debug: (re)start the tutorial from step 0
    pub fn force_tutorial_start(&mut self) {
        self.tutorial = Tutorial::start();
        self.emit(GameEvent::TutorialStep { step: 0 });
    }

    /// Persistable unlock state
    pub fn unlock_record(&self, tutorial_completed: bool) -> UnlockRecord {
        self.stations.to_record(tutorial_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn new_state() -> GameState {
        GameState::new(1, Tuning::default(), &UnlockRecord::first_station_only(), false)
    }

    #[test]
    fn test_new_state() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives.remaining(), STARTING_LIVES);
        assert_eq!(state.stations.unlocked_count(), 1);
        assert!(state.orders().is_empty());
        assert!(!state.tutorial.active);
    }

    #[test]
    fn test_spawn_during_power_up_auto_completes() {
        let mut state = new_state();
        state.force_power_up_available();
        state.activate_power_up().unwrap();
        state.drain_events();

        let id = state.spawn_order().unwrap();
        let order = &state.orders()[0];
        assert_eq!(order.id, id);
        assert!(order.created_during_power_up);
        assert!(order.is_complete());
        assert_eq!(state.score, 10);
        assert!(state.drain_events().contains(&GameEvent::OrderCompleted { order_id: id, auto: true }));
    }

    #[test]
    fn test_apply_scores_and_completes() {
        let mut state = new_state();
        let id = state.spawn_order().unwrap();
        state.pickup(EditType::Address).unwrap();
        let applied = state.apply_to_order(id).unwrap();
        assert!(applied.completed_order);
        assert_eq!(state.score, 10);
        assert_eq!(state.stations.total_edits(), 1);
        assert_eq!(state.power_up.progress, 1);
        assert_eq!(state.stats.orders_completed, 1);
    }

    #[test]
    fn test_game_over_emitted_once() {
        let mut state = new_state();
        for _ in 0..5 {
            state.lose_life();
        }
        let game_overs = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert!(state.is_game_over());
        assert_eq!(state.lives.remaining(), 0);
    }

    #[test]
    fn test_no_exit_bonus_after_game_over() {
        let mut state = new_state();
        state.lose_life();
        state.lose_life();
        state.drain_events();

        let exit_x = SCREEN_WIDTH + EXIT_MARGIN + 1.0;
        state.conveyor.push(Order::new(90, vec![EditType::Address], exit_x));
        let mut done = Order::new(91, vec![EditType::Address], exit_x);
        done.auto_complete();
        state.conveyor.push(done);

        state.retire_orders();

        let events = state.drain_events();
        assert!(state.is_game_over());
        assert!(events.contains(&GameEvent::GameOver { final_score: 0 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ScoreChanged { .. })));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_feedback_fades() {
        let mut state = new_state();
        state.reject(ActionRejected::HandsFull);
        assert!(state.feedback.as_ref().is_some_and(|f| f.is_error));
        state.tick_feedback(state.tuning.feedback_duration + 0.01);
        assert!(state.feedback.is_none());
    }
}
