//! Simulation tick
//!
//! One call advances every component in a fixed order:
//! input, movement/collision, conveyor and orders, power-up countdown,
//! station unlock, tutorial.

use glam::Vec2;

use super::autopilot;
use super::collision::{near_power_up_pad, nearest_station, overlapping_orders};
use super::conveyor::SpawnBlocked;
use super::events::GameEvent;
use super::matching;
use super::state::GameState;
use super::tutorial::{TutorialObservation, TutorialProgress};

/// Debug/test inputs. They go through the normal state operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugInput {
    pub unlock_all: bool,
    pub power_up_available: bool,
    pub reduce_lives: bool,
    pub start_tutorial: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held movement keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Context action: pickup / apply / discard / activate (one-shot)
    pub action: bool,
    /// Power-up button (one-shot)
    pub activate_power_up: bool,
    /// Skip the tutorial (one-shot)
    pub skip_tutorial: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
    /// One-shot debug commands
    pub debug: DebugInput,
}

impl TickInput {
    /// Movement direction, y down
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    /// Carry over presses from `older` that no tick has consumed yet
    pub fn merge_one_shots(&mut self, older: &TickInput) {
        self.action |= older.action;
        self.activate_power_up |= older.activate_power_up;
        self.skip_tutorial |= older.skip_tutorial;
        self.debug.unlock_all |= older.debug.unlock_all;
        self.debug.power_up_available |= older.debug.power_up_available;
        self.debug.reduce_lives |= older.debug.reduce_lives;
        self.debug.start_tutorial |= older.debug.start_tutorial;
    }

    /// Forget presses that should only fire once
    pub fn clear_one_shots(&mut self) {
        self.action = false;
        self.activate_power_up = false;
        self.skip_tutorial = false;
        self.debug = DebugInput::default();
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Game over is terminal
    if state.is_game_over() {
        return;
    }

    state.stats.play_time += dt;
    state.tick_feedback(dt);

    // --- Input (skipped entirely while an overlay has inputs disabled) ---
    let mut obs = TutorialObservation::default();
    if state.inputs_disabled {
        state.player.moving = false;
    } else {
        let mut input = input.clone();
        if input.idle_mode {
            autopilot::steer(state, &mut input);
        }

        apply_debug(state, input.debug);
        if state.is_game_over() {
            return;
        }

        obs.skip = input.skip_tutorial;
        obs.moved = state.player.step(input.direction(), dt);

        if input.activate_power_up {
            if let Err(reason) = state.activate_power_up() {
                state.reject(reason);
            }
        }
        if input.action {
            obs.action_pressed = true;
            handle_action(state, &mut obs);
        }
    }

    // --- Conveyor ---
    let speed = state.difficulty.conveyor_speed;
    state.conveyor.advance(speed, dt);
    for order_id in state.conveyor.take_comments() {
        state.emit(GameEvent::OrderComment { order_id });
    }
    state.retire_orders();
    if state.is_game_over() {
        return;
    }
    run_spawner(state, dt);

    // --- Power-up countdown ---
    state.tick_power_up(dt);

    // --- Progression ---
    state.check_station_unlock();

    // --- Tutorial ---
    let progress = state.tutorial.update(
        obs,
        &state.stations,
        &state.conveyor.orders,
        &state.player.carried,
    );
    match progress {
        TutorialProgress::Unchanged => {}
        TutorialProgress::Advanced(step) => state.emit(GameEvent::TutorialStep { step }),
        TutorialProgress::Completed => state.emit(GameEvent::TutorialCompleted),
    }
}

fn apply_debug(state: &mut GameState, debug: DebugInput) {
    if debug.unlock_all {
        log::info!("Debug: unlocking all stations");
        state.unlock_all_stations();
    }
    if debug.power_up_available {
        log::info!("Debug: forcing power-up");
        state.force_power_up_available();
    }
    if debug.reduce_lives {
        log::info!("Debug: losing a life");
        state.lose_life();
    }
    if debug.start_tutorial {
        log::info!("Debug: starting tutorial");
        state.force_tutorial_start();
    }
}

/// Resolve the context-sensitive action key
fn handle_action(state: &mut GameState, obs: &mut TutorialObservation) {
    let pos = state.player.pos;

    if near_power_up_pad(pos) {
        if let Err(reason) = state.activate_power_up() {
            state.reject(reason);
        }
        return;
    }

    if let Some(edit) = nearest_station(pos, &state.stations).map(|s| s.edit) {
        match state.pickup(edit) {
            Ok(_) => obs.picked_up = true,
            Err(reason) => state.reject(reason),
        }
        return;
    }

    let hits = overlapping_orders(pos, state.orders());
    if hits.is_empty() {
        state.discard();
        return;
    }

    // Front-most order that accepts the head edit; otherwise report why the
    // front-most one refused it
    let mut target = None;
    let mut first_rejection = None;
    for &i in &hits {
        let order = &state.orders()[i];
        match matching::check_apply(&state.player.carried, order) {
            Ok(_) => {
                target = Some(order.id);
                break;
            }
            Err(reason) => {
                first_rejection.get_or_insert(reason);
            }
        }
    }

    match (target, first_rejection) {
        (Some(order_id), _) => match state.apply_to_order(order_id) {
            Ok(_) => obs.applied = true,
            Err(reason) => state.reject(reason),
        },
        (None, Some(reason)) => state.reject(reason),
        (None, None) => {}
    }
}

/// Count down to the next order; re-arm according to what happened
fn run_spawner(state: &mut GameState, dt: f32) {
    if !state.conveyor.spawn_due(dt) {
        return;
    }
    state.conveyor.spawn_timer = match state.spawn_order() {
        Ok(_) => state.difficulty.spawn_delay,
        Err(SpawnBlocked::NoStations) => {
            log::debug!("Spawn skipped: no stations unlocked");
            state.difficulty.spawn_delay
        }
        Err(SpawnBlocked::BufferOccupied) => state.tuning.spawn_retry_delay,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::UnlockRecord;
    use crate::sim::edit::EditType;
    use crate::sim::order::Order;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;

    fn new_state(tutorial: bool) -> GameState {
        GameState::new(12345, Tuning::default(), &UnlockRecord::first_station_only(), tutorial)
    }

    fn press() -> TickInput {
        TickInput {
            action: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_direction() {
        let input = TickInput {
            up: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(1.0, -1.0));
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_first_order_after_initial_delay() {
        let mut state = new_state(false);
        let idle = TickInput::default();
        let steps = (state.tuning.initial_spawn_delay / SIM_DT) as usize;
        for _ in 0..steps - 2 {
            tick(&mut state, &idle, SIM_DT);
        }
        assert!(state.orders().is_empty());
        for _ in 0..4 {
            tick(&mut state, &idle, SIM_DT);
        }
        assert_eq!(state.orders().len(), 1);
        assert_eq!(state.orders()[0].types(), &[EditType::Address]);
    }

    #[test]
    fn test_pickup_and_apply_via_action_key() {
        let mut state = new_state(false);
        state.player.pos = state.stations.get(EditType::Address).pos;
        tick(&mut state, &press(), SIM_DT);
        assert_eq!(state.player.carried.head(), Some(EditType::Address));

        state
            .conveyor
            .push(Order::new(99, vec![EditType::Address], 600.0));
        state.player.pos = Vec2::new(600.0, CONVEYOR_Y);
        tick(&mut state, &press(), SIM_DT);
        assert!(state.player.carried.is_empty());
        assert!(state.orders()[0].is_complete());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_wrong_edit_is_rejected_not_consumed() {
        let mut state = new_state(false);
        state.unlock_all_stations();
        state.player.pos = state.stations.get(EditType::Cancel).pos;
        tick(&mut state, &press(), SIM_DT);

        state
            .conveyor
            .push(Order::new(99, vec![EditType::Address], 600.0));
        state.player.pos = Vec2::new(600.0, CONVEYOR_Y);
        state.drain_events();
        tick(&mut state, &press(), SIM_DT);

        assert_eq!(state.player.carried.head(), Some(EditType::Cancel));
        assert!(state.orders()[0].completed().is_empty());
        assert!(state.pending_events().iter().any(|e| matches!(
            e,
            GameEvent::ActionRejected { .. }
        )));
        assert!(state.feedback.is_some());
    }

    #[test]
    fn test_discard_in_open_space() {
        let mut state = new_state(false);
        state.player.pos = state.stations.get(EditType::Address).pos;
        tick(&mut state, &press(), SIM_DT);
        state.player.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        tick(&mut state, &press(), SIM_DT);
        assert!(state.player.carried.is_empty());
    }

    #[test]
    fn test_inputs_disabled_still_moves_conveyor() {
        let mut state = new_state(false);
        state
            .conveyor
            .push(Order::new(99, vec![EditType::Address], 100.0));
        state.inputs_disabled = true;
        let start = state.player.pos;
        let input = TickInput {
            right: true,
            action: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.5);
        assert_eq!(state.player.pos, start);
        assert!(state.orders()[0].x > 100.0);
    }

    #[test]
    fn test_inputs_disabled_still_counts_down_power_up() {
        let mut state = new_state(false);
        state.force_power_up_available();
        state.activate_power_up().unwrap();
        state.inputs_disabled = true;
        tick(&mut state, &TickInput::default(), 10.0);
        assert!((state.power_up.remaining - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_debug_reduce_lives_reaches_game_over() {
        let mut state = new_state(false);
        let input = TickInput {
            debug: DebugInput {
                reduce_lives: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives.remaining(), 0);
    }

    #[test]
    fn test_tutorial_steps_through_play() {
        let mut state = new_state(true);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, SIM_DT);
        assert_eq!(state.tutorial.step, 1);

        state.player.pos = state.stations.get(EditType::Address).pos;
        tick(&mut state, &press(), SIM_DT);
        assert_eq!(state.tutorial.step, 2);

        state
            .conveyor
            .push(Order::new(99, vec![EditType::Address], 600.0));
        state.player.pos = Vec2::new(600.0, CONVEYOR_Y);
        tick(&mut state, &press(), SIM_DT);
        assert_eq!(state.tutorial.step, 3);

        tick(&mut state, &press(), SIM_DT);
        assert!(!state.tutorial.active);
        assert!(state.pending_events().contains(&GameEvent::TutorialCompleted));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(false);
        let mut state2 = new_state(false);
        state1.unlock_all_stations();
        state2.unlock_all_stations();
        let input = TickInput::default();
        for _ in 0..(60 * 60) {
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }
        let types = |s: &GameState| s.orders().iter().map(|o| o.types().to_vec()).collect::<Vec<_>>();
        assert!(!state1.orders().is_empty());
        assert_eq!(types(&state1), types(&state2));
        assert_eq!(state1.lives, state2.lives);
    }
}
