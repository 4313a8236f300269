//! End-to-end gameplay scenarios through the public API

use order_fix::consts::*;
use order_fix::persistence::UnlockRecord;
use order_fix::sim::collision::power_up_pad_pos;
use order_fix::sim::{
    ActionRejected, EditType, GameEvent, GamePhase, GameState, Order, PowerUpPhase, TickInput,
    tick,
};
use order_fix::tuning::Tuning;

fn fresh_game(tutorial: bool) -> GameState {
    GameState::new(2024, Tuning::default(), &UnlockRecord::first_station_only(), tutorial)
}

/// Put a single-edit Address order mid-belt and fix it by hand
fn fix_address_order(state: &mut GameState, order_id: u32) {
    state
        .conveyor
        .push(Order::new(order_id, vec![EditType::Address], 400.0));
    state.pickup(EditType::Address).unwrap();
    let applied = state.apply_to_order(order_id).unwrap();
    assert!(applied.completed_order);
}

fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

#[test]
fn test_five_edits_unlock_second_station_once() {
    let mut state = fresh_game(false);
    let base_speed = state.difficulty.conveyor_speed;

    for id in 100..104 {
        fix_address_order(&mut state, id);
        state.check_station_unlock();
    }
    assert_eq!(state.stations.unlocked_count(), 1);

    fix_address_order(&mut state, 104);
    state.check_station_unlock();
    state.check_station_unlock();

    let events = state.drain_events();
    assert_eq!(
        count(&events, |e| matches!(e, GameEvent::StationUnlocked { .. })),
        1
    );
    assert!(events.contains(&GameEvent::StationUnlocked {
        edit: EditType::Quantity
    }));
    assert_eq!(
        state.stations.unlocked_types(),
        vec![EditType::Address, EditType::Quantity]
    );
    assert!((state.difficulty.conveyor_speed - base_speed * 1.08).abs() < 1e-3);
    assert_eq!(state.score, 50);
}

#[test]
fn test_fourth_pickup_is_refused() {
    let mut state = fresh_game(false);
    state.unlock_all_stations();

    for edit in [EditType::Address, EditType::Quantity, EditType::Discount] {
        state.pickup(edit).unwrap();
    }
    assert_eq!(state.pickup(EditType::Product), Err(ActionRejected::HandsFull));
    assert_eq!(state.player.carried.len(), MAX_CARRIED_EDITS);
    assert_eq!(state.player.carried.head(), Some(EditType::Address));
}

#[test]
fn test_power_up_cycle() {
    let mut state = fresh_game(false);

    for id in 100..109 {
        fix_address_order(&mut state, id);
    }
    assert!(!state.power_up.is_available());
    fix_address_order(&mut state, 109);
    assert!(state.power_up.is_available());
    assert!(state.drain_events().contains(&GameEvent::PowerUpAvailable));

    state.activate_power_up().unwrap();
    let score_before = state.score;
    let id = state.spawn_order().unwrap();
    let order = state.orders().iter().find(|o| o.id == id).unwrap();
    assert!(order.is_complete());
    assert!(order.created_during_power_up);
    assert_eq!(
        state.score - score_before,
        order.types().len() as u64 * Tuning::default().points_per_edit
    );

    // Manual edits while active don't build toward the next one
    fix_address_order(&mut state, 200);
    assert_eq!(state.power_up.progress, 10);

    state.tick_power_up(Tuning::default().power_up_duration);
    assert_eq!(state.power_up.phase, PowerUpPhase::Idle);
    assert_eq!(state.power_up.used_count, 1);
    assert_eq!(state.power_up.requirement, 20);
    assert_eq!(state.power_up.progress, 0);
    assert!(state
        .drain_events()
        .contains(&GameEvent::PowerUpDeactivated { used: 1 }));
}

#[test]
fn test_half_fixed_order_costs_a_life() {
    let mut state = fresh_game(false);
    state.unlock_all_stations();
    state.conveyor.push(Order::new(
        300,
        vec![EditType::Address, EditType::Quantity],
        SCREEN_WIDTH + EXIT_MARGIN - 0.5,
    ));
    state.pickup(EditType::Address).unwrap();
    state.apply_to_order(300).unwrap();
    let score = state.score;
    state.drain_events();

    tick(&mut state, &TickInput::default(), SIM_DT);

    let events = state.drain_events();
    assert!(events.contains(&GameEvent::OrderExited {
        order_id: 300,
        complete: false
    }));
    assert!(events.contains(&GameEvent::LifeLost { remaining: 2 }));
    assert_eq!(count(&events, |e| matches!(e, GameEvent::ScoreChanged { .. })), 0);
    assert_eq!(state.score, score);
    assert_eq!(state.lives.remaining(), 2);
    assert!(state.orders().is_empty());
}

#[test]
fn test_finished_order_pays_exit_bonus() {
    let mut state = fresh_game(false);
    state.conveyor.push(Order::new(
        301,
        vec![EditType::Address],
        SCREEN_WIDTH + EXIT_MARGIN - 0.5,
    ));
    state.pickup(EditType::Address).unwrap();
    state.apply_to_order(301).unwrap();

    tick(&mut state, &TickInput::default(), SIM_DT);

    assert_eq!(state.score, 10 + Tuning::default().exit_bonus);
    assert_eq!(state.lives.remaining(), STARTING_LIVES);
}

#[test]
fn test_tutorial_advances_once_on_movement() {
    let mut state = fresh_game(true);
    let input = TickInput {
        right: true,
        ..Default::default()
    };

    let mut steps = 0;
    for _ in 0..30 {
        tick(&mut state, &input, SIM_DT);
        steps += count(&state.drain_events(), |e| {
            matches!(e, GameEvent::TutorialStep { step: 1 })
        });
    }
    assert_eq!(steps, 1);
    assert_eq!(state.tutorial.step, 1);
    assert!(state.tutorial.active);
}

#[test]
fn test_action_at_station_then_order() {
    let mut state = fresh_game(false);
    let station = state.stations.get(EditType::Address).pos;
    state.player.pos = station;

    let press = TickInput {
        action: true,
        ..Default::default()
    };
    tick(&mut state, &press, SIM_DT);
    assert_eq!(state.player.carried.head(), Some(EditType::Address));

    state
        .conveyor
        .push(Order::new(400, vec![EditType::Address], 600.0));
    state.player.pos = state.orders()[0].pos();
    tick(&mut state, &press, SIM_DT);

    assert!(state.player.carried.is_empty());
    assert!(state.orders()[0].is_complete());
    assert_eq!(state.score, 10);
}

#[test]
fn test_pad_refuses_until_ready() {
    let mut state = fresh_game(false);
    state.player.pos = power_up_pad_pos();
    let press = TickInput {
        action: true,
        ..Default::default()
    };

    tick(&mut state, &press, SIM_DT);
    assert!(state.drain_events().contains(&GameEvent::ActionRejected {
        reason: ActionRejected::PowerUpNotReady
    }));
    assert!(state.feedback.as_ref().is_some_and(|f| f.is_error));

    state.force_power_up_available();
    tick(&mut state, &press, SIM_DT);
    assert!(state.power_up.is_active());
}

#[test]
fn test_first_order_spawns_after_initial_delay() {
    let mut state = fresh_game(false);
    let input = TickInput::default();
    let initial = Tuning::default().initial_spawn_delay;

    let mut t = 0.0;
    while t + SIM_DT < initial - 0.05 {
        tick(&mut state, &input, SIM_DT);
        t += SIM_DT;
    }
    assert!(state.orders().is_empty());

    for _ in 0..10 {
        tick(&mut state, &input, SIM_DT);
    }
    assert_eq!(state.orders().len(), 1);
    assert_eq!(state.orders()[0].types(), &[EditType::Address]);
}

#[test]
fn test_three_misses_end_the_game() {
    let mut state = fresh_game(false);
    for i in 0..4 {
        state.conveyor.push(Order::new(
            500 + i,
            vec![EditType::Address],
            SCREEN_WIDTH + EXIT_MARGIN - 0.5,
        ));
    }

    tick(&mut state, &TickInput::default(), SIM_DT);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.lives.remaining(), 0);
    let events = state.drain_events();
    assert_eq!(count(&events, |e| matches!(e, GameEvent::GameOver { .. })), 1);

    // Terminal: nothing moves afterwards
    let before = state.stats.play_time;
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(state.stats.play_time, before);
    assert!(state.drain_events().is_empty());
}
