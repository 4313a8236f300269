//! Demo autopilot
//!
//! Plays the game for attract mode and the headless runner. It only produces
//! input; every decision goes through the normal tick.

use glam::Vec2;

use super::collision::{
    near_power_up_pad, nearest_station, overlapping_orders, player_overlaps_order,
    power_up_pad_pos,
};
use super::order::Order;
use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Within this distance the autopilot stops steering
const ARRIVE_DISTANCE: f32 = 4.0;

/// Overwrite movement and action in `input` with the autopilot's choice
pub fn steer(state: &GameState, input: &mut TickInput) {
    let (target, press) = choose(state);
    let delta = target - state.player.pos;
    input.left = delta.x < -ARRIVE_DISTANCE;
    input.right = delta.x > ARRIVE_DISTANCE;
    input.up = delta.y < -ARRIVE_DISTANCE;
    input.down = delta.y > ARRIVE_DISTANCE;
    input.action = press;
}

/// Where to walk and whether to press action this tick
fn choose(state: &GameState) -> (Vec2, bool) {
    let pos = state.player.pos;
    let carried = &state.player.carried;
    let rest = Vec2::new(PLAYER_START_X, PLAYER_START_Y);

    if state.power_up.is_available() {
        return (power_up_pad_pos(), near_power_up_pad(pos));
    }

    // Orders still worth chasing, front-most first
    let mut open: Vec<&Order> = state
        .orders()
        .iter()
        .filter(|o| !o.is_complete() && o.x > 0.0 && o.x < SCREEN_WIDTH - ORDER_WIDTH)
        .collect();
    open.sort_by(|a, b| b.x.partial_cmp(&a.x).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(head) = carried.head() {
        if let Some(order) = open.iter().find(|o| o.needs(head)) {
            // Aim slightly ahead of the order since it keeps moving
            let lead = Vec2::new(ORDER_WIDTH / 4.0, 0.0);
            return (order.pos() + lead, player_overlaps_order(pos, order));
        }
        // Nobody needs the head: drop it somewhere clear
        let clear = nearest_station(pos, &state.stations).is_none()
            && overlapping_orders(pos, state.orders()).is_empty()
            && !near_power_up_pad(pos);
        return (rest, clear);
    }

    for order in &open {
        for edit in order.remaining() {
            if carried.contains(edit) || !state.stations.is_unlocked(edit) {
                continue;
            }
            let station = state.stations.get(edit);
            let here = nearest_station(pos, &state.stations).map(|s| s.edit) == Some(edit);
            return (station.pos, here);
        }
    }

    (rest, false)
}
