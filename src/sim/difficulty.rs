//! Difficulty derived from progression
//!
//! Nothing here is set directly: every value is recomputed from the number of
//! unlocked stations and power-ups used.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Edit-count weights (percent) keyed by unlocked station count.
/// Index `i` is the weight for `i + 1` edits.
const EDIT_COUNT_WEIGHTS: [&[u32]; 5] = [
    &[100],
    &[70, 30],
    &[0, 60, 40],
    &[0, 0, 50, 50],
    &[0, 0, 40, 35, 25],
];

/// Weight row for the given number of unlocked stations
pub fn edit_count_weights(unlocked: usize) -> &'static [u32] {
    let row = unlocked.clamp(1, EDIT_COUNT_WEIGHTS.len()) - 1;
    EDIT_COUNT_WEIGHTS[row]
}

/// Roll how many edits a new order needs, clamped to `unique_types`
pub fn roll_edit_count<R: Rng + ?Sized>(rng: &mut R, unlocked: usize, unique_types: usize) -> usize {
    let weights = edit_count_weights(unlocked);
    let total: u32 = weights.iter().sum();
    let mut roll = rng.random_range(0..total);
    let mut count = weights.len();
    for (i, &w) in weights.iter().enumerate() {
        if roll < w {
            count = i + 1;
            break;
        }
        roll -= w;
    }
    count.min(unique_types).max(1)
}

/// Current difficulty values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Pixels per second
    pub conveyor_speed: f32,
    /// Seconds between spawns
    pub spawn_delay: f32,
    /// Weights used for the next spawn
    pub edit_count_weights: Vec<u32>,
}

impl Difficulty {
    pub fn derive(unlocked: usize, power_ups_used: u32, tuning: &Tuning) -> Self {
        let steps = unlocked.saturating_sub(1) as i32;
        let conveyor_speed = (tuning.base_conveyor_speed
            * tuning.conveyor_speed_multiplier.powi(steps))
        .min(tuning.max_conveyor_speed);

        let spawn_delay = (tuning.initial_spawn_delay
            * tuning.spawn_delay_unlock_factor.powi(steps)
            * tuning.spawn_delay_power_up_factor.powi(power_ups_used as i32))
        .max(tuning.min_spawn_delay);

        Self {
            conveyor_speed,
            spawn_delay,
            edit_count_weights: edit_count_weights(unlocked).to_vec(),
        }
    }
}
