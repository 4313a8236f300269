//! Data-driven game balance
//!
//! Every number here can be overridden from a JSON file; missing fields keep
//! their defaults. Times are in seconds, speeds in pixels per second.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {detail}")]
    Invalid { field: &'static str, detail: String },
}

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    /// Delay before the first order and between orders at minimum difficulty
    pub initial_spawn_delay: f32,
    /// Retry delay when the spawn buffer is occupied
    pub spawn_retry_delay: f32,
    /// Spawn delay never drops below this
    pub min_spawn_delay: f32,
    /// Spawn delay multiplier per unlocked station beyond the first
    pub spawn_delay_unlock_factor: f32,
    /// Spawn delay multiplier per power-up used
    pub spawn_delay_power_up_factor: f32,

    // === Conveyor ===
    pub base_conveyor_speed: f32,
    /// Speed multiplier per unlocked station beyond the first
    pub conveyor_speed_multiplier: f32,
    pub max_conveyor_speed: f32,

    // === Scoring ===
    pub points_per_edit: u64,
    /// Bonus when a completed order leaves the conveyor
    pub exit_bonus: u64,

    // === Progression ===
    /// Successful edits between station unlocks
    pub edits_per_unlock: u32,

    // === Power-up ===
    pub power_up_base_requirement: u32,
    pub power_up_max_requirement: u32,
    pub power_up_duration: f32,
    /// Manual order completions that start accumulation
    pub manual_completion_threshold: u32,

    // === Presentation timing ===
    /// How long rejection/notice messages stay up
    pub feedback_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_spawn_delay: 5.0,
            spawn_retry_delay: 0.5,
            min_spawn_delay: 2.0,
            spawn_delay_unlock_factor: 0.9,
            spawn_delay_power_up_factor: 0.95,

            base_conveyor_speed: 60.0,
            conveyor_speed_multiplier: 1.08,
            max_conveyor_speed: 140.0,

            points_per_edit: 10,
            exit_bonus: 5,

            edits_per_unlock: 5,

            power_up_base_requirement: 10,
            power_up_max_requirement: 80,
            power_up_duration: 30.0,
            manual_completion_threshold: 10,

            feedback_duration: 1.5,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("initial_spawn_delay", self.initial_spawn_delay),
            ("spawn_retry_delay", self.spawn_retry_delay),
            ("min_spawn_delay", self.min_spawn_delay),
            ("spawn_delay_unlock_factor", self.spawn_delay_unlock_factor),
            ("spawn_delay_power_up_factor", self.spawn_delay_power_up_factor),
            ("base_conveyor_speed", self.base_conveyor_speed),
            ("conveyor_speed_multiplier", self.conveyor_speed_multiplier),
            ("max_conveyor_speed", self.max_conveyor_speed),
            ("power_up_duration", self.power_up_duration),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    detail: format!("must be positive, got {value}"),
                });
            }
        }
        if self.edits_per_unlock == 0 {
            return Err(TuningError::Invalid {
                field: "edits_per_unlock",
                detail: "must be at least 1".to_string(),
            });
        }
        if self.power_up_base_requirement == 0
            || self.power_up_max_requirement < self.power_up_base_requirement
        {
            return Err(TuningError::Invalid {
                field: "power_up_max_requirement",
                detail: format!(
                    "requirements must satisfy 0 < base ({}) <= max ({})",
                    self.power_up_base_requirement, self.power_up_max_requirement
                ),
            });
        }
        Ok(())
    }

    /// Power-up cost after `used` activations
    pub fn power_up_requirement(&self, used: u32) -> u32 {
        let scaled = self
            .power_up_base_requirement
            .saturating_mul(2u32.saturating_pow(used));
        scaled.min(self.power_up_max_requirement)
    }
}
