//! Power-up economy
//!
//! `Idle -> Accumulating -> Available -> Active -> Idle | Exhausted`.
//! Each activation doubles the next requirement (capped) and after
//! `MAX_POWER_UPS` uses the power-up is gone for the session.

use serde::{Deserialize, Serialize};

use super::events::ActionRejected;
use crate::consts::MAX_POWER_UPS;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpPhase {
    Idle,
    Accumulating,
    Available,
    Active,
    /// All uses spent; nothing accrues until a full reset
    Exhausted,
}

/// Outcome of a countdown expiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deactivated {
    pub used_count: u32,
    pub exhausted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub phase: PowerUpPhase,
    /// Edits counted toward the next activation
    pub progress: u32,
    pub requirement: u32,
    pub used_count: u32,
    /// Seconds left while active
    pub remaining: f32,
    /// Orders completed by hand since the last deactivation
    pub manual_orders_completed: u32,
}

impl PowerUp {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: PowerUpPhase::Idle,
            progress: 0,
            requirement: tuning.power_up_requirement(0),
            used_count: 0,
            remaining: 0.0,
            manual_orders_completed: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.phase == PowerUpPhase::Available
    }

    pub fn is_active(&self) -> bool {
        self.phase == PowerUpPhase::Active
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == PowerUpPhase::Exhausted
    }

    fn accrues(&self) -> bool {
        matches!(self.phase, PowerUpPhase::Idle | PowerUpPhase::Accumulating)
            && self.used_count < MAX_POWER_UPS
    }

    /// One manual edit landed. Returns true if the power-up just became available.
    pub fn record_edit_progress(&mut self) -> bool {
        if !self.accrues() {
            return false;
        }
        self.progress = (self.progress + 1).min(self.requirement);
        self.phase = PowerUpPhase::Accumulating;
        self.check_available()
    }

    /// One order completed by hand
    pub fn record_manual_completion(&mut self, tuning: &Tuning) {
        if !self.accrues() {
            return;
        }
        self.manual_orders_completed += 1;
        if self.phase == PowerUpPhase::Idle
            && self.manual_orders_completed >= tuning.manual_completion_threshold
        {
            self.phase = PowerUpPhase::Accumulating;
        }
    }

    fn check_available(&mut self) -> bool {
        if self.progress >= self.requirement {
            self.phase = PowerUpPhase::Available;
            log::info!("Power-up available (use {} of {})", self.used_count + 1, MAX_POWER_UPS);
            true
        } else {
            false
        }
    }

    /// Start the countdown
    pub fn activate(&mut self, tuning: &Tuning) -> Result<(), ActionRejected> {
        if !self.is_available() {
            return Err(ActionRejected::PowerUpNotReady);
        }
        self.phase = PowerUpPhase::Active;
        self.remaining = tuning.power_up_duration;
        log::info!("Power-up activated for {}s", tuning.power_up_duration);
        Ok(())
    }

    /// Advance the countdown. Returns the deactivation when it hits zero.
    pub fn tick(&mut self, dt: f32, tuning: &Tuning) -> Option<Deactivated> {
        if !self.is_active() {
            return None;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining > 0.0 {
            return None;
        }

        self.used_count = (self.used_count + 1).min(MAX_POWER_UPS);
        self.progress = 0;
        self.manual_orders_completed = 0;
        let exhausted = self.used_count >= MAX_POWER_UPS;
        if exhausted {
            self.phase = PowerUpPhase::Exhausted;
        } else {
            self.phase = PowerUpPhase::Idle;
            self.requirement = tuning.power_up_requirement(self.used_count);
        }
        log::info!(
            "Power-up ended: used {}/{}, next requirement {}",
            self.used_count,
            MAX_POWER_UPS,
            if exhausted { 0 } else { self.requirement }
        );
        Some(Deactivated {
            used_count: self.used_count,
            exhausted,
        })
    }

    /// Debug: fill progress so the power-up is ready now.
    /// Only valid where progress could legitimately accrue.
    pub fn force_available(&mut self) -> bool {
        if !self.accrues() {
            return false;
        }
        self.progress = self.requirement;
        self.check_available()
    }
}
