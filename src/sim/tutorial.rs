//! First-run tutorial
//!
//! A strictly linear guide. It reads what the player did this tick and the
//! shared world, and only ever changes its own fields.

use serde::{Deserialize, Serialize};

use super::edit::CarriedEdits;
use super::order::Order;
use super::stations::Stations;

/// Final step; reaching it completes the tutorial
pub const TUTORIAL_DONE_STEP: u8 = 4;

/// What the tutorial is pointing at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Highlight {
    Station(super::edit::EditType),
    Order(u32),
}

/// Player actions observed during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TutorialObservation {
    pub moved: bool,
    pub picked_up: bool,
    pub applied: bool,
    pub action_pressed: bool,
    pub skip: bool,
}

/// Result of one tutorial update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialProgress {
    Unchanged,
    Advanced(u8),
    Completed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tutorial {
    pub active: bool,
    pub step: u8,
    pub highlight: Option<Highlight>,
}

impl Tutorial {
    /// First run only: no completion record and not a same-game restart
    pub fn should_start(completed_before: bool, is_restart: bool) -> bool {
        !completed_before && !is_restart
    }

    pub fn start() -> Self {
        log::info!("Tutorial started");
        Self {
            active: true,
            step: 0,
            highlight: None,
        }
    }

    pub fn inactive() -> Self {
        Self::default()
    }

    /// Hint text for the current step
    pub fn prompt(&self) -> Option<&'static str> {
        if !self.active {
            return None;
        }
        Some(match self.step {
            0 => "Use the arrow keys to move",
            1 => "Walk to a station and press action to pick up an edit",
            2 => "Carry the edit to an order that needs it and press action",
            3 => "Orders need every edit before they leave. Press action to start!",
            _ => "",
        })
    }

    /// Advance at most one step per tick
    pub fn update(
        &mut self,
        obs: TutorialObservation,
        stations: &Stations,
        orders: &[Order],
        carried: &CarriedEdits,
    ) -> TutorialProgress {
        if !self.active {
            return TutorialProgress::Unchanged;
        }
        if obs.skip {
            log::info!("Tutorial skipped at step {}", self.step);
            return self.complete();
        }

        let advance = match self.step {
            0 => obs.moved,
            1 => obs.picked_up,
            2 => obs.applied,
            // Entered on an action press, so this needs a later one
            3 => obs.action_pressed,
            _ => false,
        };

        let progress = if advance {
            self.step += 1;
            if self.step >= TUTORIAL_DONE_STEP {
                return self.complete();
            }
            TutorialProgress::Advanced(self.step)
        } else {
            TutorialProgress::Unchanged
        };

        self.highlight = self.pick_highlight(stations, orders, carried);
        progress
    }

    fn complete(&mut self) -> TutorialProgress {
        self.step = TUTORIAL_DONE_STEP;
        self.active = false;
        self.highlight = None;
        log::info!("Tutorial completed");
        TutorialProgress::Completed
    }

    fn pick_highlight(
        &self,
        stations: &Stations,
        orders: &[Order],
        carried: &CarriedEdits,
    ) -> Option<Highlight> {
        match self.step {
            1 => stations
                .iter()
                .find(|s| s.unlocked)
                .map(|s| Highlight::Station(s.edit)),
            2 => {
                let wanted = carried.head();
                orders
                    .iter()
                    .filter(|o| !o.is_complete())
                    .find(|o| wanted.is_none_or(|e| o.needs(e)))
                    .map(|o| Highlight::Order(o.id))
            }
            _ => None,
        }
    }
}
