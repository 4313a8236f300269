//! Orders riding the conveyor

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::edit::EditType;
use super::events::ActionRejected;
use crate::consts::*;

/// An order on the conveyor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    /// Required edits, unique, in generation order
    types: Vec<EditType>,
    /// Edits already applied (always a subset of `types`)
    completed: Vec<EditType>,
    /// Position along the conveyor axis
    pub x: f32,
    pub created_during_power_up: bool,
    pub has_shown_comment: bool,
}

impl Order {
    /// `types` must be non-empty and duplicate-free; the spawner guarantees it.
    pub fn new(id: u32, types: Vec<EditType>, x: f32) -> Self {
        debug_assert!(!types.is_empty());
        debug_assert!(
            types
                .iter()
                .enumerate()
                .all(|(i, t)| !types[i + 1..].contains(t))
        );
        Self {
            id,
            types,
            completed: Vec::new(),
            x,
            created_during_power_up: false,
            has_shown_comment: false,
        }
    }

    pub fn types(&self) -> &[EditType] {
        &self.types
    }

    pub fn completed(&self) -> &[EditType] {
        &self.completed
    }

    pub fn is_complete(&self) -> bool {
        self.completed.len() == self.types.len()
    }

    /// Edits still needed, in required order
    pub fn remaining(&self) -> impl Iterator<Item = EditType> + '_ {
        self.types
            .iter()
            .copied()
            .filter(|t| !self.completed.contains(t))
    }

    pub fn needs(&self, edit: EditType) -> bool {
        self.types.contains(&edit) && !self.completed.contains(&edit)
    }

    /// Whether `edit` would be accepted, without touching the order
    pub fn check_edit(&self, edit: EditType) -> Result<(), ActionRejected> {
        if !self.types.contains(&edit) {
            return Err(ActionRejected::NotNeeded(edit));
        }
        if self.completed.contains(&edit) {
            return Err(ActionRejected::AlreadyApplied(edit));
        }
        Ok(())
    }

    /// Mark `edit` done. Returns true if this completed the order.
    /// A rejected edit leaves the order untouched.
    pub fn apply_edit(&mut self, edit: EditType) -> Result<bool, ActionRejected> {
        self.check_edit(edit)?;
        self.completed.push(edit);
        Ok(self.is_complete())
    }

    /// Mark every remaining edit done. Returns how many were newly applied.
    pub fn auto_complete(&mut self) -> usize {
        let missing: Vec<EditType> = self.remaining().collect();
        self.completed.extend_from_slice(&missing);
        missing.len()
    }

    /// Center of the order on screen
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, CONVEYOR_Y)
    }

    /// Past the right edge plus margin
    pub fn has_exited(&self) -> bool {
        self.x > SCREEN_WIDTH + EXIT_MARGIN
    }

    /// Still within the no-spawn zone at the left end
    pub fn in_spawn_buffer(&self) -> bool {
        self.x < ORDER_SPAWN_X + SPAWN_BUFFER
    }
}
