//! Stations and unlock progression
//!
//! Stations unlock in `EditType::ALL` order, one per `edits_per_unlock`
//! successful edits. Unlocks never revert except through a full reset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::edit::EditType;
use crate::consts::*;
use crate::persistence::UnlockRecord;

/// A fixed pickup point for one edit type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub edit: EditType,
    pub unlocked: bool,
    pub pos: Vec2,
}

impl Station {
    fn new(edit: EditType, unlocked: bool) -> Self {
        let x = STATION_FIRST_X + edit.index() as f32 * STATION_SPACING;
        Self {
            edit,
            unlocked,
            pos: Vec2::new(x, STATION_Y),
        }
    }
}

/// All six stations plus the edit counter that drives unlocking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stations {
    /// Indexed by `EditType::index`
    list: Vec<Station>,
    /// Successful manual edits this session
    total_edits: u32,
    /// `total_edits` at the last unlock
    last_unlock_edit_count: u32,
}

impl Stations {
    /// Build the station row from a persisted record
    pub fn from_record(record: &UnlockRecord) -> Self {
        Self {
            list: EditType::ALL
                .into_iter()
                .map(|edit| Station::new(edit, record.is_unlocked(edit)))
                .collect(),
            total_edits: 0,
            last_unlock_edit_count: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.list.iter()
    }

    pub fn get(&self, edit: EditType) -> &Station {
        &self.list[edit.index()]
    }

    pub fn is_unlocked(&self, edit: EditType) -> bool {
        self.get(edit).unlocked
    }

    pub fn unlocked_count(&self) -> usize {
        self.list.iter().filter(|s| s.unlocked).count()
    }

    /// Unlocked types in unlock order
    pub fn unlocked_types(&self) -> Vec<EditType> {
        self.list
            .iter()
            .filter(|s| s.unlocked)
            .map(|s| s.edit)
            .collect()
    }

    pub fn total_edits(&self) -> u32 {
        self.total_edits
    }

    /// Count one successful edit
    pub fn record_edit(&mut self) {
        self.total_edits = self.total_edits.saturating_add(1);
    }

    /// Unlock the next station if enough edits have accumulated since the last one
    pub fn check_unlock(&mut self, edits_per_unlock: u32) -> Option<EditType> {
        if self.total_edits < edits_per_unlock
            || self.total_edits - self.last_unlock_edit_count < edits_per_unlock
        {
            return None;
        }
        self.last_unlock_edit_count = self.total_edits;
        self.unlock_next()
    }

    /// Unlock the first locked station. No-op once all are open.
    pub fn unlock_next(&mut self) -> Option<EditType> {
        let station = self.list.iter_mut().find(|s| !s.unlocked)?;
        station.unlocked = true;
        log::info!("Station unlocked: {}", station.edit.as_str());
        Some(station.edit)
    }

    /// Unlock everything still locked, returning what changed
    pub fn unlock_all(&mut self) -> Vec<EditType> {
        std::iter::from_fn(|| self.unlock_next()).collect()
    }

    /// Record describing the current unlock state
    pub fn to_record(&self, tutorial_completed: bool) -> UnlockRecord {
        let mut record = UnlockRecord::all_locked();
        for station in &self.list {
            record.set_unlocked(station.edit, station.unlocked);
        }
        record.tutorial_completed = tutorial_completed;
        record
    }
}
