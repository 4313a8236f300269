//! Cross-session unlock state
//!
//! Features:
//! - Versioned JSON record: station unlocks + tutorial-completed flag
//! - Pluggable key-value backends (memory, file, LocalStorage)
//! - Corrupt or missing records fall back to "first station only"
//! - Full reset to first-station-only or all-locked

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::EditType;

/// Storage key used by key-value backends
pub const STORAGE_KEY: &str = "order_fix_unlocks";

/// Current record format
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// What a full reset leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetMode {
    #[default]
    FirstStationOnly,
    AllLocked,
}

/// Persisted unlock state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub version: u32,
    pub stations: BTreeMap<EditType, bool>,
    #[serde(default)]
    pub tutorial_completed: bool,
}

impl Default for UnlockRecord {
    fn default() -> Self {
        Self::first_station_only()
    }
}

impl UnlockRecord {
    pub fn all_locked() -> Self {
        Self {
            version: RECORD_VERSION,
            stations: EditType::ALL.into_iter().map(|t| (t, false)).collect(),
            tutorial_completed: false,
        }
    }

    pub fn first_station_only() -> Self {
        let mut record = Self::all_locked();
        record.set_unlocked(EditType::ALL[0], true);
        record
    }

    pub fn after_reset(mode: ResetMode) -> Self {
        match mode {
            ResetMode::FirstStationOnly => Self::first_station_only(),
            ResetMode::AllLocked => Self::all_locked(),
        }
    }

    /// Missing entries count as locked
    pub fn is_unlocked(&self, edit: EditType) -> bool {
        self.stations.get(&edit).copied().unwrap_or(false)
    }

    pub fn set_unlocked(&mut self, edit: EditType, unlocked: bool) {
        self.stations.insert(edit, unlocked);
    }

    /// Decode a stored record. Anything unreadable becomes the default.
    pub fn decode(json: &str) -> Self {
        match serde_json::from_str::<UnlockRecord>(json) {
            Ok(record) if record.version == RECORD_VERSION => record,
            Ok(record) => {
                log::warn!("Unlock record version {} not supported, starting fresh", record.version);
                Self::default()
            }
            Err(e) => {
                log::warn!("Unlock record corrupt ({e}), starting fresh");
                Self::default()
            }
        }
    }

    pub fn encode(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Key-value storage for the unlock record
pub trait UnlockStore {
    /// Raw stored record, `None` if nothing was ever saved
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&mut self, json: &str) -> Result<(), StoreError>;
    fn remove(&mut self) -> Result<(), StoreError>;

    /// Load the record, falling back to the default on any problem
    fn load(&self) -> UnlockRecord {
        match self.read() {
            Ok(Some(json)) => UnlockRecord::decode(&json),
            Ok(None) => {
                log::info!("No unlock record found, starting fresh");
                UnlockRecord::default()
            }
            Err(e) => {
                log::warn!("Unlock record unreadable ({e}), starting fresh");
                UnlockRecord::default()
            }
        }
    }

    fn save(&mut self, record: &UnlockRecord) -> Result<(), StoreError> {
        let json = record.encode()?;
        self.write(&json)
    }

    /// Wipe stored progress and write the post-reset record
    fn reset(&mut self, mode: ResetMode) -> Result<UnlockRecord, StoreError> {
        self.remove()?;
        let record = UnlockRecord::after_reset(mode);
        self.save(&record)?;
        Ok(record)
    }
}

/// In-memory store for tests and sessions without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
    /// Make every write fail, for exercising failure paths
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary stored value, valid or not
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            value: Some(json.into()),
            fail_writes: false,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl UnlockStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, json: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        self.value = Some(json.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), StoreError> {
        self.value = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_is_first_station_only() {
        let store = MemoryStore::new();
        let record = store.load();
        assert!(record.is_unlocked(EditType::Address));
        assert!(!record.is_unlocked(EditType::Quantity));
        assert!(!record.tutorial_completed);
    }

    #[test]
    fn test_corrupt_record_is_first_station_only() {
        let store = MemoryStore::with_raw("{ this is not json");
        assert_eq!(store.load(), UnlockRecord::first_station_only());

        let store = MemoryStore::with_raw(r#"{"version":99,"stations":{}}"#);
        assert_eq!(store.load(), UnlockRecord::first_station_only());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut record = UnlockRecord::first_station_only();
        record.set_unlocked(EditType::Quantity, true);
        record.tutorial_completed = true;
        store.save(&record).unwrap();
        assert_eq!(store.load(), record);
        assert!(store.raw().is_some_and(|s| s.contains("quantity")));
    }

    #[test]
    fn test_reset_modes() {
        let mut store = MemoryStore::new();
        let mut record = UnlockRecord::all_locked();
        for edit in EditType::ALL {
            record.set_unlocked(edit, true);
        }
        record.tutorial_completed = true;
        store.save(&record).unwrap();

        let after = store.reset(ResetMode::FirstStationOnly).unwrap();
        assert_eq!(after, UnlockRecord::first_station_only());
        assert_eq!(store.load(), after);

        let after = store.reset(ResetMode::AllLocked).unwrap();
        assert!(EditType::ALL.iter().all(|&e| !after.is_unlocked(e)));
        assert!(!store.load().tutorial_completed);
    }

    #[test]
    fn test_failed_write_reports_error() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        assert!(matches!(
            store.save(&UnlockRecord::default()),
            Err(StoreError::Unavailable(_))
        ));
    }
}
