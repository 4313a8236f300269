//! Final score submission
//!
//! The simulation never depends on this: the session submits once at game over
//! and only logs failures. `LocalLeaderboard` keeps a top-10 table; remote
//! services implement the same trait.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of scores kept locally
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard unavailable: {0}")]
    Unavailable(String),
    #[error("leaderboard encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
    pub score: u64,
    pub orders_completed: u32,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

/// Rank information handed back after submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankInfo {
    /// 1-indexed, `None` if the score did not place
    pub rank: Option<usize>,
    pub best_score: u64,
}

/// Accepts final scores and reports standing
pub trait Leaderboard {
    fn submit(&mut self, score: &FinalScore) -> Result<RankInfo, LeaderboardError>;
}

/// Local top-10 table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalLeaderboard {
    pub entries: Vec<FinalScore>,
}

impl LocalLeaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the table
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert if it qualifies; returns the 1-indexed rank achieved
    pub fn add_score(&mut self, entry: FinalScore) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Sorted descending; ties go after existing entries
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> Result<String, LeaderboardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Unreadable tables start empty
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("High score table corrupt ({e}), starting fresh");
            Self::new()
        })
    }
}

impl Leaderboard for LocalLeaderboard {
    fn submit(&mut self, score: &FinalScore) -> Result<RankInfo, LeaderboardError> {
        let rank = self.add_score(score.clone());
        log::info!("Score {} submitted, rank {:?}", score.score, rank);
        Ok(RankInfo {
            rank,
            best_score: self.top_score().unwrap_or(0).max(score.score),
        })
    }
}

/// Current time as a Unix timestamp in milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
