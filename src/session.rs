//! Game session: drives the simulation once per rendered frame
//!
//! The session owns the game state and its collaborators. It runs fixed
//! substeps, drains events, and forwards them to storage and the
//! leaderboard. Collaborator failures are logged and never reach the
//! simulation. Resets requested mid-frame take effect before the next tick.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::leaderboard::{FinalScore, Leaderboard, RankInfo, now_ms};
use crate::persistence::{ResetMode, UnlockRecord, UnlockStore};
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, Tutorial, tick};
use crate::tuning::Tuning;

/// Longest frame we simulate; anything longer is treated as a stall
const MAX_FRAME_DT: f32 = 0.1;

/// Externally requested reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// Play again: keeps unlocks, never replays the tutorial
    Restart,
    /// Wipe persisted progress and the tutorial flag
    Full(ResetMode),
}

pub struct Session {
    state: GameState,
    tuning: Tuning,
    store: Box<dyn UnlockStore>,
    leaderboard: Box<dyn Leaderboard>,
    input: TickInput,
    accumulator: f32,
    pending_reset: Option<ResetKind>,
    tutorial_completed: bool,
    last_rank: Option<RankInfo>,
}

impl Session {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        store: Box<dyn UnlockStore>,
        leaderboard: Box<dyn Leaderboard>,
    ) -> Self {
        let record = store.load();
        let start_tutorial = Tutorial::should_start(record.tutorial_completed, false);
        Self {
            state: GameState::new(seed, tuning.clone(), &record, start_tutorial),
            tuning,
            store,
            leaderboard,
            input: TickInput::default(),
            accumulator: 0.0,
            pending_reset: None,
            tutorial_completed: record.tutorial_completed,
            last_rank: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Input for the next substep. One-shot presses clear after it runs.
    pub fn input_mut(&mut self) -> &mut TickInput {
        &mut self.input
    }

    /// Replace held keys; presses not yet consumed by a substep are kept
    pub fn set_input(&mut self, mut input: TickInput) {
        input.merge_one_shots(&self.input);
        self.input = input;
    }

    /// Overlay control: blocks input-driven transitions, time keeps running
    pub fn set_inputs_disabled(&mut self, disabled: bool) {
        self.state.inputs_disabled = disabled;
    }

    /// Queue a reset; applied at the start of the next `update`
    pub fn request_reset(&mut self, kind: ResetKind) {
        log::info!("Reset requested: {kind:?}");
        self.pending_reset = Some(kind);
    }

    /// Rank from the last game-over submission
    pub fn last_rank(&self) -> Option<RankInfo> {
        self.last_rank
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Advance by one rendered frame. Returns the events it produced.
    pub fn update(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        self.apply_pending_reset();

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.input.clear_one_shots();
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let events = self.state.drain_events();
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::StationUnlocked { .. } => self.persist(),
            GameEvent::TutorialCompleted => {
                self.tutorial_completed = true;
                self.persist();
            }
            GameEvent::GameOver { final_score } => self.submit_score(*final_score),
            _ => {}
        }
    }

    /// Fire-and-forget write of the unlock record
    fn persist(&mut self) {
        let record = self.state.unlock_record(self.tutorial_completed);
        if let Err(e) = self.store.save(&record) {
            log::warn!("Failed to persist unlocks: {e}");
        }
    }

    fn submit_score(&mut self, score: u64) {
        let entry = FinalScore {
            score,
            orders_completed: self.state.stats.orders_completed,
            timestamp: now_ms(),
        };
        match self.leaderboard.submit(&entry) {
            Ok(info) => self.last_rank = Some(info),
            Err(e) => log::warn!("Score submission failed: {e}"),
        }
    }

    fn apply_pending_reset(&mut self) {
        let Some(kind) = self.pending_reset.take() else {
            return;
        };
        let seed = self.state.seed.wrapping_add(1);
        let inputs_disabled = self.state.inputs_disabled;

        self.state = match kind {
            ResetKind::Restart => {
                let record = self.state.unlock_record(self.tutorial_completed);
                GameState::new(seed, self.tuning.clone(), &record, false)
            }
            ResetKind::Full(mode) => {
                let record = self.store.reset(mode).unwrap_or_else(|e| {
                    log::warn!("Failed to reset stored unlocks: {e}");
                    UnlockRecord::after_reset(mode)
                });
                self.tutorial_completed = false;
                let start_tutorial = Tutorial::should_start(false, false);
                GameState::new(seed, self.tuning.clone(), &record, start_tutorial)
            }
        };

        self.state.inputs_disabled = inputs_disabled;
        self.accumulator = 0.0;
        self.input = TickInput::default();
        self.last_rank = None;
    }
}
