//! Browser entry point
//!
//! The page owns rendering and audio. It forwards key events, calls `frame`
//! from `requestAnimationFrame`, and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use super::input::KeyState;
use crate::leaderboard::LocalLeaderboard;
use crate::persistence::ResetMode;
use crate::persistence::web::LocalStorageStore;
use crate::session::{ResetKind, Session};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Order Fix starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    keys: KeyState,
    idle_mode: bool,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(debug_keys: bool) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            session: Session::new(
                seed,
                Tuning::default(),
                Box::new(LocalStorageStore),
                Box::new(LocalLeaderboard::new()),
            ),
            keys: KeyState::new(debug_keys),
            idle_mode: false,
            last_time: None,
        }
    }

    /// Returns true if the key is bound (page should preventDefault)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.keys.key_down(code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.keys.key_up(code)
    }

    pub fn blur(&mut self) {
        self.keys.release_all();
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    /// Leaderboard or menu overlay is up
    pub fn set_overlay(&mut self, shown: bool) {
        self.session.set_inputs_disabled(shown);
    }

    pub fn restart(&mut self) {
        self.session.request_reset(ResetKind::Restart);
    }

    pub fn reset_progress(&mut self, all_locked: bool) {
        let mode = if all_locked {
            ResetMode::AllLocked
        } else {
            ResetMode::FirstStationOnly
        };
        self.session.request_reset(ResetKind::Full(mode));
    }

    /// Advance one animation frame; returns audio cues joined by commas
    pub fn frame(&mut self, time_ms: f64) -> String {
        let dt = self
            .last_time
            .map(|last| ((time_ms - last) / 1000.0) as f32)
            .unwrap_or(0.0);
        self.last_time = Some(time_ms);

        let input = self.keys.take_input(self.idle_mode);
        self.session.set_input(input);
        let events = self.session.update(dt);
        events
            .iter()
            .filter_map(|e| e.audio_cue())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Render snapshot as JSON
    pub fn snapshot(&self) -> String {
        self.session.snapshot().to_json().unwrap_or_else(|e| {
            log::error!("Snapshot encoding failed: {e}");
            String::from("{}")
        })
    }
}
