//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard input mapping
//! - Browser entry points (wasm only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::KeyState;
