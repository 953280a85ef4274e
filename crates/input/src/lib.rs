//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. Steering is
//! edge-triggered: one key press is one turn, so no repeat handling is needed.

pub mod map;

pub use tui_snake_types as types;

pub use map::{handle_key_event, should_quit};
