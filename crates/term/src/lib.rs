//! Terminal "game renderer" module.
//!
//! Renders the snake field, menus and result screens into a simple
//! framebuffer and flushes it to the terminal with crossterm. No widget
//! toolkit is involved, so every glyph position is under our control.
//!
//! Goals:
//! - Keep `core` deterministic and free of terminal code
//! - Views are pure functions from game state to a framebuffer, testable without a TTY
//! - Field cells are 2 columns wide to keep the grid roughly square

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod screen_view;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};
pub use game_view::{head_glyph, AnchorY, GameView, PlayMode, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screen_view::{MenuCursor, MenuItem, ScreenView};
