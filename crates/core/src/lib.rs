//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the snake rules, level state machine and map format.
//! It never touches the terminal, which makes it:
//!
//! - **Deterministic**: food placement draws from an injectable seeded RNG
//! - **Testable**: every rule is covered by unit tests in its module
//! - **Portable**: the same [`Session`] drives the terminal front end and headless runs
//!
//! # Module Structure
//!
//! - [`queue`]: segment queue backing the snake body
//! - [`snake`]: movement, growth and self-intersection
//! - [`field`]: walls, food and the open-cell list
//! - [`level`]: score, health, win and game over
//! - [`map`]: the text map format, both directions
//! - [`session`]: frame timing, buffered steering and special food
//! - [`campaign`]: level progression and free play
//! - [`editor`]: building maps cell by cell (model only; no editor screen in the binary)
//! - [`settings`]: JSON settings with environment overrides
//!
//! # Game Rules
//!
//! - The field wraps around at every edge; walls are the only boundaries
//! - Steering straight back into the body is ignored
//! - Hitting a wall or the body costs a life and restarts the level's snake; food under
//!   the restarted head is eaten on the same move
//! - Each food changes speed, length and score; basic food is always on the field
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{map, Level, LevelState};
//!
//! let text = "     \n     \n     \nright\n2 1\n1 1\n0 1\n5";
//! let (field, max_score) = map::parse_map(text).unwrap();
//! let mut level = Level::new(field, max_score, 3).with_seed(7);
//!
//! let outcome = level.step_snake(None).unwrap();
//! assert_eq!(outcome.state, LevelState::Playing);
//! assert_eq!(level.field().snake().head().unwrap().location.x, 3);
//! ```
//!
//! # Timing
//!
//! [`Session::tick`] is called at a fixed frame rate (120 by default). The
//! snake moves every `floor(frame_rate / speed)` frames, so faster food
//! effects shorten the gap between moves.

pub mod campaign;
pub mod editor;
pub mod error;
pub mod field;
pub mod level;
pub mod map;
pub mod queue;
pub mod rng;
pub mod session;
pub mod settings;
pub mod snake;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use campaign::{free_play, Campaign, CampaignProgress};
pub use editor::{LevelEditor, Tool};
pub use error::{Error, MapError, Result};
pub use field::Field;
pub use level::{Level, LevelState, StepOutcome};
pub use map::{anti_parse_map, parse_map, read_map, write_map};
pub use queue::SegmentQueue;
pub use rng::SimpleRng;
pub use session::{DirectionBuffer, Session, SessionConfig, TickReport};
pub use settings::{FoodSpec, Settings};
pub use snake::{Snake, SnakePart};
