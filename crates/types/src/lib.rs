//! Core types module - shared value types and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain values with no external dependencies, so they can be
//! used by the simulation core, the terminal renderer and the input mapping alike.
//!
//! # Coordinates
//!
//! The field is a grid of integer cells:
//!
//! - **x** grows to the right, starting at column 0
//! - **y** grows downwards, starting at row 0
//! - Moving off one edge wraps to the opposite edge (toroidal field)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_RATE` | 120 | Frames per second of the driving loop |
//! | `DEFAULT_SNAKE_SPEED` | 14.0 | Cells per second of a fresh snake |
//! | `SPECIAL_FOOD_PERIOD_SECS` | 5 | Lifetime of a special food before it is replaced |
//!
//! A snake moves once every `FRAME_RATE / speed` frames (rounded down), so a
//! fresh snake moves every 8 frames.
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, Food, Vector};
//!
//! let head = Vector::new(3, 0);
//! assert_eq!(head + Direction::Right.offset(), Vector::new(4, 0));
//!
//! assert_eq!(Direction::from_word("LEFT"), Some(Direction::Left));
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//!
//! assert!(Food::BASIC.is_basic());
//! assert_eq!(Food::new(0.0, 1, 1), None);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

/// Frames per second of the driving loop.
pub const FRAME_RATE: u32 = 120;

/// Speed of a freshly created snake, in cells per second.
pub const DEFAULT_SNAKE_SPEED: f64 = 14.0;

/// Seconds a special food stays on the field before it is replaced.
pub const SPECIAL_FOOD_PERIOD_SECS: u32 = 5;

/// Lives at the start of a campaign.
pub const DEFAULT_HEALTH: u32 = 3;

/// Map character for a wall cell.
pub const WALL_SYMBOL: char = '#';

/// Map character written for an empty cell. Any non-wall character reads as empty.
pub const EMPTY_SYMBOL: char = ' ';

/// Number of segments in a snake stored in a map file.
pub const MAP_SNAKE_LENGTH: usize = 3;

/// Integer cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Wrap both axes into `0..width` and `0..height`.
    ///
    /// ```
    /// use tui_snake_types::Vector;
    ///
    /// assert_eq!(Vector::new(4, -1).wrapped(4, 4), Vector::new(0, 3));
    /// ```
    pub fn wrapped(self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i32) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four cardinal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step for one move in this direction
    pub fn offset(&self) -> Vector {
        match self {
            Direction::Up => Vector::new(0, -1),
            Direction::Down => Vector::new(0, 1),
            Direction::Right => Vector::new(1, 0),
            Direction::Left => Vector::new(-1, 0),
        }
    }

    /// The direction a snake may never turn into from this one
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    /// Parse the direction word used in map files (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::from_word("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_word("Right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_word("north"), None);
    /// ```
    pub fn from_word(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Word written to map files
    pub fn as_word(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Effect bundle applied to the snake when it eats.
///
/// Two foods are equal when all three effects are equal; there is no identity
/// beyond the values. `speed_change` is always strictly positive so a snake
/// can never stop or reverse its speed.
#[derive(Debug, Clone, Copy)]
pub struct Food {
    speed_change: f64,
    length_change: i32,
    score: i32,
}

impl Food {
    /// The neutral food that keeps the game going: +1 length, +1 score.
    pub const BASIC: Food = Food {
        speed_change: 1.0,
        length_change: 1,
        score: 1,
    };

    /// Returns `None` unless `speed_change` is finite and positive.
    pub fn new(speed_change: f64, length_change: i32, score: i32) -> Option<Self> {
        if !(speed_change.is_finite() && speed_change > 0.0) {
            return None;
        }
        Some(Self {
            speed_change,
            length_change,
            score,
        })
    }

    /// Speed multiplier
    pub fn speed_change(&self) -> f64 {
        self.speed_change
    }

    /// Segments added (or removed when negative) over the next moves
    pub fn length_change(&self) -> i32 {
        self.length_change
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn is_basic(&self) -> bool {
        *self == Food::BASIC
    }
}

impl Default for Food {
    fn default() -> Self {
        Food::BASIC
    }
}

impl PartialEq for Food {
    fn eq(&self, other: &Self) -> bool {
        self.speed_change.to_bits() == other.speed_change.to_bits()
            && self.length_change == other.length_change
            && self.score == other.score
    }
}

impl Eq for Food {}

impl Hash for Food {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.speed_change.to_bits().hash(state);
        self.length_change.hash(state);
        self.score.hash(state);
    }
}

/// Player commands produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Steer the snake, or move the menu cursor on menu screens
    Steer(Direction),
    /// Toggle pause state
    Pause,
    /// Accept the highlighted menu entry / dismiss a result screen
    Confirm,
    /// Leave the current screen
    Back,
}
