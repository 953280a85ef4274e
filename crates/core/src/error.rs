//! Error types for the simulation core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Vector;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the simulation core.
///
/// These indicate a data or engine bug, never a transient condition; callers
/// should report them instead of retrying.
#[derive(Debug, Error)]
pub enum Error {
    #[error("segment queue is empty")]
    EmptyQueue,

    #[error("no food at {0}")]
    MissingFood(Vector),

    #[error("no empty cell left to place food")]
    NoEmptyCell,

    #[error("speed change must be positive, got {0}")]
    InvalidFood(f64),

    #[error("unknown food {0:?} in catalog")]
    UnknownFood(String),

    #[error("field size must be positive, got {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("malformed map: {0}")]
    MalformedMap(#[from] MapError),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// What was wrong with a map file. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("expected at least {expected} lines, found {found}")]
    TooShort { expected: usize, found: usize },

    #[error("line {line}: unknown direction {word:?}")]
    UnknownDirection { line: usize, word: String },

    #[error("line {line}: expected \"X Y\", found {text:?}")]
    BadCoordinate { line: usize, text: String },

    #[error("line {line}: snake cell {cell} lies outside the {width}x{height} field")]
    OutOfField {
        line: usize,
        cell: Vector,
        width: usize,
        height: usize,
    },

    #[error("line {line}: expected integer max score, found {text:?}")]
    BadScore { line: usize, text: String },

    #[error("field has no cells")]
    EmptyField,

    #[error("snake must have exactly {expected} segments to be saved, has {found}")]
    SnakeLength { expected: usize, found: usize },
}
