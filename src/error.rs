//! Error types for the simulation core.
//!
//! Every failure the core can report is a programmer error in the calling
//! layer: a coordinate outside the grid, grids of different shapes, or an
//! invalid session setting. Operations check first and mutate second, so an
//! error never leaves a grid half-written.

use thiserror::Error;

/// Errors produced by the grid store, rule engine and session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("grid dimensions differ: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("cell ({row}, {column}) is outside the {rows}x{columns} grid")]
    IndexOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("timer delay must be at least 1ms")]
    InvalidTimerDelay,

    #[error("failed to start timer: {0}")]
    Timer(String),

    #[error("simulation is already running")]
    AlreadyRunning,

    #[error("simulation is running; its timer is needed to change the delay")]
    MissingTicker,

    #[error("invalid grid text at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl LifeError {
    /// Creates a parse error for the given 1-based line.
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type LifeResult<T> = Result<T, LifeError>;
