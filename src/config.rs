//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::error::LifeError;
use crate::grid::Grid;
use crate::stepper::Strategy;

pub const DEFAULT_ROWS: usize = 40;
pub const DEFAULT_COLUMNS: usize = 40;

/// Configuration problems detected before the session starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("density {0} is outside 0.0..=1.0")]
    InvalidDensity(f64),

    #[error("{name} must be at least 1")]
    Zero { name: &'static str },

    #[error("cannot read pattern {path}: {source}")]
    PatternIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern {path}: {source}")]
    Pattern {
        path: PathBuf,
        #[source]
        source: LifeError,
    },
}

/// Conway's Game of Life on a bounded grid.
#[derive(Parser, Debug, Clone)]
#[command(name = "conway-tui")]
#[command(about = "Conway's Game of Life on a bounded grid", long_about = None)]
pub struct Config {
    /// Number of grid rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Number of grid columns
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// Milliseconds between automatic steps while running
    #[arg(short, long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Milliseconds between screen refreshes
    #[arg(long, default_value_t = 50)]
    pub frame_ms: u64,

    /// Start from a text grid ('#' alive, '.' dead), centred on the board
    #[arg(short, long)]
    pub pattern: Option<PathBuf>,

    /// Fill the board at random with this live-cell probability
    #[arg(long)]
    pub density: Option<f64>,

    /// Seed for the random fill (random if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Step rows in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Run without the terminal UI and print the final board
    #[arg(long)]
    pub headless: bool,

    /// Generations to evolve in headless mode
    #[arg(short, long, default_value_t = 100)]
    pub generations: u64,

    /// Write logs to this file (interactive mode logs nowhere otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            delay_ms: 1000,
            frame_ms: 50,
            pattern: None,
            density: None,
            seed: None,
            parallel: false,
            headless: false,
            generations: 100,
            log_file: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Checks values clap cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Zero { name: "rows" });
        }
        if self.columns == 0 {
            return Err(ConfigError::Zero { name: "columns" });
        }
        if self.delay_ms == 0 {
            return Err(ConfigError::Zero { name: "delay" });
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::Zero { name: "frame interval" });
        }
        if let Some(density) = self.density {
            if !(0.0..=1.0).contains(&density) {
                return Err(ConfigError::InvalidDensity(density));
            }
        }
        Ok(())
    }

    pub fn timer_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn strategy(&self) -> Strategy {
        if self.parallel {
            Strategy::Parallel
        } else {
            Strategy::Sequential
        }
    }

    /// Reads the pattern file, if one was given.
    pub fn load_pattern(&self) -> Result<Option<Grid>, ConfigError> {
        let Some(path) = &self.pattern else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::PatternIo {
            path: path.clone(),
            source,
        })?;
        let grid = text.parse::<Grid>().map_err(|source| ConfigError::Pattern {
            path: path.clone(),
            source,
        })?;
        Ok(Some(grid))
    }
}
