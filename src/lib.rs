//! # Game of Life
//!
//! Conway's Game of Life on a fixed-size, bounded grid, with the
//! start/stop/reset session logic of an interactive editor.
//!
//! ## Layout
//!
//! * [`grid`] - cells, grids and the copy/clear/get/set primitives
//! * [`rules`] - neighbor counting and the next-state rule
//! * [`stepper`] - one generation transition, sequential or row-parallel
//! * [`session`] - the current/next/saved grids and the run state machine
//! * [`ticker`] - the cancellable repeating timer that drives a run
//! * [`stats`] - generation, birth and death counters
//! * [`config`] - command-line configuration
//!
//! ```
//! use conway_tui::{Cell, Session};
//!
//! let mut session = Session::new(5, 5)?;
//! for column in 1..4 {
//!     session.toggle_cell(2, column)?;
//! }
//! session.evolve()?;
//! assert_eq!(session.read_cell(1, 2)?, Cell::Alive);
//! assert_eq!(session.read_cell(2, 1)?, Cell::Dead);
//! # Ok::<(), conway_tui::LifeError>(())
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod rules;
pub mod session;
pub mod stats;
pub mod stepper;
pub mod ticker;

pub use config::{Config, ConfigError};
pub use error::{LifeError, LifeResult};
pub use grid::{clear_state, copy_state, Cell, Coord, Grid};
pub use rules::{candidate_neighbors, neighbor_count, next_state};
pub use session::{ChangeKind, GridEvent, Observer, Session, SessionState, DEFAULT_TIMER_DELAY};
pub use stats::Stats;
pub use stepper::{step, StepSummary, Strategy};
pub use ticker::Ticker;
