//! Interactive session state machine.
//!
//! A [`Session`] owns the three same-shaped grids (current, next and saved),
//! the running flags and the statistics. It is single-threaded: the caller
//! owns it and drives it, including feeding it ticks from a [`Ticker`].
//!
//! Saved snapshots are taken at two checkpoints:
//!
//! * the first `evolve` since the last full reset or baseline restore
//! * `start`
//!
//! `reset` then returns the board to that snapshot, or wipes everything if
//! the board has never been evolved.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::error::{LifeError, LifeResult};
use crate::grid::{Cell, Coord, Grid};
use crate::stats::Stats;
use crate::stepper::{self, StepSummary, Strategy};
use crate::ticker::Ticker;

/// Default delay between automatic steps.
pub const DEFAULT_TIMER_DELAY: Duration = Duration::from_millis(1000);

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Never evolved since the last full reset, not running
    Idle,
    /// Stepping on every tick
    Running,
    /// Stopped after evolving at least once
    PausedEvolved,
}

/// Why the current generation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A single cell was toggled.
    Edit,
    /// The board was replaced by a pattern or random fill.
    Load,
    /// One generation transition.
    Step,
    /// Current was restored from the saved snapshot.
    Restore,
    /// Every grid was wiped.
    Clear,
}

/// Notification sent to observers after the current generation changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEvent {
    pub kind: ChangeKind,
    /// Generation counter after the change
    pub generation: u64,
    /// Coordinates whose value changed, row-major
    pub changed: Vec<Coord>,
}

/// Callback invoked with every [`GridEvent`].
pub type Observer = Box<dyn FnMut(&GridEvent)>;

/// A Game of Life board plus the start/stop/reset bookkeeping around it.
pub struct Session {
    current: Grid,
    next: Grid,
    saved: Grid,
    evolving: bool,
    has_evolved: bool,
    timer_delay: Duration,
    strategy: Strategy,
    stats: Stats,
    observers: Vec<Observer>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("dimensions", &self.current.dimensions())
            .field("evolving", &self.evolving)
            .field("has_evolved", &self.has_evolved)
            .field("timer_delay", &self.timer_delay)
            .field("strategy", &self.strategy)
            .field("stats", &self.stats)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Allocates three all-Dead grids of `rows` x `columns`.
    ///
    /// The session starts idle with [`DEFAULT_TIMER_DELAY`] and the
    /// sequential strategy.
    ///
    /// # Errors
    ///
    /// [`LifeError::EmptyGrid`] if either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> LifeResult<Session> {
        let current = Grid::new(rows, columns)?;
        Ok(Session {
            next: current.clone(),
            saved: current.clone(),
            current,
            evolving: false,
            has_evolved: false,
            timer_delay: DEFAULT_TIMER_DELAY,
            strategy: Strategy::default(),
            stats: Stats::new(),
            observers: Vec::new(),
        })
    }

    /// Selects how `step` visits the grid.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the initial timer delay before any timer runs.
    ///
    /// # Errors
    ///
    /// [`LifeError::InvalidTimerDelay`] for a zero delay.
    pub fn with_timer_delay(mut self, delay: Duration) -> LifeResult<Self> {
        if delay.is_zero() {
            return Err(LifeError::InvalidTimerDelay);
        }
        self.timer_delay = delay;
        Ok(self)
    }

    /// Registers a callback for every change to the current generation.
    ///
    /// Observers run synchronously, in registration order, after the change
    /// is complete. The event's `changed` list is exact, so a mirror of the
    /// board stays in sync by flipping just those coordinates.
    pub fn subscribe(&mut self, observer: impl FnMut(&GridEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, kind: ChangeKind, changed: Vec<Coord>) {
        let event = GridEvent {
            kind,
            generation: self.stats.generation,
            changed,
        };
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn saved(&self) -> &Grid {
        &self.saved
    }

    pub fn next(&self) -> &Grid {
        &self.next
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.current.dimensions()
    }

    pub fn is_evolving(&self) -> bool {
        self.evolving
    }

    pub fn has_evolved(&self) -> bool {
        self.has_evolved
    }

    pub fn timer_delay(&self) -> Duration {
        self.timer_delay
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn state(&self) -> SessionState {
        if self.evolving {
            SessionState::Running
        } else if self.has_evolved {
            SessionState::PausedEvolved
        } else {
            SessionState::Idle
        }
    }

    /// Reads a cell of the current generation.
    pub fn read_cell(&self, row: usize, column: usize) -> LifeResult<Cell> {
        self.current.get(row, column)
    }

    /// Flips a cell of the current generation. Allowed in every state; the
    /// saved snapshot and the flags are untouched.
    ///
    /// # Arguments
    ///
    /// * `row` - Row of the cell
    /// * `column` - Column of the cell
    ///
    /// # Returns
    ///
    /// The cell's new value.
    ///
    /// # Errors
    ///
    /// [`LifeError::IndexOutOfRange`] if the coordinate is outside the board.
    pub fn toggle_cell(&mut self, row: usize, column: usize) -> LifeResult<Cell> {
        let cell = self.current.toggle(row, column)?;
        self.stats.current_population = self.current.population() as u64;
        self.notify(ChangeKind::Edit, vec![(row, column)]);
        Ok(cell)
    }

    /// Clears the current generation and stamps `pattern` in its centre.
    ///
    /// # Errors
    ///
    /// [`LifeError::IndexOutOfRange`] if the pattern is larger than the
    /// board; the board is unchanged in that case.
    pub fn load_pattern(&mut self, pattern: &Grid) -> LifeResult<()> {
        let (rows, columns) = self.dimensions();
        if pattern.rows() > rows || pattern.columns() > columns {
            return Err(LifeError::IndexOutOfRange {
                row: pattern.rows() - 1,
                column: pattern.columns() - 1,
                rows,
                columns,
            });
        }
        let mut board = Grid::new(rows, columns)?;
        board.stamp(
            pattern,
            (rows - pattern.rows()) / 2,
            (columns - pattern.columns()) / 2,
        )?;
        self.replace_current(board)
    }

    /// Refills the current generation at random. Observers see a
    /// [`ChangeKind::Load`] event.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> LifeResult<()> {
        let (rows, columns) = self.dimensions();
        let mut board = Grid::new(rows, columns)?;
        board.randomize(rng, density);
        self.replace_current(board)
    }

    fn replace_current(&mut self, board: Grid) -> LifeResult<()> {
        let changed = self.current.diff(&board)?;
        self.current = board;
        self.stats.current_population = self.current.population() as u64;
        self.notify(ChangeKind::Load, changed);
        Ok(())
    }

    /// Performs exactly one generation transition, without any snapshot
    /// bookkeeping.
    ///
    /// # Returns
    ///
    /// Births, deaths, the new population and the changed coordinates.
    pub fn step(&mut self) -> LifeResult<StepSummary> {
        let summary = stepper::step(&mut self.current, &mut self.next, self.strategy)?;
        self.stats.record_step(&summary);
        debug!(
            generation = self.stats.generation,
            births = summary.births,
            deaths = summary.deaths,
            population = summary.population,
            "stepped"
        );
        self.notify(ChangeKind::Step, summary.changed.clone());
        Ok(summary)
    }

    /// Single evolve: the first one since the last reset snapshots the
    /// board as the new baseline, then one step runs.
    ///
    /// This is also what the owner of a running session calls for every
    /// tick of its [`Ticker`].
    ///
    /// # Returns
    ///
    /// The [`StepSummary`] of the step.
    pub fn evolve(&mut self) -> LifeResult<StepSummary> {
        if !self.has_evolved {
            self.saved.copy_from(&self.current)?;
            self.has_evolved = true;
            debug!(population = self.current.population(), "baseline saved");
        }
        self.step()
    }

    /// Begins running: snapshots the board and returns the timer whose ticks
    /// the caller turns into `evolve` calls.
    ///
    /// The session counts as evolved from here on, so the first tick does not
    /// take a second snapshot and `reset` after `stop` returns to this board.
    ///
    /// # Errors
    ///
    /// [`LifeError::AlreadyRunning`] if a run is in progress.
    pub fn start(&mut self) -> LifeResult<Ticker> {
        if self.evolving {
            return Err(LifeError::AlreadyRunning);
        }
        let ticker = Ticker::spawn(self.timer_delay)?;
        self.saved.copy_from(&self.current)?;
        self.evolving = true;
        self.has_evolved = true;
        info!(delay_ms = self.timer_delay.as_millis() as u64, "simulation started");
        Ok(ticker)
    }

    /// Halts the run and cancels its timer. Saved snapshot and evolved flag
    /// are kept.
    ///
    /// # Arguments
    ///
    /// * `ticker` - The timer returned by [`Session::start`]; no tick is
    ///   delivered after this returns
    pub fn stop(&mut self, ticker: Ticker) {
        ticker.cancel();
        self.halt();
    }

    fn halt(&mut self) {
        self.evolving = false;
        info!(generation = self.stats.generation, "simulation stopped");
    }

    /// Start if stopped, stop if running. `ticker` holds the timer between
    /// calls.
    pub fn toggle_running(&mut self, ticker: &mut Option<Ticker>) -> LifeResult<()> {
        if self.evolving {
            match ticker.take() {
                Some(ticker) => self.stop(ticker),
                None => self.halt(),
            }
        } else {
            *ticker = Some(self.start()?);
        }
        Ok(())
    }

    /// Returns the board to its baseline.
    ///
    /// * running: current is restored from saved; the run continues
    /// * stopped after evolving: restored, and the next evolve re-snapshots
    /// * never evolved: saved, current and next are all wiped
    ///
    /// Statistics restart from generation zero in every case. Observers get
    /// [`ChangeKind::Restore`] or [`ChangeKind::Clear`] respectively.
    pub fn reset(&mut self) -> LifeResult<()> {
        if self.evolving || self.has_evolved {
            let changed = self.current.diff(&self.saved)?;
            self.current.copy_from(&self.saved)?;
            self.next.clear();
            if !self.evolving {
                self.has_evolved = false;
            }
            self.stats.reset(self.current.population());
            info!(evolving = self.evolving, "board restored to baseline");
            self.notify(ChangeKind::Restore, changed);
        } else {
            let changed: Vec<Coord> = self.current.alive_cells().collect();
            self.saved.clear();
            self.current.clear();
            self.next.clear();
            self.stats.reset(0);
            info!("board cleared");
            self.notify(ChangeKind::Clear, changed);
        }
        Ok(())
    }

    /// Changes the delay between ticks. A running timer is replaced by one
    /// with the new period; the session keeps running.
    ///
    /// # Arguments
    ///
    /// * `delay` - The new period, at least 1ms
    /// * `ticker` - The timer returned by [`Session::start`]; required while
    ///   running, ignored otherwise
    ///
    /// # Errors
    ///
    /// * [`LifeError::InvalidTimerDelay`] for a zero delay
    /// * [`LifeError::MissingTicker`] if the session is running and no timer
    ///   was passed
    /// * [`LifeError::Timer`] if the replacement timer could not be started;
    ///   the old one keeps ticking
    ///
    /// The stored delay is unchanged whenever an error is returned.
    pub fn set_timer_delay(&mut self, delay: Duration, ticker: Option<&mut Ticker>) -> LifeResult<()> {
        if delay.is_zero() {
            return Err(LifeError::InvalidTimerDelay);
        }
        match ticker {
            Some(ticker) if self.evolving => ticker.restart(delay)?,
            None if self.evolving => return Err(LifeError::MissingTicker),
            _ => {}
        }
        self.timer_delay = delay;
        info!(delay_ms = delay.as_millis() as u64, "timer delay changed");
        Ok(())
    }
}
