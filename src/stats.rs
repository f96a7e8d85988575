//! Running statistics for a session.

use crate::stepper::StepSummary;

/// Stores statistics about the simulation since the last baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Generations stepped since the board was last restored or wiped
    pub generation: u64,
    /// Total number of cells born
    pub cells_created: u64,
    /// Total number of cells that died
    pub cells_destroyed: u64,
    /// Current number of living cells
    pub current_population: u64,
}

impl Stats {
    /// Creates a new `Stats` instance with all counters initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts over from a board holding `population` live cells.
    pub fn reset(&mut self, population: usize) {
        *self = Stats {
            current_population: population as u64,
            ..Stats::default()
        };
    }

    /// Folds one generation transition into the counters.
    pub fn record_step(&mut self, summary: &StepSummary) {
        self.generation += 1;
        self.cells_created += summary.births as u64;
        self.cells_destroyed += summary.deaths as u64;
        self.current_population = summary.population as u64;
    }

    /// Average births per generation.
    pub fn birth_rate(&self) -> f64 {
        self.cells_created as f64 / self.generation.max(1) as f64
    }

    /// Average deaths per generation.
    pub fn death_rate(&self) -> f64 {
        self.cells_destroyed as f64 / self.generation.max(1) as f64
    }
}
