//! Generation stepper.
//!
//! A step reads only from the current generation and writes only into the
//! scratch buffer, so the order in which cells are visited cannot change the
//! result. That is what makes the row-parallel pass safe.

use rayon::prelude::*;

use crate::error::LifeResult;
use crate::grid::{Coord, Grid};
use crate::rules::{live_neighbors, next_state};

/// How a step visits the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Row-major, single thread.
    #[default]
    Sequential,
    /// One rayon task per row.
    Parallel,
}

/// What changed during one generation transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepSummary {
    /// Dead cells that became Alive
    pub births: usize,
    /// Alive cells that became Dead
    pub deaths: usize,
    /// Alive cells after the step
    pub population: usize,
    /// Every coordinate whose value changed, row-major
    pub changed: Vec<Coord>,
}

/// Writes the successor of `current` into every cell of `next`.
fn compute_next(current: &Grid, next: &mut Grid, strategy: Strategy) {
    match strategy {
        Strategy::Sequential => {
            for row in 0..current.rows() {
                for (column, cell) in next.row_mut(row).iter_mut().enumerate() {
                    *cell = next_state(
                        current.cell(row, column),
                        live_neighbors(current, row, column),
                    );
                }
            }
        }
        Strategy::Parallel => {
            next.rows_mut()
                .par_iter_mut()
                .enumerate()
                .for_each(|(row, cells)| {
                    for (column, cell) in cells.iter_mut().enumerate() {
                        *cell = next_state(
                            current.cell(row, column),
                            live_neighbors(current, row, column),
                        );
                    }
                });
        }
    }
}

/// Performs one generation transition.
///
/// Computes the next generation of `current` into `next`, promotes it into
/// `current` and clears `next`.
///
/// # Errors
///
/// [`crate::LifeError::DimensionMismatch`] if the two grids differ in shape;
/// neither grid is modified in that case.
pub fn step(current: &mut Grid, next: &mut Grid, strategy: Strategy) -> LifeResult<StepSummary> {
    current.check_same_shape(next)?;
    compute_next(current, next, strategy);

    let changed = current.diff(next)?;
    let births = changed
        .iter()
        .filter(|&&(row, column)| next.cell(row, column).is_alive())
        .count();
    let deaths = changed.len() - births;

    current.copy_from(next)?;
    next.clear();

    Ok(StepSummary {
        births,
        deaths,
        population: current.population(),
        changed,
    })
}
