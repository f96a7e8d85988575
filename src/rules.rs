//! Conway's rule set over a bounded grid.
//!
//! * Any live cell with fewer than two live neighbors dies (underpopulation)
//! * Any live cell with two or three live neighbors survives
//! * Any live cell with more than three live neighbors dies (overpopulation)
//! * Any dead cell with exactly three live neighbors becomes alive (reproduction)
//!
//! Edges do not wrap: positions outside the grid are not neighbors at all.

use crate::error::{LifeError, LifeResult};
use crate::grid::{Cell, Grid};

static OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// In-bounds neighbor positions of `(row, column)`.
fn neighbors(grid: &Grid, row: usize, column: usize) -> impl Iterator<Item = (usize, usize)> {
    let (rows, columns) = grid.dimensions();
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = column.checked_add_signed(dc)?;
        (r < rows && c < columns).then_some((r, c))
    })
}

/// Counts the live neighbors of a cell known to be inside the grid.
pub(crate) fn live_neighbors(grid: &Grid, row: usize, column: usize) -> u8 {
    neighbors(grid, row, column)
        .filter(|&(r, c)| grid.cell(r, c).is_alive())
        .count() as u8
}

/// Counts the live neighbors of `(row, column)`.
///
/// # Returns
///
/// The number of Alive cells among the up-to-8 adjacent positions (0-8).
///
/// # Errors
///
/// [`LifeError::IndexOutOfRange`] if the coordinate is outside the grid.
pub fn neighbor_count(grid: &Grid, row: usize, column: usize) -> LifeResult<u8> {
    if !grid.contains(row, column) {
        return Err(LifeError::IndexOutOfRange {
            row,
            column,
            rows: grid.rows(),
            columns: grid.columns(),
        });
    }
    Ok(live_neighbors(grid, row, column))
}

/// Number of neighbor positions that exist: 3 at a corner, 5 on an edge,
/// 8 inside (fewer on grids thinner than three cells).
pub fn candidate_neighbors(grid: &Grid, row: usize, column: usize) -> LifeResult<u8> {
    neighbor_count(grid, row, column)?;
    Ok(neighbors(grid, row, column).count() as u8)
}

/// Outcome of the rule for one cell.
pub fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive,
        (Cell::Alive, _) => Cell::Dead,
        (Cell::Dead, 3) => Cell::Alive,
        (Cell::Dead, _) => Cell::Dead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table() {
        for n in 0..=8u8 {
            let survives = n == 2 || n == 3;
            assert_eq!(next_state(Cell::Alive, n), Cell::from(survives), "alive with {n}");
            assert_eq!(next_state(Cell::Dead, n), Cell::from(n == 3), "dead with {n}");
        }
    }

    #[test]
    fn candidate_positions_by_location() {
        let grid = Grid::new(40, 40).unwrap();
        assert_eq!(candidate_neighbors(&grid, 0, 0).unwrap(), 3);
        assert_eq!(candidate_neighbors(&grid, 39, 39).unwrap(), 3);
        assert_eq!(candidate_neighbors(&grid, 0, 17).unwrap(), 5);
        assert_eq!(candidate_neighbors(&grid, 17, 39).unwrap(), 5);
        assert_eq!(candidate_neighbors(&grid, 20, 20).unwrap(), 8);
    }

    #[test]
    fn full_grid_counts_are_bounded_by_edges() {
        let mut grid = Grid::new(3, 3).unwrap();
        for r in 0..3 {
            for c in 0..3 {
                grid.set(r, c, Cell::Alive).unwrap();
            }
        }
        assert_eq!(neighbor_count(&grid, 0, 0).unwrap(), 3);
        assert_eq!(neighbor_count(&grid, 0, 1).unwrap(), 5);
        assert_eq!(neighbor_count(&grid, 1, 1).unwrap(), 8);
    }

    #[test]
    fn cell_itself_is_not_counted() {
        let grid = Grid::with_alive(3, 3, &[(1, 1)]).unwrap();
        assert_eq!(neighbor_count(&grid, 1, 1).unwrap(), 0);
        assert_eq!(neighbor_count(&grid, 0, 0).unwrap(), 1);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let grid = Grid::with_alive(1, 1, &[(0, 0)]).unwrap();
        assert_eq!(candidate_neighbors(&grid, 0, 0).unwrap(), 0);
        assert_eq!(neighbor_count(&grid, 0, 0).unwrap(), 0);
    }

    #[test]
    fn out_of_range_coordinate_is_an_error() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(matches!(
            neighbor_count(&grid, 5, 0),
            Err(LifeError::IndexOutOfRange { row: 5, column: 0, .. })
        ));
        assert!(candidate_neighbors(&grid, 0, 9).is_err());
    }
}
