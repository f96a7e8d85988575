//! Grid state store.
//!
//! A [`Grid`] is a fixed-size matrix of [`Cell`]s. Every coordinate access is
//! bound-checked and reports [`LifeError::IndexOutOfRange`] instead of
//! clamping; whole-grid operations check shapes before writing anything.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{LifeError, LifeResult};

/// A `(row, column)` coordinate.
pub type Coord = (usize, usize);

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Alive becomes Dead and Dead becomes Alive.
    pub fn toggled(self) -> Cell {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// A rows x columns matrix of cells with bounded edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    rows: usize,
    columns: usize,
}

impl Grid {
    /// Creates an all-Dead grid.
    ///
    /// # Arguments
    ///
    /// * `rows` - Number of rows, at least 1
    /// * `columns` - Number of columns, at least 1
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::EmptyGrid`] when either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> LifeResult<Grid> {
        if rows == 0 || columns == 0 {
            return Err(LifeError::EmptyGrid);
        }
        Ok(Grid {
            cells: vec![vec![Cell::Dead; columns]; rows],
            rows,
            columns,
        })
    }

    /// Creates a grid with the given coordinates Alive.
    ///
    /// # Arguments
    ///
    /// * `rows` - Number of rows
    /// * `columns` - Number of columns
    /// * `alive` - Coordinates to set Alive; duplicates are harmless
    ///
    /// # Errors
    ///
    /// [`LifeError::EmptyGrid`] for a zero dimension, or
    /// [`LifeError::IndexOutOfRange`] for the first coordinate that does not
    /// fit.
    pub fn with_alive(rows: usize, columns: usize, alive: &[Coord]) -> LifeResult<Grid> {
        let mut grid = Grid::new(rows, columns)?;
        for &(row, column) in alive {
            grid.set(row, column, Cell::Alive)?;
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns
    }

    fn check(&self, row: usize, column: usize) -> LifeResult<()> {
        if self.contains(row, column) {
            Ok(())
        } else {
            Err(LifeError::IndexOutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    pub(crate) fn check_same_shape(&self, other: &Grid) -> LifeResult<()> {
        if self.dimensions() == other.dimensions() {
            Ok(())
        } else {
            Err(LifeError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            })
        }
    }

    /// Reads the cell at `(row, column)`.
    ///
    /// # Errors
    ///
    /// [`LifeError::IndexOutOfRange`] if the coordinate is outside the grid.
    pub fn get(&self, row: usize, column: usize) -> LifeResult<Cell> {
        self.check(row, column)?;
        Ok(self.cells[row][column])
    }

    /// Writes the cell at `(row, column)`. Out-of-range writes fail and
    /// leave the grid untouched.
    pub fn set(&mut self, row: usize, column: usize, cell: Cell) -> LifeResult<()> {
        self.check(row, column)?;
        self.cells[row][column] = cell;
        Ok(())
    }

    /// Flips the cell at `(row, column)`.
    ///
    /// # Returns
    ///
    /// The cell's new value.
    ///
    /// # Errors
    ///
    /// [`LifeError::IndexOutOfRange`] if the coordinate is outside the grid.
    pub fn toggle(&mut self, row: usize, column: usize) -> LifeResult<Cell> {
        self.check(row, column)?;
        let cell = self.cells[row][column].toggled();
        self.cells[row][column] = cell;
        Ok(cell)
    }

    /// Unchecked read for callers that already iterate inside the bounds.
    pub(crate) fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        &mut self.cells[row]
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<Cell>] {
        &mut self.cells
    }

    /// Copies every cell of `source` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::DimensionMismatch`] if the shapes differ; `self`
    /// is left untouched in that case.
    pub fn copy_from(&mut self, source: &Grid) -> LifeResult<()> {
        self.check_same_shape(source)?;
        for (dest_row, source_row) in self.cells.iter_mut().zip(&source.cells) {
            dest_row.copy_from_slice(source_row);
        }
        Ok(())
    }

    /// Sets every cell to Dead.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::Dead);
        }
    }

    /// Number of Alive cells.
    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_alive())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    /// Coordinates of all Alive cells in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_alive())
                .map(move |(column, _)| (row, column))
        })
    }

    /// Compares two grids of the same shape cell by cell.
    ///
    /// # Arguments
    ///
    /// * `other` - The grid to compare against
    ///
    /// # Returns
    ///
    /// Coordinates whose value differs, in row-major order. Empty when the
    /// grids are equal.
    ///
    /// # Errors
    ///
    /// [`LifeError::DimensionMismatch`] if the shapes differ.
    pub fn diff(&self, other: &Grid) -> LifeResult<Vec<Coord>> {
        self.check_same_shape(other)?;
        let mut changed = Vec::new();
        for (row, (ours, theirs)) in self.cells.iter().zip(&other.cells).enumerate() {
            for (column, (a, b)) in ours.iter().zip(theirs).enumerate() {
                if a != b {
                    changed.push((row, column));
                }
            }
        }
        Ok(changed)
    }

    /// Writes the Alive cells of `pattern` with its top-left corner at
    /// `(top, left)`. Dead cells of the pattern leave the target unchanged.
    ///
    /// # Arguments
    ///
    /// * `pattern` - The cells to write
    /// * `top` - Row of the pattern's first row
    /// * `left` - Column of the pattern's first column
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::IndexOutOfRange`] if the pattern does not fit;
    /// nothing is written in that case.
    pub fn stamp(&mut self, pattern: &Grid, top: usize, left: usize) -> LifeResult<()> {
        let corner = top
            .checked_add(pattern.rows - 1)
            .zip(left.checked_add(pattern.columns - 1));
        let Some((bottom, right)) = corner else {
            return Err(LifeError::IndexOutOfRange {
                row: top,
                column: left,
                rows: self.rows,
                columns: self.columns,
            });
        };
        self.check(bottom, right)?;
        for (row, column) in pattern.alive_cells() {
            self.cells[top + row][left + column] = Cell::Alive;
        }
        Ok(())
    }

    /// Replaces every cell with a random value.
    ///
    /// # Arguments
    ///
    /// * `rng` - Source of randomness; a seeded one gives a repeatable board
    /// * `density` - Probability of a cell being Alive, clamped to `0.0..=1.0`
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = Cell::from(rng.gen_bool(density));
            }
        }
    }
}

/// Renders the grid as text: `#` for Alive, `.` for Dead, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the text format produced by `Display`.
///
/// `#`, `O` and `*` are Alive, `.` is Dead. Lines starting with `!` are
/// comments and blank lines are skipped. Every row must have the same width.
impl FromStr for Grid {
    type Err = LifeError;

    fn from_str(text: &str) -> LifeResult<Grid> {
        let mut cells: Vec<Vec<Cell>> = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }
            let row = line
                .chars()
                .map(|ch| match ch {
                    '#' | 'O' | '*' => Ok(Cell::Alive),
                    '.' => Ok(Cell::Dead),
                    other => Err(LifeError::parse(
                        line_no,
                        format!("unexpected character {other:?}"),
                    )),
                })
                .collect::<LifeResult<Vec<Cell>>>()?;
            if let Some(first) = cells.first() {
                if first.len() != row.len() {
                    return Err(LifeError::parse(
                        line_no,
                        format!("row has {} cells, expected {}", row.len(), first.len()),
                    ));
                }
            }
            cells.push(row);
        }

        let rows = cells.len();
        let columns = cells.first().map_or(0, Vec::len);
        if rows == 0 || columns == 0 {
            return Err(LifeError::EmptyGrid);
        }
        Ok(Grid {
            cells,
            rows,
            columns,
        })
    }
}

/// Copies `source` into `dest`.
pub fn copy_state(source: &Grid, dest: &mut Grid) -> LifeResult<()> {
    dest.copy_from(source)
}

/// Sets every cell of `grid` to Dead.
pub fn clear_state(grid: &mut Grid) {
    grid.clear();
}
