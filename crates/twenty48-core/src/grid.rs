//! Board representation for the 4x4 puzzle grid.
//!
//! The grid is a fixed-size, row-major matrix of tile values where `0` marks an
//! empty cell and every other value is a power of two (2, 4, 8, ...).
//!
//! Every transformation in the crate takes a `&Grid` and hands back a fresh
//! one, so callers can always compare the board before and after a move.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the square board
pub const SIZE: usize = 4;

/// Smallest tile value that can appear on the board
pub const MIN_TILE: u32 = 2;

/// Largest tile a 4x4 board can ever build (2^17)
pub const MAX_TILE: u32 = 1 << 17;

/// A single line (row or column) of the board
pub type Line = [u32; SIZE];

/// Cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row (0 is the top row)
    pub r: usize,
    /// Column (0 is the leftmost column)
    pub c: usize,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }
}

/// The game grid - 4 rows x 4 columns of tile values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [Line; SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [[0; SIZE]; SIZE],
        }
    }

    /// Build a grid from explicit rows
    pub const fn from_rows(cells: [Line; SIZE]) -> Self {
        Self { cells }
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Line; SIZE] {
        &self.cells
    }

    /// Tile value at a coordinate, `None` if out of bounds
    pub fn get(&self, at: Coord) -> Option<u32> {
        self.cells.get(at.r).and_then(|row| row.get(at.c)).copied()
    }

    /// Copy of the grid with one cell replaced.
    ///
    /// Out-of-bounds coordinates leave the copy unchanged.
    pub fn with_tile(&self, at: Coord, value: u32) -> Self {
        let mut next = self.clone();
        if let Some(cell) = next.cells.get_mut(at.r).and_then(|row| row.get_mut(at.c)) {
            *cell = value;
        }
        next
    }

    /// Row `r`, left to right
    pub fn row(&self, r: usize) -> Line {
        self.cells[r]
    }

    /// Column `c`, top to bottom
    pub fn column(&self, c: usize) -> Line {
        std::array::from_fn(|r| self.cells[r][c])
    }

    pub(crate) fn set_row(&mut self, r: usize, line: Line) {
        self.cells[r] = line;
    }

    pub(crate) fn set_column(&mut self, c: usize, line: Line) {
        for (r, value) in line.into_iter().enumerate() {
            self.cells[r][c] = value;
        }
    }

    /// Coordinates of every empty cell in row-major order
    pub fn empty_cells(&self) -> Vec<Coord> {
        let mut cells = Vec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 0 {
                    cells.push(Coord::new(r, c));
                }
            }
        }
        cells
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    /// Largest tile on the board (0 when empty)
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Whether every cell is either empty or a reachable tile value
    pub fn is_well_formed(&self) -> bool {
        self.first_invalid_cell().is_none()
    }

    /// First cell holding a value that can never appear in play
    pub(crate) fn first_invalid_cell(&self) -> Option<(Coord, u32)> {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if !is_tile_value(value) {
                    return Some((Coord::new(r, c), value));
                }
            }
        }
        None
    }
}

/// `0` or a power of two reachable by doubling from 2
pub fn is_tile_value(value: u32) -> bool {
    value == 0 || ((MIN_TILE..=MAX_TILE).contains(&value) && value.is_power_of_two())
}

/// Create an empty grid
pub fn empty_grid() -> Grid {
    Grid::new()
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().max(MIN_TILE).to_string().len();
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if value == 0 {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{:>width$}", value)?;
                }
            }
        }
        Ok(())
    }
}
