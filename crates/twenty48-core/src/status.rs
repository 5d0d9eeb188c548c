//! Game status and terminal-state detection.

use crate::grid::{Grid, SIZE};
use serde::{Deserialize, Serialize};

/// Where the game currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Normal play
    #[default]
    Playing,
    /// The win threshold was just reached; waiting for the player to continue or restart
    Won,
    /// No legal move remains
    Over,
    /// Playing on after a win
    Continue,
}

impl GameStatus {
    /// Whether move input is accepted in this status
    pub fn accepts_moves(&self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::Continue)
    }
}

/// Whether any direction can still change the grid.
///
/// A full grid is stuck only when no cell matches its right or lower neighbour.
pub fn has_moves(grid: &Grid) -> bool {
    if !grid.empty_cells().is_empty() {
        return true;
    }

    let rows = grid.rows();
    for r in 0..SIZE {
        for c in 0..SIZE {
            let value = rows[r][c];
            if r + 1 < SIZE && rows[r + 1][c] == value {
                return true;
            }
            if c + 1 < SIZE && rows[r][c + 1] == value {
                return true;
            }
        }
    }
    false
}

/// Largest tile on the grid (0 when empty)
pub fn max_tile(grid: &Grid) -> u32 {
    grid.max_tile()
}
