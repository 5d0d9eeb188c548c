//! Directional moves over the whole grid.
//!
//! Right and Down are handled by reversing each line, reducing it as if it
//! slid left, and reversing the result back. Merge positions go through the
//! same mapping (`SIZE - 1 - i`) so effects always land in grid coordinates.

use crate::grid::{Coord, Grid, Line, SIZE};
use crate::line::reduce_line;
use serde::{Deserialize, Serialize};

/// Slide direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Whether tiles travel toward the high-index end of each line
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// Whether lines are rows (as opposed to columns)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Presentation hints for the most recent turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEffects {
    /// Tiles that were spawned
    pub new_tiles: Vec<Coord>,
    /// Cells holding the product of a merge
    pub merged_tiles: Vec<Coord>,
}

impl MoveEffects {
    pub fn is_empty(&self) -> bool {
        self.new_tiles.is_empty() && self.merged_tiles.is_empty()
    }
}

/// Outcome of applying a direction to a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// The transformed grid
    pub grid: Grid,
    /// Whether any tile changed position or value
    pub moved: bool,
    /// Points earned by merges in this move
    pub score_delta: u32,
    /// Merge positions (no spawns yet)
    pub effects: MoveEffects,
}

/// Slide and merge every line of `grid` toward `direction`.
pub fn apply_move(grid: &Grid, direction: Direction) -> MoveResult {
    let mut next = grid.clone();
    let mut moved = false;
    let mut score_delta = 0;
    let mut effects = MoveEffects::default();
    let reversed = direction.is_reversed();

    for index in 0..SIZE {
        let raw = if direction.is_horizontal() {
            grid.row(index)
        } else {
            grid.column(index)
        };

        let reduced = reduce_line(orient(raw, reversed));
        let line = orient(reduced.values, reversed);

        if direction.is_horizontal() {
            next.set_row(index, line);
        } else {
            next.set_column(index, line);
        }

        moved |= reduced.moved;
        score_delta += reduced.score_delta;

        for merged in reduced.merged {
            let pos = if reversed { SIZE - 1 - merged } else { merged };
            let at = if direction.is_horizontal() {
                Coord::new(index, pos)
            } else {
                Coord::new(pos, index)
            };
            effects.merged_tiles.push(at);
        }
    }

    MoveResult {
        grid: next,
        moved,
        score_delta,
        effects,
    }
}

fn orient(mut line: Line, reversed: bool) -> Line {
    if reversed {
        line.reverse();
    }
    line
}
