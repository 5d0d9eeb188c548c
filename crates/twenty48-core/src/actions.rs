//! Player actions and the events they produce.
//!
//! Front ends translate raw input into a [`GameAction`], hand it to
//! [`GameState::apply_action`](crate::GameState::apply_action), and react to the
//! returned [`GameEvent`]s.

use crate::grid::Coord;
use crate::moves::Direction;
use crate::status::GameStatus;
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Slide every tile toward a side of the board
    Move(Direction),
    /// Restore the state from before the last move
    Undo,
    /// Throw the board away and start over (best score is kept)
    Restart,
    /// Keep playing after reaching the win threshold
    KeepPlaying,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Tiles slid (and possibly merged)
    TilesMoved {
        direction: Direction,
        merged: Vec<Coord>,
    },

    /// A new tile appeared after a move
    TileSpawned { at: Coord, value: u32 },

    /// Merges earned points
    ScoreChanged { delta: u32, score: u32 },

    /// The best score was raised
    BestScoreChanged { best: u32 },

    /// The win threshold was reached for the first time
    GameWon { max_tile: u32 },

    /// No legal move remains
    GameOver { score: u32 },

    /// The last move was taken back
    MoveUndone { score: u32, status: GameStatus },

    /// A fresh board was dealt
    GameRestarted,

    /// The player chose to continue past a win
    KeepPlaying,
}
