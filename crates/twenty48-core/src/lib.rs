//! twenty48 - engine for a 2048-style sliding tile puzzle
//!
//! This crate provides the core game logic, including:
//! - The 4x4 grid and its tile invariants
//! - The slide-and-merge rule for a single line and for the whole board
//! - Random tile spawning behind an injectable RNG
//! - Win / game-over detection
//! - A session state machine with score, best score and bounded undo
//! - A validated JSON save format
//!
//! # Architecture
//!
//! Every board transformation is a pure function from `&Grid` to a fresh
//! `Grid`. Only [`GameState`] holds mutable state, and it only changes through
//! [`GameState::apply_action`]. The crate can be compiled natively or, with the
//! `wasm` feature, to WebAssembly for a browser front end.
//!
//! # Modules
//!
//! - [`grid`]: Board representation and coordinates
//! - [`line`]: Compact-and-merge for one row or column
//! - [`moves`]: Directional moves and merge effects
//! - [`spawn`]: Random tile placement
//! - [`status`]: Game status and terminal-state detection
//! - [`history`]: Bounded undo history
//! - [`game`]: Session state machine
//! - [`save`]: Save format and validation

pub mod actions;
pub mod config;
pub mod game;
pub mod grid;
pub mod history;
pub mod line;
pub mod moves;
pub mod save;
pub mod spawn;
pub mod status;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use config::{GameConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_WIN_THRESHOLD};
pub use game::{GameError, GameState};
pub use grid::{empty_grid, Coord, Grid, Line, MAX_TILE, MIN_TILE, SIZE};
pub use history::{History, HistoryEntry};
pub use line::{reduce_line, LineReduction};
pub use moves::{apply_move, Direction, MoveEffects, MoveResult};
pub use save::{SaveError, SaveState};
pub use spawn::{spawn_random_tile, Spawn};
pub use status::{has_moves, max_tile, GameStatus};
