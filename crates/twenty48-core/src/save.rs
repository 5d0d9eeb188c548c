//! Persistent save format.
//!
//! The save is plain JSON: the grid as nested arrays, the scores, the status
//! and the undo history. Restoring never trusts the input; a save whose grid
//! has the wrong shape or holds impossible tile values is rejected so the
//! caller can fall back to a fresh game.

use crate::grid::Grid;
use crate::history::HistoryEntry;
use crate::status::GameStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while restoring a save
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Malformed save data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tile {value} at row {row}, column {col}")]
    InvalidTile { row: usize, col: usize, value: u32 },

    #[error("Invalid grid in history entry {index}")]
    InvalidHistory { index: usize },
}

/// Everything needed to resume a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    pub grid: Grid,
    pub score: u32,
    pub best: u32,
    pub status: GameStatus,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl SaveState {
    /// Parse and validate save JSON
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        let save: SaveState = serde_json::from_str(json)?;
        save.validate()?;
        Ok(save)
    }

    /// Best score from save JSON that may not hold a valid game.
    ///
    /// Anything short of an object with a numeric `best` field yields 0.
    pub fn recover_best(json: &str) -> u32 {
        serde_json::from_str::<serde_json::Value>(json)
            .ok()
            .and_then(|value| value.get("best")?.as_u64())
            .and_then(|best| u32::try_from(best).ok())
            .unwrap_or(0)
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check every grid for values that cannot occur in play
    pub fn validate(&self) -> Result<(), SaveError> {
        if let Some((at, value)) = self.grid.first_invalid_cell() {
            return Err(SaveError::InvalidTile {
                row: at.r,
                col: at.c,
                value,
            });
        }

        if let Some(index) = self.history.iter().position(|e| !e.grid.is_well_formed()) {
            return Err(SaveError::InvalidHistory { index });
        }

        Ok(())
    }
}
