//! Caller-supplied game settings.

use crate::game::GameError;
use crate::grid::MIN_TILE;
use serde::{Deserialize, Serialize};

/// Tile value that wins the game by default
pub const DEFAULT_WIN_THRESHOLD: u32 = 128;

/// Undo snapshots kept by default
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Settings that shape a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Reaching a tile of this value wins the game
    pub win_threshold: u32,
    /// Maximum number of undo snapshots
    pub history_limit: usize,
}

impl GameConfig {
    pub fn new(win_threshold: u32, history_limit: usize) -> Result<Self, GameError> {
        let config = Self {
            win_threshold,
            history_limit,
        };
        config.validate()?;
        Ok(config)
    }

    /// The threshold must be a tile value that can actually be produced by a merge
    pub fn validate(&self) -> Result<(), GameError> {
        if self.win_threshold <= MIN_TILE || !self.win_threshold.is_power_of_two() {
            return Err(GameError::InvalidConfig(format!(
                "win threshold {} is not a power of two above {}",
                self.win_threshold, MIN_TILE
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_threshold: DEFAULT_WIN_THRESHOLD,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
