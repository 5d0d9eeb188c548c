//! Save file handling.

use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use twenty48_core::{GameConfig, GameState, SaveState};

/// JSON save file on disk
#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resume the saved game, or start a new one if there is no usable save.
    ///
    /// A save that fails validation is discarded, not treated as fatal.
    pub fn load(&self, config: GameConfig) -> anyhow::Result<GameState> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No save at {}, starting a new game", self.path.display());
                return Ok(GameState::new(config));
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };

        match SaveState::from_json(&json).and_then(|save| GameState::from_save(save, config)) {
            Ok(game) => {
                info!(
                    "Resumed game from {} (score {})",
                    self.path.display(),
                    game.score
                );
                Ok(game)
            }
            Err(e) => {
                warn!("Discarding save at {}: {}", self.path.display(), e);
                Ok(GameState::replacing_save(&json, config))
            }
        }
    }

    /// Write the game, replacing the previous save in one rename
    pub fn store(&self, game: &GameState) -> anyhow::Result<()> {
        let json = game.to_save().to_json()?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}
