//! Environment-driven settings for the terminal front end.

use anyhow::Context;
use std::path::PathBuf;
use twenty48_core::{GameConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_WIN_THRESHOLD};

const DEFAULT_SAVE_PATH: &str = "2048-save.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub game: GameConfig,
    pub save_path: PathBuf,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let win_threshold: u32 = lookup("TWENTY48_WIN_THRESHOLD")
            .unwrap_or_else(|| DEFAULT_WIN_THRESHOLD.to_string())
            .parse()
            .context("TWENTY48_WIN_THRESHOLD must be a number")?;

        let history_limit: usize = lookup("TWENTY48_HISTORY_LIMIT")
            .unwrap_or_else(|| DEFAULT_HISTORY_LIMIT.to_string())
            .parse()
            .context("TWENTY48_HISTORY_LIMIT must be a number")?;

        let save_path: PathBuf = lookup("TWENTY48_SAVE_PATH")
            .unwrap_or_else(|| DEFAULT_SAVE_PATH.into())
            .into();

        Ok(Self {
            game: GameConfig::new(win_threshold, history_limit)?,
            save_path,
        })
    }
}
