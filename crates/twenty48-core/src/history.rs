//! Bounded undo history.
//!
//! Snapshots are kept oldest first. Once the limit is reached, pushing a new
//! snapshot evicts the oldest one; undo always takes the newest.

use crate::grid::Grid;
use crate::status::GameStatus;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// State captured right before a move was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub grid: Grid,
    pub score: u32,
    pub status: GameStatus,
}

/// FIFO-evicting stack of snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl History {
    /// Create an empty history holding at most `limit` entries
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Rebuild from a list of entries (oldest first), keeping the newest `limit`
    pub fn from_entries(entries: Vec<HistoryEntry>, limit: usize) -> Self {
        let mut history = Self::new(limit);
        for entry in entries {
            history.push(entry);
        }
        history
    }

    /// Maximum number of retained entries
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a snapshot, dropping the oldest ones beyond the limit
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Remove and return the newest snapshot
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}
