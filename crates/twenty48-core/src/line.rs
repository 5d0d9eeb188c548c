//! Compact-and-merge for a single row or column.
//!
//! Lines are always reduced toward index 0. Callers that slide toward the
//! far end reverse the line first and reverse the result back.

use crate::grid::{Line, SIZE};

/// Outcome of reducing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReduction {
    /// Resulting values, zero-padded on the right
    pub values: Line,
    /// Sum of every merged tile's value
    pub score_delta: u32,
    /// Whether `values` differs from the input
    pub moved: bool,
    /// Output indices where a merge product landed
    pub merged: Vec<usize>,
}

/// Slide every tile toward index 0, merging equal neighbours once.
pub fn reduce_line(line: Line) -> LineReduction {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut values = [0; SIZE];
    let mut merged = Vec::new();
    let mut score_delta: u32 = 0;
    let mut out = 0;
    let mut i = 0;

    while i < tiles.len() {
        let value = tiles[i];
        // Tiles too large to double stay put
        let doubled = (tiles.get(i + 1) == Some(&value))
            .then(|| value.checked_mul(2))
            .flatten();
        if let Some(doubled) = doubled {
            values[out] = doubled;
            merged.push(out);
            score_delta = score_delta.saturating_add(doubled);
            // A merge product never merges again this move
            i += 2;
        } else {
            values[out] = value;
            i += 1;
        }
        out += 1;
    }

    LineReduction {
        values,
        score_delta,
        moved: values != line,
        merged,
    }
}
