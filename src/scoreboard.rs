//! Top-3 scoreboard
//!
//! Persisted through `persistence::Profile` as a JSON array of integers.

use serde::{Deserialize, Serialize};

use crate::consts::SCOREBOARD_SIZE;

/// Best finalized session scores, highest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Scoreboard {
    scores: Vec<u32>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Build from arbitrary stored scores, restoring ordering and capacity
    pub fn from_scores(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(SCOREBOARD_SIZE);
        Self { scores }
    }

    /// Record a finalized session score.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn record(&mut self, score: u32) -> Option<usize> {
        // Insert after equal scores so earlier sessions keep their rank
        let pos = self
            .scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len());
        self.scores.insert(pos, score);
        self.scores.truncate(SCOREBOARD_SIZE);

        (pos < SCOREBOARD_SIZE).then_some(pos + 1)
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Score at a 1-indexed rank, if filled
    pub fn at_rank(&self, rank: usize) -> Option<u32> {
        rank.checked_sub(1).and_then(|i| self.scores.get(i).copied())
    }
}
