//! High score leaderboard and personal record
//!
//! The leaderboard keeps the top 20 runs, sorted by score descending.

use serde::{Deserialize, Serialize};

/// Maximum number of leaderboard entries to keep
pub const MAX_LEADERBOARD_ENTRIES: usize = 20;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// Cosmetic avatar image, base64 encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_base64: Option<String>,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuild from stored entries, restoring order and cap
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if it would be cut)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        let rank = self.insertion_index(score) + 1;
        (rank <= MAX_LEADERBOARD_ENTRIES).then_some(rank)
    }

    /// Insert an entry below any equal scores and trim to the cap.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn submit(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let index = self.insertion_index(entry.score);
        if index >= MAX_LEADERBOARD_ENTRIES {
            return None;
        }
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Some(index + 1)
    }

    fn insertion_index(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }
}

/// Best score on this device, with the profile that set it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalRecord {
    pub name: String,
    pub score: u64,
    pub dedication: String,
}

impl Default for PersonalRecord {
    fn default() -> Self {
        Self {
            name: "Player 1".to_string(),
            score: 0,
            dedication: String::new(),
        }
    }
}
