//! Record persistence
//!
//! Features:
//! - JSON values behind a small `Storage` trait (files natively, memory in tests)
//! - Leaderboard merge/sort/cap on every submitted run
//! - Malformed or unreadable data falls back to defaults and never reaches
//!   gameplay as an error

pub mod error;
pub mod storage;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use error::{PersistenceError, Result};
pub use storage::{FileStorage, MemoryStorage, Storage};

use crate::highscores::{Leaderboard, LeaderboardEntry, PersonalRecord};

/// Storage key for the leaderboard
pub const LEADERBOARD_KEY: &str = "neon_dash_leaderboard";
/// Storage key for the personal record
pub const RECORD_KEY: &str = "neon_dash_record";

/// Where finished runs go
pub trait RunRecorder {
    /// Best score recorded so far
    fn high_score(&self) -> u64;

    /// Persist a finished run. `entry` is None for scoreless runs; the
    /// record always carries the best score including this run.
    fn record_run(&mut self, entry: Option<LeaderboardEntry>, record: PersonalRecord);
}

/// Read and decode `key`, falling back to the default on any failure
pub fn load_or_default<T, S>(storage: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: Storage + ?Sized,
{
    match storage.read(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding malformed {key}: {e}");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Could not read {key}: {e}");
            T::default()
        }
    }
}

/// Encode and write `value` under `key`
pub fn save<T, S>(storage: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: Storage + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.write(key, &json)
}

/// Leaderboard and personal record kept in a `Storage`
#[derive(Debug, Clone)]
pub struct RecordStore<S: Storage> {
    storage: S,
    leaderboard: Leaderboard,
    record: PersonalRecord,
}

impl<S: Storage> RecordStore<S> {
    /// Load both collections, substituting defaults for anything unreadable
    pub fn open(storage: S) -> Self {
        let entries: Vec<LeaderboardEntry> = load_or_default(&storage, LEADERBOARD_KEY);
        let leaderboard = Leaderboard::from_entries(entries);
        let record: PersonalRecord = load_or_default(&storage, RECORD_KEY);
        log::info!(
            "Loaded {} leaderboard entries, high score {}",
            leaderboard.len(),
            record.score
        );
        Self {
            storage,
            leaderboard,
            record,
        }
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn record(&self) -> &PersonalRecord {
        &self.record
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn flush(&mut self) {
        if let Err(e) = save(&mut self.storage, LEADERBOARD_KEY, &self.leaderboard) {
            log::warn!("Failed to save leaderboard: {e}");
        }
        if let Err(e) = save(&mut self.storage, RECORD_KEY, &self.record) {
            log::warn!("Failed to save personal record: {e}");
        }
    }
}

impl<S: Storage> RunRecorder for RecordStore<S> {
    fn high_score(&self) -> u64 {
        self.record.score
    }

    fn record_run(&mut self, entry: Option<LeaderboardEntry>, record: PersonalRecord) {
        if let Some(entry) = entry {
            let name = entry.name.clone();
            let score = entry.score;
            match self.leaderboard.submit(entry) {
                Some(rank) => log::info!("{name} placed #{rank} with {score}"),
                None => log::info!("{name} scored {score}, off the leaderboard"),
            }
        }
        self.record = record;
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
            avatar_base64: None,
            timestamp: 1.0,
        }
    }

    fn record(score: u64) -> PersonalRecord {
        PersonalRecord {
            score,
            ..Default::default()
        }
    }

    #[test]
    fn test_malformed_data_uses_defaults() {
        let storage = MemoryStorage::new()
            .with(LEADERBOARD_KEY, "{not json")
            .with(RECORD_KEY, "[1, 2, 3]");
        let store = RecordStore::open(storage);
        assert!(store.leaderboard().is_empty());
        assert_eq!(store.high_score(), 0);
        assert_eq!(store.record(), &PersonalRecord::default());
    }

    #[test]
    fn test_first_run_lands_on_empty_board() {
        let mut store = RecordStore::open(MemoryStorage::new());
        store.record_run(Some(entry("Ada", 500)), record(500));

        let entries = store.leaderboard().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Ada");
        assert_eq!(entries[0].score, 500);
        assert_eq!(store.high_score(), 500);

        // Written through to storage
        let reopened = RecordStore::open(store.storage().clone());
        assert_eq!(reopened.leaderboard(), store.leaderboard());
        assert_eq!(reopened.high_score(), 500);
    }

    #[test]
    fn test_lower_run_keeps_record_but_joins_board() {
        let mut store = RecordStore::open(MemoryStorage::new());
        store.record_run(Some(entry("Ada", 200)), record(200));
        store.record_run(Some(entry("Ada", 100)), record(200));

        assert_eq!(store.high_score(), 200);
        let scores: Vec<u64> = store.leaderboard().entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![200, 100]);
    }

    #[test]
    fn test_failed_save_is_not_fatal() {
        let mut store = RecordStore::open(MemoryStorage::new().read_only());
        store.record_run(Some(entry("Ada", 300)), record(300));
        // In-memory state still updated
        assert_eq!(store.high_score(), 300);
        assert_eq!(store.storage().get(LEADERBOARD_KEY), None);
    }

    #[test]
    fn test_unsorted_stored_board_is_repaired() {
        let json = serde_json::to_string(&vec![entry("a", 1), entry("b", 9), entry("c", 5)]).unwrap();
        let store = RecordStore::open(MemoryStorage::new().with(LEADERBOARD_KEY, &json));
        let scores: Vec<u64> = store.leaderboard().entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 5, 1]);
    }
}
