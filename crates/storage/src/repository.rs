use async_trait::async_trait;
use chrono::{DateTime, Utc};
use play_core::model::GameId;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
///
/// Callers above the progress store treat every variant as non-fatal;
/// nothing here is allowed to interrupt gameplay.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Fixed prefix namespacing every progress key.
pub const PROGRESS_KEY_PREFIX: &str = "play_progress:";

/// Builds the namespaced storage key for a game's progress record.
#[must_use]
pub fn progress_key(game: &GameId) -> String {
    format!("{PROGRESS_KEY_PREFIX}{game}")
}

/// Persisted shape for one game's saved progress.
///
/// One record per game key, last write wins; the payload is whatever
/// structured data the game chose to save, stamped with its save time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub game_key: String,
    pub payload: Value,
    pub saved_at: DateTime<Utc>,
}

/// Repository contract for progress records.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Persist or replace the record stored under its game key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Fetch the record stored under `game_key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read or decode fails.
    async fn get_progress(&self, game_key: &str) -> Result<Option<ProgressRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<HashMap<String, ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.game_key.clone(), record.clone());
        Ok(())
    }

    async fn get_progress(&self, game_key: &str) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(game_key).cloned())
    }
}

/// Aggregates the progress repository behind a trait object for easy
/// backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            progress: Arc::new(InMemoryRepository::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::time::fixed_now;
    use serde_json::json;

    fn record(game_key: &str, level: u32) -> ProgressRecord {
        ProgressRecord {
            game_key: game_key.to_owned(),
            payload: json!({ "level": level }),
            saved_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn round_trips_progress() {
        let repo = InMemoryRepository::new();
        let stored = record("play_progress:quiz", 3);
        repo.upsert_progress(&stored).await.unwrap();

        let found = repo.get_progress("play_progress:quiz").await.unwrap();
        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn absent_key_reads_as_none() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get_progress("play_progress:nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let repo = InMemoryRepository::new();
        repo.upsert_progress(&record("play_progress:quiz", 1))
            .await
            .unwrap();
        repo.upsert_progress(&record("play_progress:quiz", 2))
            .await
            .unwrap();

        let found = repo
            .get_progress("play_progress:quiz")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.payload["level"], 2);
    }

    #[test]
    fn progress_key_applies_fixed_prefix() {
        let game: GameId = "word-match".parse().unwrap();
        assert_eq!(progress_key(&game), "play_progress:word-match");
    }
}
