use std::sync::Arc;

use play_core::Clock;
use play_core::model::GameId;
use serde_json::Value;
use storage::repository::{ProgressRecord, ProgressRepository, progress_key};

/// Saves and restores per-game progress, never letting a persistence
/// failure reach gameplay.
///
/// Writes stamp the payload with the clock's current time and go under the
/// game's namespaced key, last write wins. Failures on either side are
/// logged as warnings and otherwise swallowed: a failed save is silently
/// lost, a failed load reads as "no progress".
#[derive(Clone)]
pub struct ProgressStore {
    repo: Arc<dyn ProgressRepository>,
    clock: Clock,
}

impl ProgressStore {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>, clock: Clock) -> Self {
        Self { repo, clock }
    }

    /// Persists `payload` as the game's current progress.
    pub async fn save(&self, game: &GameId, payload: Value) {
        let record = ProgressRecord {
            game_key: progress_key(game),
            payload,
            saved_at: self.clock.now(),
        };

        if let Err(error) = self.repo.upsert_progress(&record).await {
            tracing::warn!(game = %game, %error, "could not save progress");
        }
    }

    /// Loads the game's saved progress, `None` when absent or unreadable.
    pub async fn load(&self, game: &GameId) -> Option<ProgressRecord> {
        match self.repo.get_progress(&progress_key(game)).await {
            Ok(found) => found,
            Err(error) => {
                tracing::warn!(game = %game, %error, "could not load progress");
                None
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use play_core::time::{fixed_clock, fixed_now};
    use serde_json::json;
    use storage::repository::{InMemoryRepository, StorageError};

    struct BrokenRepository;

    #[async_trait]
    impl ProgressRepository for BrokenRepository {
        async fn upsert_progress(&self, _record: &ProgressRecord) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk on fire".into()))
        }

        async fn get_progress(
            &self,
            _game_key: &str,
        ) -> Result<Option<ProgressRecord>, StorageError> {
            Err(StorageError::Connection("disk on fire".into()))
        }
    }

    fn game(raw: &str) -> GameId {
        raw.parse().unwrap()
    }

    #[tokio::test]
    async fn save_then_load_round_trips_with_timestamp() {
        let store = ProgressStore::new(Arc::new(InMemoryRepository::new()), fixed_clock());
        let id = game("sequence-builder");

        store.save(&id, json!({ "stage": 4, "hints": 1 })).await;

        let record = store.load(&id).await.expect("progress saved");
        assert_eq!(record.payload, json!({ "stage": 4, "hints": 1 }));
        assert_eq!(record.saved_at, fixed_now());
        assert_eq!(record.game_key, "play_progress:sequence-builder");
    }

    #[tokio::test]
    async fn load_without_save_is_none() {
        let store = ProgressStore::new(Arc::new(InMemoryRepository::new()), fixed_clock());
        assert!(store.load(&game("untouched")).await.is_none());
    }

    #[tokio::test]
    async fn later_save_replaces_earlier() {
        let store = ProgressStore::new(Arc::new(InMemoryRepository::new()), fixed_clock());
        let id = game("quiz");

        store.save(&id, json!({ "stage": 1 })).await;
        store.save(&id, json!({ "stage": 2 })).await;

        let record = store.load(&id).await.unwrap();
        assert_eq!(record.payload, json!({ "stage": 2 }));
    }

    #[tokio::test]
    async fn persistence_failures_are_swallowed() {
        let store = ProgressStore::new(Arc::new(BrokenRepository), fixed_clock());
        let id = game("quiz");

        // neither call may panic or surface an error
        store.save(&id, json!({ "stage": 1 })).await;
        assert!(store.load(&id).await.is_none());
    }
}
