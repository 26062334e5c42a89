use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use crate::repository::{ProgressRecord, ProgressRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&record.payload).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO progress (game_key, payload, saved_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(game_key) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at
            ",
        )
        .bind(&record.game_key)
        .bind(payload)
        .bind(record.saved_at)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_progress(&self, game_key: &str) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT game_key, payload, saved_at
            FROM progress WHERE game_key = ?1
            ",
        )
        .bind(game_key)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => progress_from_row(&row).map(Some),
            None => Ok(None),
        }
    }
}

fn progress_from_row(row: &SqliteRow) -> Result<ProgressRecord, StorageError> {
    let payload_raw: String = row.try_get("payload").map_err(ser)?;
    let payload = serde_json::from_str(&payload_raw).map_err(ser)?;

    Ok(ProgressRecord {
        game_key: row.try_get("game_key").map_err(ser)?,
        payload,
        saved_at: row.try_get("saved_at").map_err(ser)?,
    })
}
