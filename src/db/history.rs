//! Play history repository.

use super::DbError;
use serde::Serialize;
use sqlx::SqlitePool;

/// One queued song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unix timestamp (seconds).
    pub played_at: i64,
    pub youtube_id: String,
    /// Who queued it.
    pub user: String,
}

/// Repository for history operations.
pub struct HistoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> HistoryRepository<'a> {
    /// Create a new history repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record an entry.
    pub async fn insert(&self, entry: &HistoryEntry) -> Result<(), DbError> {
        sqlx::query("INSERT INTO history (played_at, youtube_id, user) VALUES (?, ?, ?)")
            .bind(entry.played_at)
            .bind(&entry.youtube_id)
            .bind(&entry.user)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Every entry, newest first.
    pub async fn find_all_order_by_date_desc(&self) -> Result<Vec<HistoryEntry>, DbError> {
        let rows = sqlx::query_as::<_, (i64, String, String)>(
            r#"
            SELECT played_at, youtube_id, user
            FROM history
            ORDER BY played_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(played_at, youtube_id, user)| HistoryEntry {
                played_at,
                youtube_id,
                user,
            })
            .collect())
    }
}
