//! Song catalog repository.

use super::{DbError, unique_or};
use jukebox_proto::Song;
use sqlx::SqlitePool;

type SongRow = (String, String, i64, Option<i64>, Option<i64>);

const SONG_COLUMNS: &str = "name, youtube_id, times_played, trim_start_seconds, trim_end_seconds";

fn song_from_row(
    (name, youtube_id, times_played, trim_start_seconds, trim_end_seconds): SongRow,
) -> Song {
    Song {
        name,
        youtube_id,
        times_played,
        trim_start_seconds,
        trim_end_seconds,
    }
}

/// Repository for song operations.
pub struct SongRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SongRepository<'a> {
    /// Create a new song repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a song by its exact title.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Song>, DbError> {
        let row = sqlx::query_as::<_, SongRow>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE name = ? LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(song_from_row))
    }

    /// Find a song by its YouTube id.
    pub async fn find_by_youtube_id(&self, youtube_id: &str) -> Result<Option<Song>, DbError> {
        let row = sqlx::query_as::<_, SongRow>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE youtube_id = ?"
        ))
        .bind(youtube_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(song_from_row))
    }

    /// Find every song whose YouTube id is in `youtube_ids`. Order is unspecified.
    pub async fn find_by_youtube_ids(&self, youtube_ids: &[String]) -> Result<Vec<Song>, DbError> {
        if youtube_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; youtube_ids.len()].join(", ");
        let query = format!("SELECT {SONG_COLUMNS} FROM songs WHERE youtube_id IN ({placeholders})");

        let mut q = sqlx::query_as::<_, SongRow>(&query);
        for id in youtube_ids {
            q = q.bind(id);
        }

        let rows = q.fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(song_from_row).collect())
    }

    /// All songs, most played first. `limit` of `None` returns everything.
    pub async fn find_all_ordered_by_times_played_desc(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<Song>, DbError> {
        // SQLite treats a negative LIMIT as "no limit".
        let rows = sqlx::query_as::<_, SongRow>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs ORDER BY times_played DESC, name ASC LIMIT ?"
        ))
        .bind(limit.unwrap_or(-1))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(song_from_row).collect())
    }

    /// Insert a new song.
    pub async fn insert(&self, song: &Song) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO songs (name, youtube_id, times_played, trim_start_seconds, trim_end_seconds)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&song.name)
        .bind(&song.youtube_id)
        .bind(song.times_played)
        .bind(song.trim_start_seconds)
        .bind(song.trim_end_seconds)
        .execute(self.pool)
        .await
        .map_err(|e| unique_or(e, || DbError::SongExists(song.youtube_id.clone())))?;

        Ok(())
    }

    /// Insert several songs in one transaction.
    pub async fn insert_many(&self, songs: &[Song]) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        for song in songs {
            sqlx::query(
                r#"
                INSERT INTO songs (name, youtube_id, times_played, trim_start_seconds, trim_end_seconds)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&song.name)
            .bind(&song.youtube_id)
            .bind(song.times_played)
            .bind(song.trim_start_seconds)
            .bind(song.trim_end_seconds)
            .execute(&mut *tx)
            .await
            .map_err(|e| unique_or(e, || DbError::SongExists(song.youtube_id.clone())))?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Bump the play counter by one. Returns false when the song is unknown.
    pub async fn increment_times_played(&self, youtube_id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE songs SET times_played = times_played + 1 WHERE youtube_id = ?")
            .bind(youtube_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{Database, DbError};
    use jukebox_proto::Song;

    async fn seeded() -> Database {
        let db = Database::new(":memory:").await.unwrap();
        let mut popular = Song::new("Toxic", "LOZuxwVk7TU");
        popular.times_played = 12;
        let mut middling = Song::new("Lucky", "aK9d2HnSvXw");
        middling.times_played = 3;
        db.songs().insert_many(&[popular, middling, Song::new("Sometimes", "t0bPrt69rag")])
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn finds_by_name_and_id() {
        let db = seeded().await;
        let by_name = db.songs().find_by_name("Lucky").await.unwrap().unwrap();
        assert_eq!(by_name.youtube_id, "aK9d2HnSvXw");

        let by_id = db.songs().find_by_youtube_id("LOZuxwVk7TU").await.unwrap().unwrap();
        assert_eq!(by_id.name, "Toxic");
        assert_eq!(by_id.times_played, 12);

        assert!(db.songs().find_by_name("lucky").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn orders_by_play_count() {
        let db = seeded().await;
        let all = db.songs().find_all_ordered_by_times_played_desc(None).await.unwrap();
        let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Toxic", "Lucky", "Sometimes"]);

        let top = db.songs().find_all_ordered_by_times_played_desc(Some(1)).await.unwrap();
        assert_eq!(top.len(), 1);
    }

    #[tokio::test]
    async fn finds_many_by_id() {
        let db = seeded().await;
        let ids = vec!["LOZuxwVk7TU".to_string(), "missing".to_string(), "t0bPrt69rag".to_string()];
        let found = db.songs().find_by_youtube_ids(&ids).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(db.songs().find_by_youtube_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let db = seeded().await;
        let err = db.songs().insert(&Song::new("Toxic (live)", "LOZuxwVk7TU")).await.unwrap_err();
        assert!(matches!(err, DbError::SongExists(id) if id == "LOZuxwVk7TU"));
    }

    #[tokio::test]
    async fn increments_play_count() {
        let db = seeded().await;
        assert!(db.songs().increment_times_played("t0bPrt69rag").await.unwrap());
        assert!(db.songs().increment_times_played("t0bPrt69rag").await.unwrap());
        assert!(!db.songs().increment_times_played("missing").await.unwrap());
        let song = db.songs().find_by_youtube_id("t0bPrt69rag").await.unwrap().unwrap();
        assert_eq!(song.times_played, 2);
    }
}
