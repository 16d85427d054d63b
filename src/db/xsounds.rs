//! Sound effect repository.

use super::{DbError, unique_or};
use sqlx::SqlitePool;

/// A sound effect that players mix over the music.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XSound {
    pub name: String,
    pub url: String,
}

/// Repository for sound effect operations.
pub struct XSoundRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> XSoundRepository<'a> {
    /// Create a new sound repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a sound by name (case-insensitive).
    pub async fn find_by_name(&self, name: &str) -> Result<Option<XSound>, DbError> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT name, url FROM x_sounds WHERE name = ? COLLATE NOCASE",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(name, url)| XSound { name, url }))
    }

    /// Insert a new sound.
    pub async fn insert(&self, sound: &XSound) -> Result<(), DbError> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query("INSERT INTO x_sounds (name, url, created_at) VALUES (?, ?, ?)")
            .bind(&sound.name)
            .bind(&sound.url)
            .bind(now)
            .execute(self.pool)
            .await
            .map_err(|e| unique_or(e, || DbError::SoundExists(sound.name.clone())))?;

        Ok(())
    }

    /// Attach a tag to a sound. Adding an existing tag is a no-op.
    pub async fn add_tag(&self, sound_name: &str, tag: &str) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO x_sound_tags (sound_id, tag)
            SELECT id, ? FROM x_sounds WHERE name = ? COLLATE NOCASE
            "#,
        )
        .bind(tag)
        .bind(sound_name)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 && self.find_by_name(sound_name).await?.is_none() {
            return Err(DbError::SoundNotFound(sound_name.to_string()));
        }

        Ok(())
    }

    /// Tags of a sound, alphabetically. Unknown sounds have no tags.
    pub async fn tags_for(&self, sound_name: &str) -> Result<Vec<String>, DbError> {
        let rows = sqlx::query_scalar::<_, String>(
            r#"
            SELECT t.tag
            FROM x_sound_tags t
            JOIN x_sounds s ON s.id = t.sound_id
            WHERE s.name = ? COLLATE NOCASE
            ORDER BY t.tag ASC
            "#,
        )
        .bind(sound_name)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn airhorn() -> XSound {
        XSound {
            name: "airhorn".to_string(),
            url: "https://sounds.example/airhorn.mp3".to_string(),
        }
    }

    #[tokio::test]
    async fn tags_round_trip() {
        let db = Database::new(":memory:").await.unwrap();
        db.xsounds().insert(&airhorn()).await.unwrap();
        db.xsounds().add_tag("airhorn", "loud").await.unwrap();
        db.xsounds().add_tag("AIRHORN", "classic").await.unwrap();
        db.xsounds().add_tag("airhorn", "loud").await.unwrap();

        let tags = db.xsounds().tags_for("airhorn").await.unwrap();
        assert_eq!(tags, ["classic", "loud"]);
    }

    #[tokio::test]
    async fn tagging_unknown_sound_fails() {
        let db = Database::new(":memory:").await.unwrap();
        let err = db.xsounds().add_tag("nope", "x").await.unwrap_err();
        assert!(matches!(err, DbError::SoundNotFound(_)));
    }

    #[tokio::test]
    async fn lookup_ignores_case() {
        let db = Database::new(":memory:").await.unwrap();
        db.xsounds().insert(&airhorn()).await.unwrap();
        let found = db.xsounds().find_by_name("AirHorn").await.unwrap().unwrap();
        assert_eq!(found, airhorn());
        assert!(matches!(
            db.xsounds().insert(&airhorn()).await,
            Err(DbError::SoundExists(_))
        ));
    }
}
