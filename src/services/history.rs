//! Play history.

use crate::db::{Database, DbError, HistoryEntry};
use jukebox_proto::Song;
use serde::Serialize;
use std::collections::HashMap;

/// A song with how often it appears in history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPopularity {
    pub song: Song,
    pub play_count: usize,
}

/// History aggregated per song.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    /// Most played first.
    pub most_popular_songs: Vec<SongPopularity>,
}

/// Records and summarizes what was queued.
pub struct HistoryService {
    db: Database,
}

impl HistoryService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Every entry, newest first.
    pub async fn get_all(&self) -> Result<Vec<HistoryEntry>, DbError> {
        self.db.history().find_all_order_by_date_desc().await
    }

    /// Record that `user` queued `song` just now.
    pub async fn mark_as_played(&self, song: &Song, user: &str) -> Result<(), DbError> {
        let entry = HistoryEntry {
            played_at: chrono::Utc::now().timestamp(),
            youtube_id: song.youtube_id.clone(),
            user: user.to_string(),
        };
        self.db.history().insert(&entry).await
    }

    /// Count history entries per song. Songs missing from the catalog are skipped.
    pub async fn generate_summary(&self) -> Result<HistorySummary, DbError> {
        let history = self.db.history().find_all_order_by_date_desc().await?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in history {
            *counts.entry(entry.youtube_id).or_default() += 1;
        }

        let ids: Vec<String> = counts.keys().cloned().collect();
        let mut most_popular_songs: Vec<SongPopularity> = self
            .db
            .songs()
            .find_by_youtube_ids(&ids)
            .await?
            .into_iter()
            .map(|song| {
                let play_count = counts.get(&song.youtube_id).copied().unwrap_or(0);
                SongPopularity { song, play_count }
            })
            .collect();

        most_popular_songs.sort_by(|a, b| {
            b.play_count
                .cmp(&a.play_count)
                .then_with(|| a.song.name.cmp(&b.song.name))
        });

        Ok(HistorySummary { most_popular_songs })
    }
}
