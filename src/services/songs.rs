//! Song catalog service.

use crate::catalog::{MAX_IDS_PER_REQUEST, VideoCatalog};
use crate::db::Database;
use crate::error::CommandError;
use crate::services::HistoryService;
use jukebox_proto::Song;
use std::sync::Arc;
use tracing::{debug, info};

/// Catalog operations shared by the command processors.
pub struct SongsService {
    db: Database,
    history: Arc<HistoryService>,
    catalog: Arc<dyn VideoCatalog>,
}

impl SongsService {
    pub fn new(db: Database, history: Arc<HistoryService>, catalog: Arc<dyn VideoCatalog>) -> Self {
        Self {
            db,
            history,
            catalog,
        }
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Song>, CommandError> {
        Ok(self.db.songs().find_by_name(name).await?)
    }

    /// Every song, most played first.
    pub async fn get_all(&self) -> Result<Vec<Song>, CommandError> {
        Ok(self.db.songs().find_all_ordered_by_times_played_desc(None).await?)
    }

    pub async fn get_with_highest_play_count(&self, limit: usize) -> Result<Vec<Song>, CommandError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(self
            .db
            .songs()
            .find_all_ordered_by_times_played_desc(Some(limit))
            .await?)
    }

    /// Store a new song. The title is fetched from the catalog when not given.
    pub async fn create_new_song(
        &self,
        youtube_id: &str,
        name: Option<&str>,
        times_played: i64,
    ) -> Result<Song, CommandError> {
        let name = match name {
            Some(name) => name.to_string(),
            None => self.catalog.fetch_video_title_for_id(youtube_id).await?,
        };

        let mut song = Song::new(name, youtube_id);
        song.times_played = times_played;

        self.db.songs().insert(&song).await?;
        info!(youtube_id = %song.youtube_id, name = %song.name, "New song added to catalog");
        Ok(song)
    }

    /// Count one play of `youtube_id` by `user` and record it in history.
    ///
    /// Unknown ids are added to the catalog with a count of one.
    pub async fn increment_play_count(
        &self,
        youtube_id: &str,
        name: Option<&str>,
        user: &str,
    ) -> Result<(), CommandError> {
        if self.db.songs().increment_times_played(youtube_id).await? {
            if let Some(song) = self.db.songs().find_by_youtube_id(youtube_id).await? {
                self.history.mark_as_played(&song, user).await?;
            }
        } else {
            let song = self.create_new_song(youtube_id, name, 1).await?;
            self.history.mark_as_played(&song, user).await?;
        }
        Ok(())
    }

    /// Resolve free text to a song: exact title first, then the first word
    /// as a YouTube id. An id the catalog does not know yet gets its title
    /// from the video service and is returned unsaved; it is stored the
    /// first time [`SongsService::increment_play_count`] counts it.
    pub async fn get_song_by_name_with_youtube_id_fallback(
        &self,
        name_or_id: &str,
    ) -> Result<Song, CommandError> {
        if let Some(song) = self.db.songs().find_by_name(name_or_id).await? {
            return Ok(song);
        }

        let youtube_id = name_or_id.split_whitespace().next().unwrap_or_default();
        if youtube_id.is_empty() {
            return Err(CommandError::user("Give a song name or a YouTube id."));
        }

        if let Some(song) = self.db.songs().find_by_youtube_id(youtube_id).await? {
            return Ok(song);
        }

        debug!(youtube_id = %youtube_id, "Song not in catalog, looking up its title");
        let name = self.catalog.fetch_video_title_for_id(youtube_id).await?;
        Ok(Song::new(name, youtube_id))
    }

    /// Keep the songs the catalog marks embeddable, preserving order.
    ///
    /// At most one catalog page of songs is checked per call.
    pub async fn filter_embeddable(&self, songs: Vec<Song>) -> Result<Vec<Song>, CommandError> {
        let candidates: Vec<Song> = songs.into_iter().take(MAX_IDS_PER_REQUEST).collect();
        let ids: Vec<String> = candidates.iter().map(|s| s.youtube_id.clone()).collect();
        let statuses = self.catalog.fetch_videos_statuses(&ids).await?;

        Ok(candidates
            .into_iter()
            .filter(|song| statuses.get(&song.youtube_id).copied().unwrap_or(false))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::stub::StubCatalog;

    async fn service(catalog: StubCatalog) -> (SongsService, Database) {
        let db = Database::new(":memory:").await.unwrap();
        let history = Arc::new(HistoryService::new(db.clone()));
        (SongsService::new(db.clone(), history, Arc::new(catalog)), db)
    }

    #[tokio::test]
    async fn increment_known_song_records_history() {
        let (songs, db) = service(StubCatalog::default()).await;
        db.songs().insert(&Song::new("Toxic", "tox")).await.unwrap();

        songs.increment_play_count("tox", Some("Toxic"), "alice").await.unwrap();

        let song = db.songs().find_by_youtube_id("tox").await.unwrap().unwrap();
        assert_eq!(song.times_played, 1);
        let history = db.history().find_all_order_by_date_desc().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user, "alice");
    }

    #[tokio::test]
    async fn increment_unknown_song_creates_it() {
        let (songs, db) = service(StubCatalog::default().with_title("new", "Fresh Tune")).await;

        songs.increment_play_count("new", None, "bob").await.unwrap();

        let song = db.songs().find_by_youtube_id("new").await.unwrap().unwrap();
        assert_eq!(song.name, "Fresh Tune");
        assert_eq!(song.times_played, 1);
    }

    #[tokio::test]
    async fn fallback_resolves_name_then_id_then_video_title() {
        let (songs, db) = service(StubCatalog::default().with_title("abc123", "From YouTube")).await;
        db.songs().insert(&Song::new("Toxic", "tox")).await.unwrap();

        let by_name = songs.get_song_by_name_with_youtube_id_fallback("Toxic").await.unwrap();
        assert_eq!(by_name.youtube_id, "tox");

        let by_id = songs
            .get_song_by_name_with_youtube_id_fallback("tox trailing words")
            .await
            .unwrap();
        assert_eq!(by_id.name, "Toxic");

        let fresh = songs.get_song_by_name_with_youtube_id_fallback("abc123").await.unwrap();
        assert_eq!(fresh.name, "From YouTube");
        assert_eq!(fresh.times_played, 0);
        assert!(db.songs().find_by_youtube_id("abc123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_video_is_a_catalog_failure() {
        let (songs, _db) = service(StubCatalog::default()).await;
        let err = songs
            .get_song_by_name_with_youtube_id_fallback("nothing-here")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Catalog(_)));
    }

    #[tokio::test]
    async fn embeddable_filter_keeps_order() {
        let (songs, _db) = service(StubCatalog::blocking(&["b"])).await;
        let input = vec![Song::new("C", "c"), Song::new("B", "b"), Song::new("A", "a")];
        let kept = songs.filter_embeddable(input).await.unwrap();
        let ids: Vec<_> = kept.iter().map(|s| s.youtube_id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);
    }
}
