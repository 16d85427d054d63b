//! External video catalog.
//!
//! The jukebox only needs two facts from YouTube: whether a video may be
//! embedded in the player, and a video's title when a song is queued by id.
//! [`VideoCatalog`] is the seam; [`YouTubeDataClient`] talks to the YouTube
//! Data API v3.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::YouTubeConfig;

/// The Data API accepts at most this many ids per `videos.list` call.
pub const MAX_IDS_PER_REQUEST: usize = 50;

/// Video catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("video not found: {0}")]
    VideoNotFound(String),
}

/// Lookups against the external video service.
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Embeddable flag per video id. Ids the service does not know are absent.
    async fn fetch_videos_statuses(
        &self,
        youtube_ids: &[String],
    ) -> Result<HashMap<String, bool>, CatalogError>;

    /// Title of a single video.
    async fn fetch_video_title_for_id(&self, youtube_id: &str) -> Result<String, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct VideoList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct VideoStatusItem {
    id: String,
    status: VideoStatus,
}

#[derive(Debug, Deserialize)]
struct VideoStatus {
    #[serde(default)]
    embeddable: bool,
}

#[derive(Debug, Deserialize)]
struct VideoSnippetItem {
    snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
}

/// YouTube Data API v3 client.
pub struct YouTubeDataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeDataClient {
    /// Build a client from configuration.
    pub fn new(config: &YouTubeConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn list_videos<T: for<'de> Deserialize<'de>>(
        &self,
        part: &str,
        ids: &[String],
    ) -> Result<Vec<T>, CatalogError> {
        let url = format!("{}/videos", self.base_url);
        let joined = ids.join(",");

        debug!(part = %part, count = ids.len(), "Querying YouTube videos.list");

        let list: VideoList<T> = self
            .http
            .get(&url)
            .query(&[("part", part), ("id", joined.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(list.items)
    }
}

#[async_trait]
impl VideoCatalog for YouTubeDataClient {
    async fn fetch_videos_statuses(
        &self,
        youtube_ids: &[String],
    ) -> Result<HashMap<String, bool>, CatalogError> {
        let mut statuses = HashMap::with_capacity(youtube_ids.len());

        for chunk in youtube_ids.chunks(MAX_IDS_PER_REQUEST) {
            let items: Vec<VideoStatusItem> = self.list_videos("status", chunk).await?;
            statuses.extend(items.into_iter().map(|item| (item.id, item.status.embeddable)));
        }

        Ok(statuses)
    }

    async fn fetch_video_title_for_id(&self, youtube_id: &str) -> Result<String, CatalogError> {
        let items: Vec<VideoSnippetItem> = self
            .list_videos("snippet", &[youtube_id.to_string()])
            .await?;

        items
            .into_iter()
            .next()
            .map(|item| item.snippet.title)
            .ok_or_else(|| CatalogError::VideoNotFound(youtube_id.to_string()))
    }
}


/// In-memory catalog for unit tests.
#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashSet;

    /// Every id is embeddable unless listed in `blocked`; titles come from `titles`.
    #[derive(Default)]
    pub(crate) struct StubCatalog {
        pub blocked: HashSet<String>,
        pub titles: HashMap<String, String>,
        pub unavailable: bool,
        pub status_requests: Mutex<Vec<Vec<String>>>,
    }

    impl StubCatalog {
        pub(crate) fn blocking(ids: &[&str]) -> Self {
            Self {
                blocked: ids.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        pub(crate) fn with_title(mut self, id: &str, title: &str) -> Self {
            self.titles.insert(id.to_string(), title.to_string());
            self
        }
    }

    #[async_trait]
    impl VideoCatalog for StubCatalog {
        async fn fetch_videos_statuses(
            &self,
            youtube_ids: &[String],
        ) -> Result<HashMap<String, bool>, CatalogError> {
            if self.unavailable {
                return Err(CatalogError::VideoNotFound("catalog offline".to_string()));
            }
            self.status_requests.lock().push(youtube_ids.to_vec());
            Ok(youtube_ids
                .iter()
                .map(|id| (id.clone(), !self.blocked.contains(id)))
                .collect())
        }

        async fn fetch_video_title_for_id(&self, youtube_id: &str) -> Result<String, CatalogError> {
            self.titles
                .get(youtube_id)
                .cloned()
                .ok_or_else(|| CatalogError::VideoNotFound(youtube_id.to_string()))
        }
    }
}
