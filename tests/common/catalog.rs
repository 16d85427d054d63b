//! In-memory video catalog.

use async_trait::async_trait;
use jukebox_fm::catalog::{CatalogError, VideoCatalog};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Every id is embeddable unless blocked; titles are looked up in `titles`.
#[derive(Default)]
pub struct StubCatalog {
    blocked: HashSet<String>,
    titles: HashMap<String, String>,
    /// Every id list passed to `fetch_videos_statuses`.
    pub status_requests: Mutex<Vec<Vec<String>>>,
}

#[allow(dead_code)]
impl StubCatalog {
    pub fn blocking(ids: &[&str]) -> Self {
        Self {
            blocked: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, id: &str, title: &str) -> Self {
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
