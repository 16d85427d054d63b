//! Catalog songs.

use serde::{Deserialize, Serialize};

/// A song known to the catalog.
///
/// Songs are addressed by their YouTube video id; `name` is the display
/// title users search by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Display title.
    pub name: String,
    /// YouTube video id.
    pub youtube_id: String,
    /// How many times the song has been queued.
    #[serde(default)]
    pub times_played: i64,
    /// Playback starts at this offset when set.
    #[serde(default)]
    pub trim_start_seconds: Option<i64>,
    /// Playback stops at this offset when set.
    #[serde(default)]
    pub trim_end_seconds: Option<i64>,
}

impl Song {
    /// Create a song that has never been played and has no trim points.
    pub fn new(name: impl Into<String>, youtube_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            youtube_id: youtube_id.into(),
            times_played: 0,
            trim_start_seconds: None,
            trim_end_seconds: None,
        }
    }

    /// Case-insensitive check that the title contains every keyword.
    ///
    /// An empty keyword list matches every song.
    pub fn matches_all_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let name = self.name.to_lowercase();
        keywords
            .iter()
            .all(|word| name.contains(&word.as_ref().to_lowercase()))
    }
}
