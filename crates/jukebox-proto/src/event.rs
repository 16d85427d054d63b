//! Player events.
//!
//! Every event is a JSON object tagged by its `id` field. Players switch on
//! that tag; unknown tags are rejected at decode time.

use serde::{Deserialize, Serialize};

use crate::song::Song;
use crate::state::PlayerState;

/// One discrete change to shared playback, or a one-shot player action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id")]
pub enum EventData {
    /// Replace the whole player state.
    #[serde(rename = "PlayerStateUpdateEvent")]
    PlayerStateUpdate {
        /// The new state.
        state: PlayerState,
    },

    /// Ask the primary player for its current state. Answered with an ack.
    #[serde(rename = "PlayerStateRequestEvent")]
    PlayerStateRequest,

    /// Append one song to the queue.
    #[serde(rename = "AddSongToQueueEvent")]
    AddSongToQueue {
        /// Song to append.
        song: Song,
    },

    /// Append several songs to the queue, in order.
    #[serde(rename = "AddSongsToQueueEvent")]
    AddSongsToQueue {
        /// Songs to append.
        songs: Vec<Song>,
    },

    /// Play a short sound effect over the music.
    #[serde(rename = "PlayXSoundEvent", rename_all = "camelCase")]
    PlayXSound {
        /// Where the player fetches the sound from.
        sound_url: String,
    },

    /// Read text aloud with speech synthesis.
    #[serde(rename = "SayEvent")]
    Say {
        /// Text to speak.
        text: String,
    },

    /// Pause playback.
    #[serde(rename = "PauseEvent")]
    Pause,

    /// Resume playback.
    #[serde(rename = "ResumeEvent")]
    Resume,

    /// Skip songs. `count` includes the current song; `all` clears the queue.
    #[serde(rename = "SkipEvent")]
    Skip {
        /// Number of songs to skip, counting the one playing.
        #[serde(default = "default_skip_count")]
        count: u32,
        /// Skip everything.
        #[serde(default)]
        all: bool,
    },

    /// Set the playback volume.
    #[serde(rename = "ChangeVolumeEvent", rename_all = "camelCase")]
    ChangeVolume {
        /// Volume in `0..=100`.
        next_volume: u8,
    },
}

fn default_skip_count() -> u32 {
    1
}

impl EventData {
    /// The wire tag of this event.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::PlayerStateUpdate { .. } => "PlayerStateUpdateEvent",
            Self::PlayerStateRequest => "PlayerStateRequestEvent",
            Self::AddSongToQueue { .. } => "AddSongToQueueEvent",
            Self::AddSongsToQueue { .. } => "AddSongsToQueueEvent",
            Self::PlayXSound { .. } => "PlayXSoundEvent",
            Self::Say { .. } => "SayEvent",
            Self::Pause => "PauseEvent",
            Self::Resume => "ResumeEvent",
            Self::Skip { .. } => "SkipEvent",
            Self::ChangeVolume { .. } => "ChangeVolumeEvent",
        }
    }

    /// Whether applying this event changes [`PlayerState`].
    ///
    /// Sounds and speech are rendered by players but leave the shared
    /// state untouched; a state request is a query.
    pub fn affects_state(&self) -> bool {
        !matches!(
            self,
            Self::PlayerStateRequest | Self::PlayXSound { .. } | Self::Say { .. }
        )
    }
}
