//! Player state and its transition function.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::event::EventData;
use crate::song::Song;

/// Highest accepted volume.
pub const MAX_VOLUME: u8 = 100;

/// Volume of a freshly started player.
pub const DEFAULT_VOLUME: u8 = 100;

/// Shared playback state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Songs waiting to be played, front first.
    #[serde(default)]
    pub queue: VecDeque<Song>,
    /// The song being rendered, if any.
    #[serde(default)]
    pub current_song: Option<Song>,
    /// Volume in `0..=100`.
    #[serde(default = "default_volume")]
    pub volume: u8,
    /// Whether the current song is playing (as opposed to paused).
    #[serde(default)]
    pub playing: bool,
}

fn default_volume() -> u8 {
    DEFAULT_VOLUME
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            current_song: None,
            volume: DEFAULT_VOLUME,
            playing: false,
        }
    }
}

impl PlayerState {
    /// Apply one event.
    ///
    /// Queue additions start playback when nothing is loaded. A skip drops
    /// `count - 1` songs from the front of the queue (everything when `all`
    /// is set) and then advances to the next song. Events that do not
    /// affect state are ignored.
    pub fn apply(&mut self, event: &EventData) {
        match event {
            EventData::PlayerStateUpdate { state } => *self = state.clone(),
            EventData::AddSongToQueue { song } => {
                self.queue.push_back(song.clone());
                self.start_if_idle();
            }
            EventData::AddSongsToQueue { songs } => {
                self.queue.extend(songs.iter().cloned());
                self.start_if_idle();
            }
            EventData::Pause => self.playing = false,
            EventData::Resume => self.playing = self.current_song.is_some(),
            EventData::Skip { count, all } => {
                let to_drop = if *all {
                    self.queue.len()
                } else {
                    (count.saturating_sub(1) as usize).min(self.queue.len())
                };
                self.queue.drain(..to_drop);
                self.advance();
            }
            EventData::ChangeVolume { next_volume } => {
                self.volume = (*next_volume).min(MAX_VOLUME);
            }
            EventData::PlayerStateRequest
            | EventData::PlayXSound { .. }
            | EventData::Say { .. } => {}
        }
    }

    /// Move the front of the queue into the current slot.
    pub fn advance(&mut self) {
        self.current_song = self.queue.pop_front();
        self.playing = self.current_song.is_some();
    }

    fn start_if_idle(&mut self) {
        if self.current_song.is_none() {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs(names: &[&str]) -> Vec<Song> {
        names.iter().map(|n| Song::new(*n, format!("id-{n}"))).collect()
    }

    fn playing(current: &str, queued: &[&str]) -> PlayerState {
        PlayerState {
            queue: songs(queued).into(),
            current_song: Some(Song::new(current, format!("id-{current}"))),
            volume: DEFAULT_VOLUME,
            playing: true,
        }
    }

    #[test]
    fn skip_three_drops_two_and_advances() {
        let mut state = playing("now", &["a", "b", "c", "d"]);
        state.apply(&EventData::Skip { count: 3, all: false });

        assert_eq!(state.current_song.as_ref().map(|s| s.name.as_str()), Some("c"));
        let rest: Vec<_> = state.queue.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(rest, ["d"]);
        assert!(state.playing);
    }

    #[test]
    fn skip_one_just_advances() {
        let mut state = playing("now", &["a", "b"]);
        state.apply(&EventData::Skip { count: 1, all: false });
        assert_eq!(state.current_song.unwrap().name, "a");
        assert_eq!(state.queue.len(), 1);
    }

    #[test]
    fn skip_all_clears_queue_and_stops() {
        let mut state = playing("now", &["a", "b", "c"]);
        state.apply(&EventData::Skip { count: 1, all: true });
        assert!(state.queue.is_empty());
        assert!(state.current_song.is_none());
        assert!(!state.playing);
    }

    #[test]
    fn skip_more_than_queued_empties_queue() {
        let mut state = playing("now", &["a"]);
        state.apply(&EventData::Skip { count: 10, all: false });
        assert!(state.queue.is_empty());
        assert!(state.current_song.is_none());
    }

    #[test]
    fn add_to_idle_player_starts_playback() {
        let mut state = PlayerState::default();
        state.apply(&EventData::AddSongsToQueue { songs: songs(&["a", "b"]) });
        assert_eq!(state.current_song.unwrap().name, "a");
        assert_eq!(state.queue.len(), 1);
        assert!(state.playing);
    }

    #[test]
    fn add_to_busy_player_appends() {
        let mut state = playing("now", &["a"]);
        state.apply(&EventData::AddSongToQueue { song: Song::new("b", "id-b") });
        let names: Vec<_> = state.queue.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(state.current_song.unwrap().name, "now");
    }

    #[test]
    fn volume_round_trips_within_range() {
        let mut state = PlayerState::default();
        for v in [0u8, 1, 37, 99, 100] {
            state.apply(&EventData::ChangeVolume { next_volume: v });
            assert_eq!(state.volume, v);
        }
    }

    #[test]
    fn volume_is_clamped() {
        let mut state = PlayerState::default();
        state.apply(&EventData::ChangeVolume { next_volume: 250 });
        assert_eq!(state.volume, MAX_VOLUME);
    }

    #[test]
    fn pause_and_resume() {
        let mut state = playing("now", &[]);
        state.apply(&EventData::Pause);
        assert!(!state.playing);
        state.apply(&EventData::Resume);
        assert!(state.playing);
    }

    #[test]
    fn resume_without_song_stays_stopped() {
        let mut state = PlayerState::default();
        state.apply(&EventData::Resume);
        assert!(!state.playing);
    }

    #[test]
    fn one_shot_events_leave_state_alone() {
        let mut state = playing("now", &["a"]);
        let before = state.clone();
        state.apply(&EventData::Say { text: "hello".into() });
        state.apply(&EventData::PlayXSound { sound_url: "http://s".into() });
        state.apply(&EventData::PlayerStateRequest);
        assert_eq!(state, before);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let state: PlayerState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, PlayerState::default());
    }
}
