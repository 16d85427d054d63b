//! Canonical player state.
//!
//! [`PlayerStateOwner`] holds the one authoritative [`PlayerState`] on the
//! server. It is only mutated through [`PlayerStateOwner::apply_event`],
//! which the event stream hub calls while holding its own lock, so the order
//! events are applied here is the order every connection receives them.

use jukebox_proto::{EventData, PlayerState};
use parking_lot::RwLock;
use tracing::trace;

#[derive(Debug, Default)]
pub struct PlayerStateOwner {
    state: RwLock<PlayerState>,
}

impl PlayerStateOwner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the canonical state.
    pub fn get_state(&self) -> PlayerState {
        self.state.read().clone()
    }

    pub fn apply_event(&self, event: &EventData) {
        if !event.affects_state() {
            return;
        }
        let mut state = self.state.write();
        state.apply(event);
        trace!(
            event = event.tag(),
            queue = state.queue.len(),
            volume = state.volume,
            playing = state.playing,
            "Applied event to player state"
        );
    }

    /// Overwrite the canonical state with a report from the primary player.
    ///
    /// The hub calls this under its own lock, and only for reports that no
    /// broadcast has overtaken.
    pub fn replace(&self, state: PlayerState) {
        *self.state.write() = state;
    }
}
