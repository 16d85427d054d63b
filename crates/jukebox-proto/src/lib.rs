//! Jukebox event stream protocol.
//!
//! Types shared between the jukebox server and the players connected to its
//! event stream:
//!
//! - [`Song`]: a catalog entry addressed by its YouTube id.
//! - [`PlayerState`]: queue, current song, volume and playing flag.
//! - [`EventData`]: the closed set of events pushed to players.
//! - [`ServerFrame`] / [`ClientFrame`]: the JSON envelopes carried in
//!   WebSocket text frames.
//!
//! [`PlayerState::apply`] is the single transition function for player
//! state; both the server's canonical copy and a player's local copy use it.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod frame;
pub mod song;
pub mod state;

pub use self::error::ProtocolError;
pub use self::event::EventData;
pub use self::frame::{ClientFrame, ServerFrame};
pub use self::song::Song;
pub use self::state::{PlayerState, DEFAULT_VOLUME, MAX_VOLUME};
