//! Domain services.
//!
//! Services wrap the repositories and the video catalog with the rules the
//! command processors rely on: creating songs on first play, recording
//! history, filtering out videos that cannot be embedded.

pub mod history;
pub mod songs;
pub mod xsounds;

pub use history::{HistoryService, HistorySummary, SongPopularity};
pub use songs::SongsService;
pub use xsounds::XSoundsService;
