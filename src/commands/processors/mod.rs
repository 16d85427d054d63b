//! Built-in command processors.

use crate::metrics;
use crate::services::SongsService;
use jukebox_proto::Song;
use tracing::error;

mod help;
mod list;
mod playback;
mod queue;
mod random;
mod say;
mod skip;
mod status;
mod tag_show;
mod volume;
mod x;

pub use help::HelpCommand;
pub use list::ListCommand;
pub use playback::{PauseCommand, ResumeCommand};
pub use queue::QueueCommand;
pub use random::{MAX_RANDOM_SONGS, RandomCommand};
pub use say::SayCommand;
pub use skip::SkipCommand;
pub use status::StatusCommand;
pub use tag_show::TagShowCommand;
pub use volume::VolumeCommand;
pub use x::XCommand;

/// Count one play of every queued song for `user`.
///
/// Runs after the songs were broadcast, so a failure cannot be undone for
/// the issuer. Each one is logged and counted under the command's error
/// metric instead. Returns how many songs could not be counted.
pub(crate) async fn count_plays(
    songs: &SongsService,
    command: &str,
    queued: &[Song],
    user: &str,
) -> usize {
    let mut failed = 0;
    for song in queued {
        if let Err(e) = songs
            .increment_play_count(&song.youtube_id, Some(&song.name), user)
            .await
        {
            error!(
                command,
                youtube_id = %song.youtube_id,
                error = %e,
                kind = e.error_code(),
                "Failed to count play"
            );
            metrics::record_command_error(command, e.error_code());
            failed += 1;
        }
    }
    failed
}
