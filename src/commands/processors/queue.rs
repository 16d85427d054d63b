//! `queue` - add one song by title or YouTube id.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext, ResponseMessage};
use crate::commands::processor::CommandProcessor;
use crate::error::{CommandError, CommandResult};
use crate::events::Hub;
use crate::services::SongsService;
use async_trait::async_trait;
use jukebox_proto::EventData;
use std::sync::Arc;

pub struct QueueCommand {
    songs: Arc<SongsService>,
    hub: Arc<Hub>,
}

impl QueueCommand {
    pub fn new(songs: Arc<SongsService>, hub: Arc<Hub>) -> Self {
        Self { songs, hub }
    }
}

#[async_trait]
impl CommandProcessor for QueueCommand {
    fn key(&self) -> &'static str {
        "queue"
    }

    fn short_key(&self) -> Option<&'static str> {
        Some("q")
    }

    fn help_message(&self) -> &'static str {
        "Queues a song by its title, or by YouTube id when the title is unknown."
    }

    fn help_usages(&self) -> Option<&'static [&'static str]> {
        Some(&["<song title>", "<youtube id>", "Britney Spears - Toxic", "LOZuxwVk7TU"])
    }

    async fn execute(
        &self,
        command: &Command,
        ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let name_or_id = command.raw_args.trim();
        if name_or_id.is_empty() {
            return Err(CommandError::user("Give a song title or a YouTube id."));
        }

        let song = self
            .songs
            .get_song_by_name_with_youtube_id_fallback(name_or_id)
            .await?;

        self.hub
            .broadcast(EventData::AddSongToQueue { song: song.clone() })?;

        super::count_plays(&self.songs, self.key(), std::slice::from_ref(&song), &ctx.user).await;

        Ok(CommandProcessingResponse::new(
            vec![ResponseMessage::markdown(format!("Queued _{}_", song.name))],
            false,
        ))
    }
}
