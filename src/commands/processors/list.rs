//! `list` - the most played songs.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext, ResponseMessage};
use crate::commands::processor::CommandProcessor;
use crate::error::{CommandError, CommandResult};
use crate::services::SongsService;
use async_trait::async_trait;
use std::sync::Arc;

const DEFAULT_LIST_SIZE: usize = 10;
const MAX_LIST_SIZE: usize = 100;

pub struct ListCommand {
    songs: Arc<SongsService>,
}

impl ListCommand {
    pub fn new(songs: Arc<SongsService>) -> Self {
        Self { songs }
    }
}

#[async_trait]
impl CommandProcessor for ListCommand {
    fn key(&self) -> &'static str {
        "list"
    }

    fn short_key(&self) -> Option<&'static str> {
        Some("l")
    }

    fn help_message(&self) -> &'static str {
        "Lists the most played songs."
    }

    fn help_usages(&self) -> Option<&'static [&'static str]> {
        Some(&["", "<amount>", "25"])
    }

    async fn execute(
        &self,
        command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let limit = match command.args().first() {
            None => DEFAULT_LIST_SIZE,
            Some(arg) => arg
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=MAX_LIST_SIZE).contains(n))
                .ok_or_else(|| {
                    CommandError::user(format!("List size must be from 1 to {MAX_LIST_SIZE}."))
                })?,
        };

        let songs = self.songs.get_with_highest_play_count(limit).await?;
        if songs.is_empty() {
            return Ok(CommandProcessingResponse::single_text("The catalog is empty", true));
        }

        let lines = songs
            .iter()
            .enumerate()
            .map(|(i, song)| format!("{}. _{}_ ({} plays)", i + 1, song.name, song.times_played))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CommandProcessingResponse::new(
            vec![
                ResponseMessage::header("Most played songs"),
                ResponseMessage::markdown(lines),
            ],
            true,
        ))
    }
}
