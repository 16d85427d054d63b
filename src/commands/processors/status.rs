//! `status` - what the primary player is doing right now.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext, ResponseMessage};
use crate::commands::processor::CommandProcessor;
use crate::error::CommandResult;
use crate::events::Hub;
use async_trait::async_trait;
use jukebox_proto::PlayerState;
use std::sync::Arc;

pub struct StatusCommand {
    hub: Arc<Hub>,
}

impl StatusCommand {
    pub fn new(hub: Arc<Hub>) -> Self {
        Self { hub }
    }
}

fn describe(state: &PlayerState) -> String {
    let now = match (&state.current_song, state.playing) {
        (Some(song), true) => format!("Now playing _{}_", song.name),
        (Some(song), false) => format!("Paused on _{}_", song.name),
        (None, _) => "Nothing is playing".to_string(),
    };
    format!(
        "{now}\nQueued: {} songs\nVolume: {}",
        state.queue.len(),
        state.volume
    )
}

#[async_trait]
impl CommandProcessor for StatusCommand {
    fn key(&self) -> &'static str {
        "status"
    }

    fn short_key(&self) -> Option<&'static str> {
        Some("np")
    }

    fn help_message(&self) -> &'static str {
        "Asks the main player what it is playing."
    }

    async fn execute(
        &self,
        _command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let state = self
            .hub
            .request_state(self.hub.state_request_timeout())
            .await?;
        Ok(CommandProcessingResponse::new(
            vec![ResponseMessage::markdown(describe(&state))],
            true,
        ))
    }
}
