//! `say` - read text aloud on every player.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext};
use crate::commands::processor::CommandProcessor;
use crate::error::{CommandError, CommandResult};
use crate::events::Hub;
use async_trait::async_trait;
use jukebox_proto::EventData;
use std::sync::Arc;

pub struct SayCommand {
    hub: Arc<Hub>,
}

impl SayCommand {
    pub fn new(hub: Arc<Hub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl CommandProcessor for SayCommand {
    fn key(&self) -> &'static str {
        "say"
    }

    fn help_message(&self) -> &'static str {
        "Reads the text aloud on the players."
    }

    fn help_usages(&self) -> Option<&'static [&'static str]> {
        Some(&["<text>", "good morning"])
    }

    async fn execute(
        &self,
        command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let text = command.raw_args.trim();
        if text.is_empty() {
            return Err(CommandError::user("Tell me what to say."));
        }

        self.hub.broadcast(EventData::Say {
            text: text.to_string(),
        })?;
        Ok(CommandProcessingResponse::single_text(format!("Saying: {text}"), true))
    }
}
