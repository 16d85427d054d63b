//! `x` - play a sound effect.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext};
use crate::commands::processor::CommandProcessor;
use crate::error::{CommandError, CommandResult};
use crate::events::Hub;
use crate::services::XSoundsService;
use async_trait::async_trait;
use jukebox_proto::EventData;
use std::sync::Arc;

pub struct XCommand {
    xsounds: Arc<XSoundsService>,
    hub: Arc<Hub>,
}

impl XCommand {
    pub fn new(xsounds: Arc<XSoundsService>, hub: Arc<Hub>) -> Self {
        Self { xsounds, hub }
    }
}

#[async_trait]
impl CommandProcessor for XCommand {
    fn key(&self) -> &'static str {
        "x"
    }

    fn help_message(&self) -> &'static str {
        "Plays a sound effect on every player."
    }

    fn help_usages(&self) -> Option<&'static [&'static str]> {
        Some(&["<sound name>", "airhorn"])
    }

    async fn execute(
        &self,
        command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let name = command.raw_args.trim();
        if name.is_empty() {
            return Err(CommandError::user("Give a sound name."));
        }

        let sound = self
            .xsounds
            .get_by_name(name)
            .await?
            .ok_or_else(|| CommandError::user(format!("Sound \"{name}\" does not exist.")))?;

        self.hub.broadcast(EventData::PlayXSound {
            sound_url: sound.url,
        })?;
        Ok(CommandProcessingResponse::single_text(
            format!("Playing \"{}\"", sound.name),
            true,
        ))
    }
}
