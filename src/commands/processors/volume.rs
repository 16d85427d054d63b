//! `volume` - show or set the player volume.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext};
use crate::commands::processor::CommandProcessor;
use crate::error::{CommandError, CommandResult};
use crate::events::Hub;
use async_trait::async_trait;
use jukebox_proto::{EventData, MAX_VOLUME};
use std::sync::Arc;

pub struct VolumeCommand {
    hub: Arc<Hub>,
}

impl VolumeCommand {
    pub fn new(hub: Arc<Hub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl CommandProcessor for VolumeCommand {
    fn key(&self) -> &'static str {
        "volume"
    }

    fn short_key(&self) -> Option<&'static str> {
        Some("vol")
    }

    fn help_message(&self) -> &'static str {
        "Sets the volume (0-100). Without an argument shows the current volume."
    }

    fn help_usages(&self) -> Option<&'static [&'static str]> {
        Some(&["", "<0-100>", "40"])
    }

    async fn execute(
        &self,
        command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let Some(arg) = command.args().first().copied() else {
            let volume = self.hub.owner().get_state().volume;
            return Ok(CommandProcessingResponse::single_text(
                format!("Volume is {volume}"),
                true,
            ));
        };

        let next_volume = arg
            .parse::<u8>()
            .ok()
            .filter(|v| *v <= MAX_VOLUME)
            .ok_or_else(|| {
                CommandError::user(format!("Volume must be a number from 0 to {MAX_VOLUME}."))
            })?;

        self.hub.broadcast(EventData::ChangeVolume { next_volume })?;
        Ok(CommandProcessingResponse::single_text(
            format!("Volume set to {next_volume}"),
            false,
        ))
    }
}
