//! `pause` and `resume`.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext};
use crate::commands::processor::CommandProcessor;
use crate::error::CommandResult;
use crate::events::Hub;
use async_trait::async_trait;
use jukebox_proto::EventData;
use std::sync::Arc;

pub struct PauseCommand {
    hub: Arc<Hub>,
}

impl PauseCommand {
    pub fn new(hub: Arc<Hub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl CommandProcessor for PauseCommand {
    fn key(&self) -> &'static str {
        "pause"
    }

    fn help_message(&self) -> &'static str {
        "Pauses playback."
    }

    async fn execute(
        &self,
        _command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        self.hub.broadcast(EventData::Pause)?;
        Ok(CommandProcessingResponse::single_text("Paused", false))
    }
}

pub struct ResumeCommand {
    hub: Arc<Hub>,
}

impl ResumeCommand {
    pub fn new(hub: Arc<Hub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl CommandProcessor for ResumeCommand {
    fn key(&self) -> &'static str {
        "resume"
    }

    fn help_message(&self) -> &'static str {
        "Resumes playback."
    }

    async fn execute(
        &self,
        _command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        self.hub.broadcast(EventData::Resume)?;
        Ok(CommandProcessingResponse::single_text("Resumed", false))
    }
}
