//! `tag-show` - list the tags of a sound effect.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext, ResponseMessage};
use crate::commands::processor::CommandProcessor;
use crate::error::{CommandError, CommandResult};
use crate::services::XSoundsService;
use async_trait::async_trait;
use std::sync::Arc;

pub struct TagShowCommand {
    xsounds: Arc<XSoundsService>,
}

impl TagShowCommand {
    pub fn new(xsounds: Arc<XSoundsService>) -> Self {
        Self { xsounds }
    }
}

#[async_trait]
impl CommandProcessor for TagShowCommand {
    fn key(&self) -> &'static str {
        "tag-show"
    }

    fn help_message(&self) -> &'static str {
        "Shows every tag assigned to a sound."
    }

    fn help_usages(&self) -> Option<&'static [&'static str]> {
        Some(&["<sound name>", "airhorn"])
    }

    async fn execute(
        &self,
        command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let sound_name = command.raw_args.trim();
        if sound_name.is_empty() {
            return Err(CommandError::user("Give a sound name."));
        }

        let tags = self.xsounds.get_sound_tags(sound_name).await?;
        if tags.is_empty() {
            return Ok(CommandProcessingResponse::single_text(
                format!("Sound \"{sound_name}\" has no tags"),
                false,
            ));
        }

        let tag_list = tags
            .iter()
            .map(|tag| format!("- {tag}"))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CommandProcessingResponse::new(
            vec![
                ResponseMessage::header(format!("Tags for \"{sound_name}\"")),
                ResponseMessage::markdown(tag_list),
            ],
            false,
        ))
    }
}
