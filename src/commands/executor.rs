//! Command execution.
//!
//! [`CommandExecutor`] is the single place where handler failures become
//! responses. Whatever a processor returns, the caller gets a
//! [`CommandProcessingResponse`].

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext};
use crate::commands::parser::TextCommandParser;
use crate::commands::registry::CommandRegistry;
use crate::metrics;
use crate::telemetry::{CommandTimer, spans};
use std::sync::Arc;
use tracing::{Instrument, debug, error};

/// Shown when no command matches the text or key.
pub const COMMAND_DOES_NOT_EXIST: &str = "Command does not exist";

pub struct CommandExecutor {
    registry: Arc<CommandRegistry>,
}

impl CommandExecutor {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Run `command` and normalize the outcome.
    pub async fn process_command(
        &self,
        command: &Command,
        ctx: &ExecutionContext,
    ) -> CommandProcessingResponse {
        let Some(definition) = self.registry.get(&command.key) else {
            debug!(command = %command.key, "Unknown command");
            return command_does_not_exist();
        };

        let key = definition.key;
        let span = spans::command(key, &ctx.user, ctx.channel_id.as_deref());

        async {
            let _timer = CommandTimer::new(key);
            match definition.execute(command, ctx).await {
                Ok(mut response) => {
                    response.is_visible_to_issuer_only |= ctx.issuer_only;
                    response
                }
                Err(e) => {
                    error!(command = key, error = %e, kind = e.error_code(), "Command failed");
                    metrics::record_command_error(key, e.error_code());
                    CommandProcessingResponse::single_text(e.user_message(), true)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Parse `text` and run the command it names.
    pub async fn process_from_text(
        &self,
        text: &str,
        ctx: &ExecutionContext,
    ) -> CommandProcessingResponse {
        let parser = TextCommandParser::new(&self.registry);
        match parser.parse_text_to_command(text) {
            Some(command) => self.process_command(&command, ctx).await,
            None => {
                debug!(text = %text, "No command matched");
                command_does_not_exist()
            }
        }
    }
}

fn command_does_not_exist() -> CommandProcessingResponse {
    CommandProcessingResponse::single_text(COMMAND_DOES_NOT_EXIST, true)
}
