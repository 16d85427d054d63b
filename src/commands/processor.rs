//! The command handler contract.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext};
use crate::error::CommandResult;
use async_trait::async_trait;

/// Trait implemented by every command handler.
///
/// Validation failures are returned as [`CommandError::UserInput`] with the
/// text the issuer should read; the executor turns any error into a response.
///
/// [`CommandError::UserInput`]: crate::error::CommandError::UserInput
#[async_trait]
pub trait CommandProcessor: Send + Sync {
    fn key(&self) -> &'static str;

    fn short_key(&self) -> Option<&'static str> {
        None
    }

    fn help_message(&self) -> &'static str;

    /// Example argument lists shown by `help <command>`.
    fn help_usages(&self) -> Option<&'static [&'static str]> {
        None
    }

    async fn execute(
        &self,
        command: &Command,
        ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse>;
}
