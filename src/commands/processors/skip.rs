//! `skip` - drop songs from the front of the queue.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext};
use crate::commands::processor::CommandProcessor;
use crate::error::{CommandError, CommandResult};
use crate::events::Hub;
use async_trait::async_trait;
use jukebox_proto::EventData;
use std::sync::Arc;

pub struct SkipCommand {
    hub: Arc<Hub>,
}

impl SkipCommand {
    pub fn new(hub: Arc<Hub>) -> Self {
        Self { hub }
    }
}

/// `(count, all)` from the first argument.
fn parse_skip(args: &[&str]) -> CommandResult<(u32, bool)> {
    match args.first() {
        None => Ok((1, false)),
        Some(&"all") => Ok((1, true)),
        Some(arg) => arg
            .parse::<u32>()
            .ok()
            .filter(|count| *count >= 1)
            .map(|count| (count, false))
            .ok_or_else(|| CommandError::user("Skip takes a positive number or \"all\".")),
    }
}

#[async_trait]
impl CommandProcessor for SkipCommand {
    fn key(&self) -> &'static str {
        "skip"
    }

    fn short_key(&self) -> Option<&'static str> {
        Some("s")
    }

    fn help_message(&self) -> &'static str {
        "Skips the current song, several songs, or the whole queue."
    }

    fn help_usages(&self) -> Option<&'static [&'static str]> {
        Some(&["", "<amount>", "3", "all"])
    }

    async fn execute(
        &self,
        command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let (count, all) = parse_skip(&command.args())?;
        self.hub.broadcast(EventData::Skip { count, all })?;

        let text = match (all, count) {
            (true, _) => "Skipped everything".to_string(),
            (false, 1) => "Skipped".to_string(),
            (false, count) => format!("Skipped {count} songs"),
        };
        Ok(CommandProcessingResponse::single_text(text, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_count_and_all() {
        assert_eq!(parse_skip(&[]).unwrap(), (1, false));
        assert_eq!(parse_skip(&["3"]).unwrap(), (3, false));
        assert_eq!(parse_skip(&["all"]).unwrap(), (1, true));
        assert!(parse_skip(&["0"]).is_err());
        assert!(parse_skip(&["-1"]).is_err());
        assert!(parse_skip(&["many"]).is_err());
    }
}
