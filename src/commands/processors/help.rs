//! `help` - list commands or explain one.

use crate::commands::model::{Command, CommandProcessingResponse, ExecutionContext, ResponseMessage};
use crate::commands::processor::CommandProcessor;
use crate::commands::registry::CommandDefinition;
use crate::error::{CommandError, CommandResult};
use async_trait::async_trait;

const KEY: &str = "help";
const SHORT_KEY: &str = "h";
const HELP_MESSAGE: &str = "Lists available commands, or explains one of them.";
const HELP_USAGES: &[&str] = &["", "<command>", "random"];

#[derive(Debug, Clone)]
struct HelpEntry {
    key: &'static str,
    short_key: Option<&'static str>,
    help_message: &'static str,
    help_usages: Option<&'static [&'static str]>,
}

/// Built after every other command is registered, from their definitions.
pub struct HelpCommand {
    entries: Vec<HelpEntry>,
    prefix: String,
}

impl HelpCommand {
    /// `prefix` is what users type before a command, e.g. `/fm`.
    pub fn new(definitions: &[CommandDefinition], prefix: impl Into<String>) -> Self {
        let mut entries: Vec<HelpEntry> = definitions
            .iter()
            .map(|d| HelpEntry {
                key: d.key,
                short_key: d.short_key,
                help_message: d.help_message,
                help_usages: d.help_usages,
            })
            .collect();
        entries.push(HelpEntry {
            key: KEY,
            short_key: Some(SHORT_KEY),
            help_message: HELP_MESSAGE,
            help_usages: Some(HELP_USAGES),
        });
        entries.sort_by_key(|e| e.key);

        Self {
            entries,
            prefix: prefix.into(),
        }
    }

    fn overview(&self) -> CommandProcessingResponse {
        let lines = self
            .entries
            .iter()
            .map(|e| match e.short_key {
                Some(short) => format!("- `{}` (`{}`): {}", e.key, short, e.help_message),
                None => format!("- `{}`: {}", e.key, e.help_message),
            })
            .collect::<Vec<_>>()
            .join("\n");

        CommandProcessingResponse::new(
            vec![
                ResponseMessage::header("Available commands"),
                ResponseMessage::markdown(lines),
            ],
            true,
        )
    }

    fn details(&self, entry: &HelpEntry) -> CommandProcessingResponse {
        let mut text = entry.help_message.to_string();
        if let Some(short) = entry.short_key {
            text.push_str(&format!("\nShorthand: `{short}`"));
        }
        if let Some(usages) = entry.help_usages {
            text.push_str("\nUsage:");
            for usage in usages {
                let line = format!("{} {} {}", self.prefix, entry.key, usage);
                text.push_str(&format!("\n- `{}`", line.trim_end()));
            }
        }

        CommandProcessingResponse::new(
            vec![
                ResponseMessage::header(format!("Command {}", entry.key)),
                ResponseMessage::markdown(text),
            ],
            true,
        )
    }
}

#[async_trait]
impl CommandProcessor for HelpCommand {
    fn key(&self) -> &'static str {
        KEY
    }

    fn short_key(&self) -> Option<&'static str> {
        Some(SHORT_KEY)
    }

    fn help_message(&self) -> &'static str {
        HELP_MESSAGE
    }

    fn help_usages(&self) -> Option<&'static [&'static str]> {
        Some(HELP_USAGES)
    }

    async fn execute(
        &self,
        command: &Command,
        _ctx: &ExecutionContext,
    ) -> CommandResult<CommandProcessingResponse> {
        let Some(wanted) = command.args().first().copied() else {
            return Ok(self.overview());
        };

        self.entries
            .iter()
            .find(|e| e.key == wanted || e.short_key == Some(wanted))
            .map(|entry| self.details(entry))
            .ok_or_else(|| CommandError::user(format!("Command `{wanted}` does not exist.")))
    }
}
