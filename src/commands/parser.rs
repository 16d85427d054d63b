//! Text to [`Command`].

use crate::commands::model::Command;
use crate::commands::registry::CommandRegistry;

/// Resolves the leading token of a text against the registry.
pub struct TextCommandParser<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> TextCommandParser<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }

    /// `None` when the leading token names no registered command.
    ///
    /// The resulting key is the one typed, shorthand or not; lookup in the
    /// registry resolves either.
    pub fn parse_text_to_command(&self, text: &str) -> Option<Command> {
        let text = text.trim();
        let (key, raw_args) = match text.split_once(char::is_whitespace) {
            Some((key, rest)) => (key, rest.trim_start()),
            None => (text, ""),
        };

        self.registry.get(key)?;
        Some(Command::new(key, raw_args))
    }
}
