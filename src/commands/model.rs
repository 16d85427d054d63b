//! Command values passed through the pipeline.

use serde::{Deserialize, Serialize};

/// A parsed invocation: the key it was addressed by and everything after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub key: String,
    pub raw_args: String,
}

impl Command {
    pub fn new(key: impl Into<String>, raw_args: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw_args: raw_args.into(),
        }
    }

    /// Split the arguments on `delimiter`, trimming each piece and dropping empty ones.
    pub fn args_by_delimiter(&self, delimiter: char) -> Vec<&str> {
        self.raw_args
            .split(delimiter)
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .collect()
    }

    /// Whitespace separated arguments.
    pub fn args(&self) -> Vec<&str> {
        self.raw_args.split_whitespace().collect()
    }
}

/// Who issued a command and how the answer should be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    pub user: String,
    pub channel_id: Option<String>,
    /// Force the response to be visible to the issuer only.
    pub issuer_only: bool,
}

impl ExecutionContext {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ..Self::default()
        }
    }

    pub fn in_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Plain,
    Markdown,
    Header,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
}

impl ResponseMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageType::Plain,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageType::Markdown,
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageType::Header,
        }
    }
}

/// The uniform outcome of a command, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandProcessingResponse {
    pub messages: Vec<ResponseMessage>,
    pub is_visible_to_issuer_only: bool,
}

impl CommandProcessingResponse {
    pub fn new(messages: Vec<ResponseMessage>, is_visible_to_issuer_only: bool) -> Self {
        Self {
            messages,
            is_visible_to_issuer_only,
        }
    }

    /// One plain message.
    pub fn single_text(text: impl Into<String>, is_visible_to_issuer_only: bool) -> Self {
        Self::new(vec![ResponseMessage::plain(text)], is_visible_to_issuer_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn args_collapse_whitespace_runs() {
        let command = Command::new("random", "  3   britney  spears ");
        assert_eq!(command.args(), ["3", "britney", "spears"]);
        assert_eq!(command.args_by_delimiter(' '), ["3", "britney", "spears"]);
    }

    #[test]
    fn args_by_custom_delimiter() {
        let command = Command::new("add", "Toxic | tox123 |");
        assert_eq!(command.args_by_delimiter('|'), ["Toxic", "tox123"]);
        assert!(Command::new("skip", "").args().is_empty());
    }

    #[test]
    fn response_wire_shape() {
        let response = CommandProcessingResponse::new(
            vec![ResponseMessage::header("Tags"), ResponseMessage::markdown("- a")],
            false,
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "messages": [
                    {"text": "Tags", "type": "HEADER"},
                    {"text": "- a", "type": "MARKDOWN"}
                ],
                "isVisibleToIssuerOnly": false
            })
        );
    }
}
