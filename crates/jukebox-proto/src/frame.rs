//! Event stream frames.
//!
//! Each WebSocket text frame carries one JSON object tagged by `event`.
//!
//! Server to player:
//!
//! ```text
//! {"event":"events","data":{"id":"PauseEvent"}}
//! {"event":"events","data":{"id":"PlayerStateRequestEvent"},"ack":7}
//! ```
//!
//! Player to server:
//!
//! ```text
//! {"event":"ack","ack":7,"state":{...}}
//! {"event":"events","data":{"id":"PlayerStateUpdateEvent","state":{...}}}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::event::EventData;
use crate::state::PlayerState;

/// A frame sent from the server to a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ServerFrame {
    /// An event to apply. When `ack` is set the player must answer with
    /// [`ClientFrame::Ack`] carrying the same id.
    Events {
        /// The event.
        data: EventData,
        /// Correlation id for request/response events.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ack: Option<u64>,
    },
}

impl ServerFrame {
    /// A fire-and-forget event.
    pub fn event(data: EventData) -> Self {
        Self::Events { data, ack: None }
    }

    /// An event that expects an acknowledgement.
    pub fn request(data: EventData, ack: u64) -> Self {
        Self::Events {
            data,
            ack: Some(ack),
        }
    }

    /// Encode as JSON text.
    pub fn to_text(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON text.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        if text.trim().is_empty() {
            return Err(ProtocolError::Empty);
        }
        Ok(serde_json::from_str(text)?)
    }
}

/// A frame sent from a player to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientFrame {
    /// Answer to a [`ServerFrame::Events`] that carried an ack id.
    Ack {
        /// The id being answered.
        ack: u64,
        /// The player's state at the time of the request.
        state: PlayerState,
    },
    /// An event reported by the player.
    Events {
        /// The event.
        data: EventData,
    },
}

impl ClientFrame {
    /// Encode as JSON text.
    pub fn to_text(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON text.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        if text.trim().is_empty() {
            return Err(ProtocolError::Empty);
        }
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fire_and_forget_frame_omits_ack() {
        let text = ServerFrame::event(EventData::Pause).to_text().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"event": "events", "data": {"id": "PauseEvent"}}));
    }

    #[test]
    fn request_frame_carries_ack() {
        let frame = ServerFrame::request(EventData::PlayerStateRequest, 7);
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["ack"], 7);
        assert_eq!(value["data"]["id"], "PlayerStateRequestEvent");
    }

    #[test]
    fn parses_player_ack() {
        let frame = ClientFrame::parse(
            r#"{"event":"ack","ack":3,"state":{"queue":[],"volume":40,"playing":false}}"#,
        )
        .unwrap();
        match frame {
            ClientFrame::Ack { ack, state } => {
                assert_eq!(ack, 3);
                assert_eq!(state.volume, 40);
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn parses_player_event() {
        let frame =
            ClientFrame::parse(r#"{"event":"events","data":{"id":"ResumeEvent"}}"#).unwrap();
        assert_eq!(frame, ClientFrame::Events { data: EventData::Resume });
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(ClientFrame::parse("   "), Err(ProtocolError::Empty)));
        assert!(matches!(
            ClientFrame::parse("{\"event\":\"dance\"}"),
            Err(ProtocolError::Malformed(_))
        ));
    }
}
