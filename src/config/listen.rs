//! Network listener configuration.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

/// HTTP listener for the command and history endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Address to bind to (e.g., "0.0.0.0:8080").
    pub address: SocketAddr,
}

/// WebSocket listener that players connect to.
#[derive(Debug, Clone, Deserialize)]
pub struct EventStreamConfig {
    /// Address to bind to (e.g., "0.0.0.0:8081").
    pub address: SocketAddr,
    /// Allowed origins for the WebSocket handshake (e.g., `["https://fm.example.com"]`).
    /// Empty list allows all origins.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    /// How long a state request waits for the primary player to answer.
    #[serde(default = "default_state_request_timeout_ms")]
    pub state_request_timeout_ms: u64,
    /// Frames buffered per connection before new ones are dropped.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl EventStreamConfig {
    /// The state request deadline as a [`Duration`].
    pub fn state_request_timeout(&self) -> Duration {
        Duration::from_millis(self.state_request_timeout_ms)
    }
}

fn default_state_request_timeout_ms() -> u64 {
    3000
}

fn default_outbound_queue() -> usize {
    256
}
