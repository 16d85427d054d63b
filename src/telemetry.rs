//! Telemetry utilities for command timing and tracing spans.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span for one event stream connection.
    pub fn connection(conn_id: u64, peer: &str) -> Span {
        info_span!("jukebox.connection", conn_id, peer = %peer)
    }

    /// Span for one command execution.
    pub fn command(name: &str, user: &str, channel_id: Option<&str>) -> Span {
        if let Some(channel_id) = channel_id {
            info_span!("jukebox.command", command = %name, user = %user, channel_id = %channel_id)
        } else {
            info_span!("jukebox.command", command = %name, user = %user)
        }
    }
}
