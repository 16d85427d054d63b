//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::listen::{EventStreamConfig, HttpConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// HTTP command surface.
    pub http: HttpConfig,
    /// Player event stream.
    pub event_stream: EventStreamConfig,
    /// Command pipeline settings.
    pub commands: CommandsConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// YouTube Data API access.
    pub youtube: YouTubeConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name used in logs (e.g., "fm.office").
    pub name: String,
    /// Prometheus metrics HTTP port (default: 9090, 0 disables).
    pub metrics_port: Option<u16>,
}

/// Command pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// The only chat channel allowed to issue commands.
    pub authorized_channel_id: String,
    /// Slash command that prefixes every command (e.g., "/fm").
    /// Other slash commands are treated as the command key itself.
    #[serde(default = "default_slash_command")]
    pub slash_command: String,
    /// How many titles the random command lists before summarizing.
    #[serde(default = "default_random_title_limit")]
    pub random_title_limit: usize,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            authorized_channel_id: String::new(),
            slash_command: default_slash_command(),
            random_title_limit: default_random_title_limit(),
        }
    }
}

fn default_slash_command() -> String {
    "/fm".to_string()
}

fn default_random_title_limit() -> usize {
    10
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path, or ":memory:".
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "jukebox.db".to_string()
}

/// YouTube Data API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct YouTubeConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// API root, overridable for testing.
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_youtube_timeout")]
    pub request_timeout_secs: u64,
}

fn default_youtube_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_youtube_timeout() -> u64 {
    10
}
