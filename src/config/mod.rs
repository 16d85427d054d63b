//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, CommandsConfig, YouTubeConfig)
//! - [`listen`]: Network listener configuration (HttpConfig, EventStreamConfig)
//! - [`validation`]: Start-up checks that report every problem at once

mod listen;
mod types;
pub mod validation;

pub use listen::{EventStreamConfig, HttpConfig};
pub use types::{CommandsConfig, Config, ConfigError, DatabaseConfig, ServerConfig, YouTubeConfig};
pub use validation::{ValidationError, validate};
