//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::path::Path;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("commands.authorized_channel_id is required")]
    MissingAuthorizedChannel,
    #[error("commands.slash_command must start with '/', got '{0}'")]
    InvalidSlashCommand(String),
    #[error("youtube.api_key is required")]
    MissingApiKey,
    #[error("event_stream.state_request_timeout_ms must be greater than 0")]
    ZeroStateRequestTimeout,
    #[error("event_stream.outbound_queue must be greater than 0")]
    ZeroOutboundQueue,
    #[error("http.address and event_stream.address must differ ({0})")]
    SharedListenAddress(std::net::SocketAddr),
    #[error("database.path parent directory does not exist: {0}")]
    DatabasePathInvalid(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    }
    if config.commands.authorized_channel_id.trim().is_empty() {
        errors.push(ValidationError::MissingAuthorizedChannel);
    }
    if !config.commands.slash_command.starts_with('/') {
        errors.push(ValidationError::InvalidSlashCommand(
            config.commands.slash_command.clone(),
        ));
    }
    if config.youtube.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    if config.event_stream.state_request_timeout_ms == 0 {
        errors.push(ValidationError::ZeroStateRequestTimeout);
    }
    if config.event_stream.outbound_queue == 0 {
        errors.push(ValidationError::ZeroOutboundQueue);
    }
    if config.http.address == config.event_stream.address {
        errors.push(ValidationError::SharedListenAddress(config.http.address));
    }

    // Database path validation
    if config.database.path != ":memory:" {
        let db_path = Path::new(&config.database.path);
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ValidationError::DatabasePathInvalid(config.database.path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
