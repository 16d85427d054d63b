//! Unified error handling for the jukebox server.
//!
//! This module provides the error hierarchy shared by the command pipeline
//! and the event stream, with metric labels and the text shown to whoever
//! issued a command.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::db::DbError;

/// Shown to the issuer when a collaborator fails. The cause is only logged.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again later.";

// ============================================================================
// Command Errors (command processing)
// ============================================================================

/// Errors that can occur while executing a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Bad arguments, out-of-range values, empty results. Shown verbatim.
    #[error("{0}")]
    UserInput(String),

    #[error("no player is connected")]
    NoPrimary,

    #[error("player did not answer in time")]
    Timeout,

    #[error("event stream error: {0}")]
    EventStream(HubError),

    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("video catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl CommandError {
    /// Shorthand for a user input failure.
    pub fn user(message: impl Into<String>) -> Self {
        Self::UserInput(message.into())
    }

    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserInput(_) => "user_input",
            Self::NoPrimary => "no_primary",
            Self::Timeout => "timeout",
            Self::EventStream(_) => "event_stream",
            Self::Database(_) => "database",
            Self::Catalog(_) => "catalog",
        }
    }

    /// The text the issuer sees.
    pub fn user_message(&self) -> String {
        match self {
            Self::UserInput(message) => message.clone(),
            Self::NoPrimary => "No player is connected right now.".to_string(),
            Self::Timeout => "The player did not answer in time.".to_string(),
            Self::EventStream(_) | Self::Database(_) | Self::Catalog(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

impl From<HubError> for CommandError {
    fn from(err: HubError) -> Self {
        match err {
            HubError::NoPrimary => Self::NoPrimary,
            HubError::Timeout => Self::Timeout,
            other => Self::EventStream(other),
        }
    }
}

/// Result type for command processors.
pub type CommandResult<T> = Result<T, CommandError>;

// ============================================================================
// Registry Errors (start-up)
// ============================================================================

/// Command registration errors. Raised while the registry is being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command key '{0}' is already registered")]
    DuplicateKey(String),

    #[error("command key must not be empty")]
    EmptyKey,
}

// ============================================================================
// Event Stream Errors
// ============================================================================

/// Event stream hub errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    /// No connection holds the primary role.
    #[error("no primary connection")]
    NoPrimary,

    /// The primary did not answer a state request before the deadline.
    #[error("state request timed out")]
    Timeout,

    /// The primary went away while a request was pending.
    #[error("primary disconnected before answering")]
    Disconnected,

    #[error("failed to encode frame: {0}")]
    Encode(String),
}

// ============================================================================
// Database Errors (re-exported, kept in db module for sqlx proximity)
// ============================================================================

// DbError stays in db/mod.rs because it has #[from] sqlx::Error which requires
// sqlx to be in scope. CatalogError lives next to the reqwest client for the
// same reason.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_codes() {
        assert_eq!(CommandError::user("nope").error_code(), "user_input");
        assert_eq!(CommandError::NoPrimary.error_code(), "no_primary");
        assert_eq!(
            CommandError::Database(DbError::Internal("x".into())).error_code(),
            "database"
        );
    }

    #[test]
    fn test_user_input_is_shown_verbatim() {
        let err = CommandError::user("Give me a number between 1 and 50.");
        assert_eq!(err.user_message(), "Give me a number between 1 and 50.");
        assert_eq!(err.to_string(), err.user_message());
    }

    #[test]
    fn test_collaborator_failures_are_hidden() {
        let err = CommandError::Database(DbError::Internal("disk on fire".into()));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_hub_errors_map_to_distinct_variants() {
        assert!(matches!(CommandError::from(HubError::NoPrimary), CommandError::NoPrimary));
        assert!(matches!(CommandError::from(HubError::Timeout), CommandError::Timeout));
        assert!(matches!(
            CommandError::from(HubError::Disconnected),
            CommandError::EventStream(HubError::Disconnected)
        ));
    }
}
