//! Protocol errors.

use thiserror::Error;

/// Errors produced while encoding or decoding event stream frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not valid JSON or does not match any known shape.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The frame was empty.
    #[error("empty frame")]
    Empty,
}
