//! Error types for generator calls.

use std::time::Duration;

use thiserror::Error;

/// Errors that can end a generator call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GeneratorError {
    /// The generator could not be reached (connection, spawn, I/O).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The generator answered with an error status.
    #[error("generator rejected the request: {detail}")]
    Rejected {
        /// Status and output reported by the generator.
        detail: String,
    },

    /// The generator answered successfully but produced no text.
    #[error("generator returned no output")]
    EmptyOutput,

    /// No answer within the configured limit.
    #[error("generator did not answer within {after:?}")]
    Timeout {
        /// The limit that elapsed.
        after: Duration,
    },

    /// The caller cancelled the request.
    #[error("request was cancelled")]
    Cancelled,
}

impl GeneratorError {
    /// Message shown on the output surface.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("Sorry, an internal error has occurred: {self}")
    }

    /// Whether the failure happened below the generator protocol.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }
}

impl From<reqwest::Error> for GeneratorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type alias for generator calls.
pub type Result<T> = std::result::Result<T, GeneratorError>;
