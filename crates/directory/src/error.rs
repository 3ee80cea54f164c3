//! Directory-boundary error model.

use thiserror::Error;

/// Failure talking to a directory service or the report renderer.
///
/// These stay infrastructure-shaped; the controller converts them into the
/// user-facing engine taxonomy (fetch vs mutation failure) at its boundary.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The request never produced a usable response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status. For mutations,
    /// `message` already carries the first server validation message.
    #[error("directory service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl DirectoryError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    /// The message worth showing a user.
    pub fn user_message(&self) -> String {
        match self {
            DirectoryError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
