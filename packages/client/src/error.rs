//! Error types for the game client.

use thiserror::Error;

use crate::domain::{ActionChannelError, TransportError};

/// Client-level errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The page location could not be turned into service URLs
    #[error("Invalid page location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    /// Duplex transport error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Lobby action channel error
    #[error(transparent)]
    ActionChannel(#[from] ActionChannelError),
}

impl ClientError {
    pub(crate) fn invalid_location(location: &url::Url, reason: impl Into<String>) -> Self {
        Self::InvalidLocation {
            location: location.to_string(),
            reason: reason.into(),
        }
    }
}
