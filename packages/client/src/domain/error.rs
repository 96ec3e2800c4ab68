//! Domain error types.

use thiserror::Error;

/// A frame that could not be turned into a message.
///
/// Always recoverable: the frame is dropped and the connection stays open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("frame does not match the message envelope: {0}")]
    InvalidEnvelope(String),

    #[error("content of '{tag}' message has an unexpected shape: {reason}")]
    InvalidContent { tag: String, reason: String },

    #[error("player '{0}' appears more than once in the roster")]
    DuplicatePlayer(String),

    #[error("binary frame is not valid UTF-8")]
    NotUtf8,
}

/// Errors raised when the local player picks a choice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("no choice is being asked for right now")]
    NoActivePrompt,

    #[error("'{0}' is not one of the offered choices")]
    UnknownOption(String),
}

/// Duplex transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {reason}")]
    ConnectFailed { url: String, reason: String },

    #[error("failed to send frame: {0}")]
    SendFailed(String),

    #[error("connection is already closed")]
    Closed,
}

/// Action channel (HTTP side channel) errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionChannelError {
    #[error("lobby request failed: {0}")]
    RequestFailed(String),

    #[error("lobby request timed out")]
    Timeout,

    #[error("lobby request returned status {0}")]
    UnexpectedStatus(u16),

    #[error("lobby response could not be parsed: {0}")]
    InvalidResponse(String),
}
