//! Duplex transport trait 定義
//!
//! セッションランナーが必要とする双方向ストリームのインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;

use super::TransportError;

/// Why the transport closed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CloseInfo {
    /// Server-supplied reason, or the read error that ended the stream.
    pub reason: Option<String>,
}

impl CloseInfo {
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    pub fn reason_or_empty(&self) -> &str {
        self.reason.as_deref().unwrap_or("")
    }
}

/// Something that happened on the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Text(String),
    Binary(Vec<u8>),
    /// Terminal. No further events follow.
    Closed(CloseInfo),
}

/// One duplex connection.
///
/// `next_event` must be cancel-safe; the runner polls it inside `select!`.
#[async_trait]
pub trait FrameTransport: Send {
    /// Wait for the next inbound event.
    async fn next_event(&mut self) -> TransportEvent;

    /// Write one text frame.
    async fn send_text(&mut self, text: String) -> Result<(), TransportError>;

    /// Close the connection from our side.
    async fn close(&mut self) -> Result<(), TransportError>;
}
