//! Action channel trait 定義
//!
//! 双方向ストリームとは独立した request/response のサイドチャンネル。
//! ロビーの人数問い合わせとゲーム開始コマンドに使われます。

use async_trait::async_trait;

use super::{ActionChannelError, LobbyCode};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LobbyApi: Send + Sync {
    /// Ask the server how many players are in the lobby.
    ///
    /// `Ok(None)` means the server answered with something other than JSON.
    async fn player_count(&self, code: &LobbyCode) -> Result<Option<i64>, ActionChannelError>;

    /// Ask the server to start the game. Confirmation arrives over the duplex
    /// stream, not in this response.
    async fn start(&self, code: &LobbyCode) -> Result<(), ActionChannelError>;
}
