//! UseCase: ゲーム開始要求
//!
//! アクションチャンネルで人数を問い合わせ、2人以上いる場合のみ開始コマンドを送ります。
//! 実際の開始確認は双方向ストリーム（ロビーの `Start` 通知）で届くため、
//! ここでは開始コマンドのレスポンスを待つだけです。
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：2人以上で開始コマンドが送られる
//! - 異常系：問い合わせ失敗
//! - エッジケース：1人のみ、JSON 以外のレスポンス

use std::sync::Arc;

use crate::domain::{ActionChannelError, LobbyApi, LobbyCode};

/// Fewest players the start command is attempted with.
pub const MIN_PLAYERS_TO_START: i64 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The start command was sent.
    Requested { players: i64 },
    /// Not enough players; nothing was sent.
    NotEnoughPlayers { players: i64 },
    /// The count query got a non-JSON answer; nothing was sent.
    NoAnswer,
}

pub struct StartGameUseCase {
    lobby_api: Arc<dyn LobbyApi>,
}

impl StartGameUseCase {
    pub fn new(lobby_api: Arc<dyn LobbyApi>) -> Self {
        Self { lobby_api }
    }

    /// Start the game if the lobby has at least [`MIN_PLAYERS_TO_START`] players.
    pub async fn execute(&self, code: &LobbyCode) -> Result<StartOutcome, ActionChannelError> {
        let Some(players) = self.lobby_api.player_count(code).await? else {
            tracing::warn!("Lobby '{}' player count query returned no JSON answer", code);
            return Ok(StartOutcome::NoAnswer);
        };

        if players < MIN_PLAYERS_TO_START {
            tracing::info!(
                "Lobby '{}' has {} player(s), need {} to start",
                code,
                players,
                MIN_PLAYERS_TO_START
            );
            return Ok(StartOutcome::NotEnoughPlayers { players });
        }

        tracing::info!("Starting lobby '{}' with {} players", code, players);
        self.lobby_api.start(code).await?;
        Ok(StartOutcome::Requested { players })
    }
}
