//! UseCase layer
//!
//! - `dispatcher`: 受信フレームをセッション状態に適用するステートマシン
//! - `start_game`: 人数を確認してからゲーム開始を要求する

pub mod dispatcher;
pub mod start_game;

pub use dispatcher::{Dispatched, Dispatcher, STARTED_GAME, SyncState};
pub use start_game::{MIN_PLAYERS_TO_START, StartGameUseCase, StartOutcome};
