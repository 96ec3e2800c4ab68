//! Infrastructure layer
//!
//! - `dto`: ワイヤフォーマット（WebSocket フレーム、ロビー API の JSON）
//! - `connection`: 接続先 URL の導出と WebSocket 接続（`FrameTransport` 実装）
//! - `action_channel`: ロビー API への HTTP リクエスト（`LobbyApi` 実装）

pub mod action_channel;
pub mod connection;
pub mod dto;

pub use action_channel::HttpLobbyApi;
pub use connection::{ConnectionHooks, ConnectionManager, Endpoint, WsConnection, lobby_url};
