//! Lobby action channel DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LobbyRequestType {
    NumPlayers,
    Start,
}

/// `POST /lobby` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyRequest {
    pub r#type: LobbyRequestType,
    pub code: String,
}

/// `POST /lobby` JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbyResponse {
    #[serde(default)]
    pub content: serde_json::Value,
}
