//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

/// Bare string the server pushes in the lobby when the game starts.
pub const START_SENTINEL: &str = "Start";

/// Game-phase envelope: `{ type, content, message? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMessage {
    pub r#type: String,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Player as serialized by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    #[serde(default)]
    pub coins: u32,
    #[serde(default)]
    pub cards: Vec<Option<String>>,
}

/// Lobby-phase frame. Told apart by shape only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LobbyFrame {
    Sentinel(String),
    Members(Vec<LobbyMember>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LobbyMember {
    Name(String),
    Player { name: String },
}

impl LobbyMember {
    pub fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Player { name } => name,
        }
    }
}
