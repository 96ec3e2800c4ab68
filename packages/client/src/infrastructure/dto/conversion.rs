//! Conversion logic between DTOs and domain types.
//!
//! Every inbound frame is decoded here, once. Shape-based discrimination of
//! lobby frames stays in this module; the rest of the client only sees
//! [`LobbyEvent`] and [`ServerMessage`].

use serde_json::Value;

use crate::domain::{
    CardId, ChoicePrompt, DecodeError, LobbyEvent, MessageTag, Player, Roster, ServerMessage,
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Frame → Domain
// ========================================

/// Decode a game-phase frame.
pub fn decode_game_frame(frame: &str) -> Result<ServerMessage, DecodeError> {
    let value: Value =
        serde_json::from_str(frame).map_err(|e| DecodeError::MalformedJson(e.to_string()))?;
    let envelope: dto::GameMessage =
        serde_json::from_value(value).map_err(|e| DecodeError::InvalidEnvelope(e.to_string()))?;
    ServerMessage::try_from(envelope)
}

/// Decode a lobby-phase frame.
pub fn decode_lobby_frame(frame: &str) -> Result<LobbyEvent, DecodeError> {
    let value: Value =
        serde_json::from_str(frame).map_err(|e| DecodeError::MalformedJson(e.to_string()))?;
    let lobby_frame: dto::LobbyFrame =
        serde_json::from_value(value).map_err(|e| DecodeError::InvalidEnvelope(e.to_string()))?;
    LobbyEvent::try_from(lobby_frame)
}

impl TryFrom<dto::LobbyFrame> for LobbyEvent {
    type Error = DecodeError;

    fn try_from(frame: dto::LobbyFrame) -> Result<Self, Self::Error> {
        match frame {
            dto::LobbyFrame::Sentinel(text) if text == dto::START_SENTINEL => Ok(Self::GameStarted),
            dto::LobbyFrame::Sentinel(text) => Err(DecodeError::InvalidEnvelope(format!(
                "unexpected lobby string '{}'",
                text
            ))),
            dto::LobbyFrame::Members(members) => Ok(Self::RosterUpdate {
                members: members.into_iter().map(dto::LobbyMember::into_name).collect(),
            }),
        }
    }
}

impl TryFrom<dto::GameMessage> for ServerMessage {
    type Error = DecodeError;

    fn try_from(envelope: dto::GameMessage) -> Result<Self, Self::Error> {
        let Some(tag) = MessageTag::parse(&envelope.r#type) else {
            return Ok(Self::Unrecognized {
                tag: envelope.r#type,
            });
        };

        let message = match tag {
            MessageTag::Update => {
                let players: Vec<dto::PlayerInfo> = content_as(tag, envelope.content)?;
                Self::Update(Roster::new(players.into_iter().map(Player::from).collect())?)
            }
            MessageTag::Info => Self::Info(content_as_text(envelope.content)),
            MessageTag::Choice => {
                let options: Vec<String> = content_as(tag, envelope.content)?;
                Self::Choice(ChoicePrompt::new(
                    options,
                    envelope.message.unwrap_or_default(),
                ))
            }
            MessageTag::StopChoice => Self::StopChoice,
            MessageTag::Log => Self::Log(content_as_text(envelope.content)),
        };
        Ok(message)
    }
}

impl From<dto::PlayerInfo> for Player {
    fn from(dto: dto::PlayerInfo) -> Self {
        Self {
            name: dto.name,
            coins: dto.coins,
            cards: dto
                .cards
                .into_iter()
                .map(|card| card.map(CardId::new))
                .collect(),
        }
    }
}

fn content_as<T: serde::de::DeserializeOwned>(
    tag: MessageTag,
    content: Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(content).map_err(|e| DecodeError::InvalidContent {
        tag: tag.as_str().to_string(),
        reason: e.to_string(),
    })
}

/// Text notices are usually strings; anything else is shown as JSON.
fn content_as_text(content: Value) -> String {
    match content {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ========================================
// Domain → Frame
// ========================================

/// Encode a chosen option as the outbound frame (a JSON string value).
pub fn encode_choice(choice: &str) -> String {
    Value::String(choice.to_string()).to_string()
}
