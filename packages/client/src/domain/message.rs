//! Inbound game messages.

use super::{ChoicePrompt, Roster};

/// Tags understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTag {
    Update,
    Info,
    Choice,
    StopChoice,
    Log,
}

impl MessageTag {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "update" => Some(Self::Update),
            "info" => Some(Self::Info),
            "choice" => Some(Self::Choice),
            "stopChoice" => Some(Self::StopChoice),
            "log" => Some(Self::Log),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Info => "info",
            Self::Choice => "choice",
            Self::StopChoice => "stopChoice",
            Self::Log => "log",
        }
    }
}

/// A decoded game-phase frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Full roster replacement.
    Update(Roster),
    /// One-shot notice for the user.
    Info(String),
    /// The server awaits a decision.
    Choice(ChoicePrompt),
    /// The decision window has closed.
    StopChoice,
    /// Narration line for the event log.
    Log(String),
    /// A tag this client does not know.
    Unrecognized { tag: String },
}

impl ServerMessage {
    pub fn tag(&self) -> &str {
        match self {
            Self::Update(_) => MessageTag::Update.as_str(),
            Self::Info(_) => MessageTag::Info.as_str(),
            Self::Choice(_) => MessageTag::Choice.as_str(),
            Self::StopChoice => MessageTag::StopChoice.as_str(),
            Self::Log(_) => MessageTag::Log.as_str(),
            Self::Unrecognized { tag } => tag,
        }
    }
}
