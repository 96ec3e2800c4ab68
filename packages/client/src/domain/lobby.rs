//! Pre-game lobby model.

use std::fmt;

/// Lobby code identifying a game session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LobbyCode(String);

impl LobbyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LobbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An event pushed over the duplex stream while waiting in the lobby.
///
/// The wire format distinguishes these by payload shape (a bare `"Start"`
/// string or a member list); the decision is made once, in the DTO
/// conversion, and everything past that point matches on this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyEvent {
    /// Current lobby membership, in server order.
    RosterUpdate { members: Vec<String> },
    /// The game has started; stop listening for lobby updates.
    GameStarted,
}
