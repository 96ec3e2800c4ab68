//! Players and the roster broadcast by the server.

use std::collections::HashSet;

use super::DecodeError;

/// Identifier of an influence card (e.g. `Duke`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Public state of one player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Player {
    pub name: String,
    pub coins: u32,
    /// Influence slots in server order. `None` is a revealed or hidden-absent slot.
    pub cards: Vec<Option<CardId>>,
}

impl Player {
    pub fn new(name: impl Into<String>, coins: u32, cards: Vec<Option<CardId>>) -> Self {
        Self {
            name: name.into(),
            coins,
            cards,
        }
    }

    /// Number of influence slots still holding a card.
    pub fn influence(&self) -> usize {
        self.cards.iter().filter(|card| card.is_some()).count()
    }

    /// Cards still held, in slot order.
    pub fn held_cards(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter().flatten()
    }
}

/// Ordered player list. Names are unique; identity is by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster, rejecting duplicate names.
    pub fn new(players: Vec<Player>) -> Result<Self, DecodeError> {
        let mut seen = HashSet::with_capacity(players.len());
        for player in &players {
            if !seen.insert(player.name.as_str()) {
                return Err(DecodeError::DuplicatePlayer(player.name.clone()));
            }
        }
        Ok(Self { players })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
