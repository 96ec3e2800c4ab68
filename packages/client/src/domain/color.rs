//! Per-player display colors.

use std::collections::HashMap;

use super::Player;

/// A display color from the fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(&'static str);

impl Color {
    /// Hex notation, e.g. `#19D2E8`.
    pub fn hex(&self) -> &'static str {
        self.0
    }

    /// RGB components parsed from the hex notation.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or(u8::MAX)
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

/// Six visually distinct colors, assigned by roster position.
pub const PALETTE: [Color; 6] = [
    Color("#19D2E8"),
    Color("#44DFB6"),
    Color("#77EA83"),
    Color("#E6D517"),
    Color("#E8AA14"),
    Color("#FF5714"),
];

/// Assign colors by position: the player at index `i` gets `PALETTE[i % 6]`.
///
/// Deterministic and order-sensitive. Callers invoke it once per session,
/// on the first roster received.
pub fn assign_colors(players: &[Player]) -> ColorMap {
    let mut colors = ColorMap::default();
    for player in players {
        colors.assign_next(&player.name);
    }
    colors
}

/// Player name to color. An entry never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorMap {
    colors: HashMap<String, Color>,
}

impl ColorMap {
    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Give colors to players that joined after the first snapshot.
    ///
    /// Late joiners continue the cyclic palette in the order they first
    /// appear. Existing entries are left untouched. Returns the names that
    /// were newly assigned.
    pub fn extend_late_joiners(&mut self, players: &[Player]) -> Vec<String> {
        let mut added = Vec::new();
        for player in players {
            if !self.colors.contains_key(&player.name) {
                self.assign_next(&player.name);
                added.push(player.name.clone());
            }
        }
        added
    }

    fn assign_next(&mut self, name: &str) {
        let color = PALETTE[self.colors.len() % PALETTE.len()];
        self.colors.entry(name.to_string()).or_insert(color);
    }
}
