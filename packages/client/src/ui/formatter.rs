//! Session formatting utilities for terminal display.

use crate::domain::{Color, EventLog, LobbyCode, Player, Session};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Formatter for the lobby and game screens
pub struct SessionFormatter;

impl SessionFormatter {
    /// Format the lobby screen
    ///
    /// # Arguments
    ///
    /// * `code` - Lobby code to share with other players
    /// * `members` - Names of the players in the lobby
    /// * `local_name` - The local player's name (to mark as "me")
    pub fn format_lobby(code: &LobbyCode, members: &[String], local_name: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Lobby {}\n", code));

        if members.is_empty() {
            output.push_str("(No players yet)\n");
        } else {
            for member in members {
                let me_suffix = if member == local_name { " (me)" } else { "" };
                output.push_str(&format!("  {}{}\n", member, me_suffix));
            }
        }

        output.push_str("Type 'start' to begin once at least 2 players have joined.\n");
        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format the whole game screen: event log, players, hand and prompt
    pub fn format_game(session: &Session) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&Self::format_event_log(session.log()));
        output.push_str(&format!("{}\n", THIN_RULE));
        output.push_str(&Self::format_players(session));
        output.push_str(&format!("{}\n", THIN_RULE));
        output.push_str(&Self::format_hand(&session.local_player()));
        output.push_str(&Self::format_prompt(session));
        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format the event log, oldest line first
    pub fn format_event_log(log: &EventLog) -> String {
        log.entries().map(|line| format!("  {}\n", line)).collect()
    }

    /// Format one line per player with coins and remaining influence
    ///
    /// Players are painted in their assigned color; a player without one is
    /// printed plain.
    pub fn format_players(session: &Session) -> String {
        let mut output = String::new();
        if session.roster().is_empty() {
            output.push_str("(Waiting for players...)\n");
            return output;
        }

        for player in session.roster().players() {
            let me_suffix = if player.name == session.local_name() {
                " (me)"
            } else {
                ""
            };
            let color = session.colors().and_then(|colors| colors.get(&player.name));
            let line = format!(
                "{}{} - Coins: {} - Influences: {}",
                player.name,
                me_suffix,
                player.coins,
                player.influence()
            );
            output.push_str(&format!("{}\n", Self::paint(&line, color)));
        }
        output
    }

    /// Format the local player's remaining cards
    pub fn format_hand(player: &Player) -> String {
        let cards: Vec<&str> = player.held_cards().map(|card| card.as_str()).collect();
        if cards.is_empty() {
            "Your cards: (none)\n".to_string()
        } else {
            format!("Your cards: {}\n", cards.join(", "))
        }
    }

    /// Format the status line and, when a prompt is active, the numbered options
    pub fn format_prompt(session: &Session) -> String {
        let mut output = String::new();
        if !session.status().is_empty() {
            output.push_str(&format!("\n{}\n", session.status()));
        }
        if let Some(prompt) = session.prompt() {
            for (i, option) in prompt.options.iter().enumerate() {
                output.push_str(&format!("  [{}] {}\n", i + 1, option));
            }
        }
        output
    }

    /// Format a one-shot notice
    pub fn format_notice(message: &str) -> String {
        format!("\n\n{}\n! {}\n{}\n", THIN_RULE, message, THIN_RULE)
    }

    /// Format the default unexpected-disconnect notice
    ///
    /// # Arguments
    ///
    /// * `reason` - Close reason supplied by the server (may be empty)
    pub fn format_disconnect(reason: &str) -> String {
        format!("The server disconnected unexpectedly! Error: {}", reason)
    }

    /// Wrap text in a 24-bit ANSI foreground color
    pub fn paint(text: &str, color: Option<Color>) -> String {
        match color {
            Some(color) => {
                let (r, g, b) = color.rgb();
                format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text)
            }
            None => text.to_string(),
        }
    }
}
