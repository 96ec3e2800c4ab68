//! Presentation capability the session runner calls into.

use crate::domain::{LobbyCode, Session};

/// Everything user-facing the core needs: rendering, one-shot notices, and
/// the leave-confirmation gate. Implementations must not block for long.
pub trait Presenter: Send + Sync {
    /// Show the lobby member list.
    fn render_lobby(&self, code: &LobbyCode, members: &[String]);

    /// Show the game screen for the current session state.
    fn render_game(&self, session: &Session);

    /// Show a one-shot notice (server `info` messages, disconnects, local errors).
    fn notify(&self, message: &str);

    /// Ask whether the player really wants to leave a running game.
    fn confirm_leave(&self) -> bool;
}
