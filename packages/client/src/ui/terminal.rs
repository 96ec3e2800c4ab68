//! Terminal implementation of [`Presenter`].

use std::io::Write;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::{LobbyCode, Session};

use super::{formatter::SessionFormatter, presenter::Presenter};

/// A second Ctrl+C within this window confirms leaving.
pub const LEAVE_CONFIRM_WINDOW: Duration = Duration::from_secs(3);

/// Two-press confirmation gate.
#[derive(Debug, Default)]
pub struct LeaveGate {
    armed_at: Option<Instant>,
}

impl LeaveGate {
    /// Returns `true` when a previous request is still inside the window.
    /// Otherwise arms the gate and returns `false`.
    pub fn request(&mut self, now: Instant) -> bool {
        match self.armed_at {
            Some(armed_at) if now.duration_since(armed_at) <= LEAVE_CONFIRM_WINDOW => {
                self.armed_at = None;
                true
            }
            _ => {
                self.armed_at = Some(now);
                false
            }
        }
    }
}

/// Prints screens to stdout and redisplays the input prompt.
pub struct TerminalPresenter {
    local_name: String,
    leave_gate: Mutex<LeaveGate>,
}

impl TerminalPresenter {
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            leave_gate: Mutex::new(LeaveGate::default()),
        }
    }

    fn print(&self, text: &str) {
        print!("{}", text);
        redisplay_prompt(&self.local_name);
    }
}

impl Presenter for TerminalPresenter {
    fn render_lobby(&self, code: &LobbyCode, members: &[String]) {
        self.print(&SessionFormatter::format_lobby(code, members, &self.local_name));
    }

    fn render_game(&self, session: &Session) {
        self.print(&SessionFormatter::format_game(session));
    }

    fn notify(&self, message: &str) {
        self.print(&SessionFormatter::format_notice(message));
    }

    fn confirm_leave(&self) -> bool {
        let confirmed = self
            .leave_gate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .request(Instant::now());
        if !confirmed {
            self.print(&SessionFormatter::format_notice(&format!(
                "The game is still running. Press Ctrl+C again within {} seconds to leave.",
                LEAVE_CONFIRM_WINDOW.as_secs()
            )));
        }
        confirmed
    }
}

/// Redisplay the prompt after printing
pub fn redisplay_prompt(local_name: &str) {
    print!("{}> ", local_name);
    std::io::stdout().flush().ok();
}
