//! Session state store.
//!
//! A `Session` lives from the moment the duplex transport opens until it
//! closes. Writes go through the dispatcher only (`pub(crate)` setters);
//! presentation reads through the public accessors.

use super::{ChoicePrompt, ColorMap, EventLog, LobbyCode, Player, Roster};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    local_name: String,
    code: LobbyCode,
    roster: Roster,
    colors: Option<ColorMap>,
    prompt: Option<ChoicePrompt>,
    status: String,
    log: EventLog,
}

impl Session {
    pub fn new(local_name: impl Into<String>, code: LobbyCode) -> Self {
        Self {
            local_name: local_name.into(),
            code,
            roster: Roster::default(),
            colors: None,
            prompt: None,
            status: String::new(),
            log: EventLog::default(),
        }
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn code(&self) -> &LobbyCode {
        &self.code
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// `None` until the first roster arrives.
    pub fn colors(&self) -> Option<&ColorMap> {
        self.colors.as_ref()
    }

    pub fn prompt(&self) -> Option<&ChoicePrompt> {
        self.prompt.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// The local player's roster entry, or an empty player when absent.
    pub fn local_player(&self) -> Player {
        self.roster
            .find(&self.local_name)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn replace_roster(&mut self, roster: Roster) {
        self.roster = roster;
    }

    pub(crate) fn colors_mut(&mut self) -> Option<&mut ColorMap> {
        self.colors.as_mut()
    }

    pub(crate) fn set_colors(&mut self, colors: ColorMap) {
        self.colors = Some(colors);
    }

    pub(crate) fn set_prompt(&mut self, prompt: ChoicePrompt) {
        self.status = prompt.message.clone();
        self.prompt = Some(prompt);
    }

    /// Clear the prompt. Safe to call with no active prompt.
    pub(crate) fn clear_prompt(&mut self, status: &str) -> Option<ChoicePrompt> {
        self.status = status.to_string();
        self.prompt.take()
    }

    pub(crate) fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }
}
