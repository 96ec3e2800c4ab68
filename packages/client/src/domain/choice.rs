//! Server-issued choice prompts.

use super::ChoiceError;

/// Status shown after a choice has been made or withdrawn.
pub const WAITING_FOR_OTHERS: &str = "Waiting for others...";

/// Options the server is waiting on the local player to pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePrompt {
    pub options: Vec<String>,
    pub message: String,
}

impl ChoicePrompt {
    pub fn new(options: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            options,
            message: message.into(),
        }
    }

    /// Resolve user input to one of the offered options.
    ///
    /// Accepts the option text (case-insensitive) or a 1-based index.
    /// Text wins when an option itself looks like a number.
    pub fn resolve(&self, selection: &str) -> Result<&str, ChoiceError> {
        let selection = selection.trim();
        if let Some(option) = self
            .options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(selection))
        {
            return Ok(option);
        }

        selection
            .parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
            .ok_or_else(|| ChoiceError::UnknownOption(selection.to_string()))
    }
}
