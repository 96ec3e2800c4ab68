//! Line input for the terminal client.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

/// Typing this leaves the lobby or game.
pub const QUIT_COMMAND: &str = "/quit";

/// Something the local player did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// A non-empty line of input.
    Line(String),
    /// Ctrl+C, Ctrl+D or `/quit`.
    Leave,
}

impl UserCommand {
    /// Interpret one raw input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            None
        } else if line.eq_ignore_ascii_case(QUIT_COMMAND) {
            Some(Self::Leave)
        } else {
            Some(Self::Line(line.to_string()))
        }
    }
}

/// Spawn a blocking thread running rustyline and forward commands to the runner.
pub fn spawn_input_thread(prompt_name: String) -> mpsc::UnboundedReceiver<UserCommand> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<UserCommand>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", prompt_name);

        loop {
            let command = match rl.readline(&prompt) {
                Ok(line) => {
                    let Some(command) = UserCommand::parse(&line) else {
                        continue;
                    };
                    rl.add_history_entry(line.trim()).ok();
                    command
                }
                // Ctrl+C: leaving may still be declined, keep reading
                Err(ReadlineError::Interrupted) => UserCommand::Leave,
                Err(ReadlineError::Eof) => {
                    input_tx.send(UserCommand::Leave).ok();
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            };

            if input_tx.send(command).is_err() {
                // Runner is gone
                break;
            }
        }
    });

    input_rx
}
