//! Terminal client for Influence.
//!
//! Joins a lobby, shows who is waiting, and plays the game once the server
//! starts it. Type `start` in the lobby to begin; during the game, answer a
//! prompt by option number or text. Ctrl+C twice (or `/quit`) leaves.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin influence-client -- --name Alice --code ABCD
//! cargo run --bin influence-client -- -n Bob -c ABCD -l https://influence.example.com/
//! ```

use std::time::Duration;

use clap::Parser;
use url::Url;

use influence_client::{
    ClientConfig, SessionOutcome,
    config::{DEFAULT_ACTION_RETRIES, DEFAULT_LOCATION},
    infrastructure::{
        ConnectionHooks,
        connection::{DEFAULT_DEV_PORT, DEFAULT_SERVICE_PORT},
    },
    run_client,
    ui::{TerminalPresenter, spawn_input_thread},
};
use influence_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "influence-client")]
#[command(about = "Terminal client for the Influence card game", long_about = None)]
struct Args {
    /// Display name (must be unique within the lobby)
    #[arg(short = 'n', long)]
    name: String,

    /// Lobby code
    #[arg(short = 'c', long)]
    code: String,

    /// Page URL the game is served from; service URLs are derived from it
    #[arg(short = 'l', long, default_value = DEFAULT_LOCATION)]
    location: Url,

    /// Port of the game service
    #[arg(long, default_value_t = DEFAULT_SERVICE_PORT)]
    service_port: u16,

    /// Port of the local development page, replaced by the service port
    #[arg(long, default_value_t = DEFAULT_DEV_PORT)]
    dev_port: u16,

    /// Join a game that is already running, skipping the lobby
    #[arg(long)]
    rejoin: bool,

    /// Extra attempts for a failed lobby request
    #[arg(long, default_value_t = DEFAULT_ACTION_RETRIES)]
    action_retries: u32,

    /// Timeout in seconds for each lobby request
    #[arg(long, default_value_t = 10)]
    action_timeout_secs: u64,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        let mut config = ClientConfig::new(args.name, args.code, args.location);
        config.service_port = args.service_port;
        config.dev_port = args.dev_port;
        config.rejoin = args.rejoin;
        config.action_retries = args.action_retries;
        config.action_timeout = Duration::from_secs(args.action_timeout_secs);
        config
    }
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ClientConfig::from(Args::parse());
    let presenter = TerminalPresenter::new(config.name.clone());
    let mut commands = spawn_input_thread(config.name.clone());

    match run_client(&config, &presenter, &mut commands, ConnectionHooks::default()).await {
        Ok(SessionOutcome::Left) => tracing::info!("Left lobby '{}'", config.code),
        Ok(SessionOutcome::ReturnToEntry { reason }) => {
            tracing::error!(
                "Disconnected from lobby '{}': {}",
                config.code,
                reason.unwrap_or_default()
            );
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Client error: {}", e);
            std::process::exit(1);
        }
    }
}
