//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::infrastructure::connection::{DEFAULT_DEV_PORT, DEFAULT_SERVICE_PORT};

/// Page location used when none is given.
pub const DEFAULT_LOCATION: &str = "http://localhost:3000/";

/// Extra attempts for a failed lobby request.
pub const DEFAULT_ACTION_RETRIES: u32 = 1;

/// Per-attempt timeout for lobby requests.
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to run one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Display name, unique within the lobby
    pub name: String,
    /// Lobby code
    pub code: String,
    /// URL of the page the player would be on; service URLs are derived from it
    pub location: Url,
    pub service_port: u16,
    pub dev_port: u16,
    /// Skip the lobby and join a running game
    pub rejoin: bool,
    pub action_retries: u32,
    pub action_timeout: Duration,
}

impl ClientConfig {
    pub fn new(name: impl Into<String>, code: impl Into<String>, location: Url) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            location,
            service_port: DEFAULT_SERVICE_PORT,
            dev_port: DEFAULT_DEV_PORT,
            rejoin: false,
            action_retries: DEFAULT_ACTION_RETRIES,
            action_timeout: DEFAULT_ACTION_TIMEOUT,
        }
    }
}
