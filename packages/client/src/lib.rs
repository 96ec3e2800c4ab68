//! Client-side synchronization engine for Influence, a real-time multiplayer
//! social-deduction card game.
//!
//! The client joins a lobby over a WebSocket, renders the server-pushed
//! state, and sends the player's decisions back. Game rules live on the
//! server.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
pub mod error;
pub mod runner;

pub use config::ClientConfig;
pub use error::ClientError;
pub use runner::{SessionOutcome, SessionRunner, run_client};
