//! Data Transfer Objects (DTOs) for the game client.
//!
//! DTOs are organized by protocol:
//! - `websocket`: duplex stream frames
//! - `http`: lobby action channel bodies

pub mod conversion;
pub mod http;
pub mod websocket;
