//! Shared utilities for the Influence game client binaries.

pub mod logger;
