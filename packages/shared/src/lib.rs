//! Shared utilities for the Vibes workspace.
//!
//! Logger initialization and time helpers used by the server binary,
//! its library and its integration tests.

pub mod logger;
pub mod time;
