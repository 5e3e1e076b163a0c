//! Realtime collaborative playlist server.
//!
//! Clients join a room per playlist over WebSocket, add and remove songs
//! (persisted in SQLite) and share an ephemeral playback state. Every
//! mutation is broadcast to the other members of the room.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{ServerArgs, ServerConfig};
pub use error::ServerError;
pub use ui::{run as run_server, run_with_listener};
