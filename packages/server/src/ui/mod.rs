//! Playlist synchronization server: HTTP + WebSocket entry points.

pub mod dispatcher;
mod handler;
mod runner;
mod signal;
pub mod state;

pub use dispatcher::{CommandDispatcher, DispatcherError, DispatcherHandle, DispatcherMessage};
pub use runner::{build_router, run, run_with_listener};
