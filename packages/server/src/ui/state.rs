//! Shared application state.

use super::dispatcher::DispatcherHandle;

/// State handed to every axum handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Entry point to the command dispatcher (single writer of room state)
    pub dispatcher: DispatcherHandle,
}

impl AppState {
    pub fn new(dispatcher: DispatcherHandle) -> Self {
        Self { dispatcher }
    }
}
