//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConnectionId, RepositoryError};

/// join-playlist の失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinPlaylistError {
    #[error("failed to load playlist: {0}")]
    Repository(#[from] RepositoryError),
}

/// add-song の失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddSongError {
    /// The connection has no User (never joined, or already disconnected)
    #[error("connection '{0}' has not joined a playlist")]
    NotJoined(ConnectionId),

    #[error("failed to store song: {0}")]
    Repository(#[from] RepositoryError),
}

/// remove-song の失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoveSongError {
    #[error("failed to delete song: {0}")]
    Repository(#[from] RepositoryError),
}

/// cursor-update の失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorUpdateError {
    /// The connection has no User (never joined, or already disconnected)
    #[error("connection '{0}' has not joined a playlist")]
    NotJoined(ConnectionId),
}
