//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// PlaylistId validation error
    #[error("PlaylistId cannot be empty")]
    PlaylistIdEmpty,

    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// SongTitle validation error
    #[error("Song title cannot be empty")]
    SongTitleEmpty,

    /// ArtistName validation error
    #[error("Artist name cannot be empty")]
    ArtistNameEmpty,
}

/// Errors raised by the Track Store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The underlying store failed (I/O, constraint violation, ...)
    #[error("storage failure: {0}")]
    Storage(String),
}
