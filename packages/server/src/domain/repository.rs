//! Repository traits.
//!
//! The domain layer owns the traits; infrastructure provides the
//! implementations. `TrackRepository` is the durable Track Store (SQLite).
//! The other three describe the ephemeral stores that the command
//! dispatcher owns and mutates as their single writer, which is why their
//! mutators take `&mut self` and nothing is async.

use async_trait::async_trait;

use super::{
    entity::{PlaybackState, Playlist, Song, User},
    error::RepositoryError,
    value_object::{ConnectionId, PlaylistId, SongId},
};

/// Result of looking up a connection's User
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    /// The connection has joined and owns this User
    Joined(User),
    /// The connection never joined, or has already disconnected
    NotJoined,
}

/// Session Registry: which User belongs to which live connection
pub trait SessionRepository: Send {
    /// Allocate a User for `connection_id`, replacing any previous one.
    fn create(&mut self, connection_id: ConnectionId, requested_username: Option<String>) -> User;

    fn get(&self, connection_id: &ConnectionId) -> SessionLookup;

    /// Drop the connection's User. No-op when absent.
    fn remove(&mut self, connection_id: &ConnectionId) -> Option<User>;
}

/// Playback State Table: per-playlist state, last write wins
pub trait PlaybackRepository: Send {
    /// Current state, or the stopped default when nothing was ever set.
    fn get(&self, playlist_id: &PlaylistId) -> PlaybackState;

    /// Replace the whole state of a playlist.
    fn set(&mut self, playlist_id: PlaylistId, state: PlaybackState);
}

/// Room membership: which connections receive a playlist's broadcasts
pub trait RoomRepository: Send {
    /// Joining twice keeps a single membership.
    fn join(&mut self, connection_id: ConnectionId, room: PlaylistId);

    fn leave(&mut self, connection_id: &ConnectionId, room: &PlaylistId);

    fn leave_all(&mut self, connection_id: &ConnectionId);

    /// Current members of a room, in id order
    fn members(&self, room: &PlaylistId) -> Vec<ConnectionId>;
}

/// Durable CRUD over playlists and songs. No business logic lives here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// Insert the default playlist if it is absent.
    ///
    /// Returns `true` when this call created it.
    async fn ensure_default_playlist(&self) -> Result<bool, RepositoryError>;

    /// Get a playlist by id
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>, RepositoryError>;

    /// All songs of a playlist ordered by `position` ascending
    async fn list_songs(&self, playlist_id: &PlaylistId) -> Result<Vec<Song>, RepositoryError>;

    /// Number of songs currently stored for a playlist
    async fn count_songs(&self, playlist_id: &PlaylistId) -> Result<i64, RepositoryError>;

    /// Persist a song whose id has already been generated
    async fn insert_song(&self, song: &Song) -> Result<(), RepositoryError>;

    /// Delete a song, scoped to the playlist it is claimed to belong to.
    ///
    /// Returns the number of removed rows (0 or 1).
    async fn delete_song(
        &self,
        song_id: &SongId,
        playlist_id: &PlaylistId,
    ) -> Result<u64, RepositoryError>;
}
