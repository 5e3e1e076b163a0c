//! Domain layer for the playlist synchronization service.
//!
//! This module contains business rules that are independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{
    DEFAULT_PLAYLIST_ID, DEFAULT_PLAYLIST_NAME, NewSong, PlaybackState, Playlist, PlaylistSnapshot,
    Song, User,
};
pub use error::{RepositoryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, SongIdFactory, UserFactory};
pub use repository::{
    PlaybackRepository, RoomRepository, SessionLookup, SessionRepository, TrackRepository,
};
pub use value_object::{ArtistName, ConnectionId, PlaylistId, SongId, SongTitle, Username};
