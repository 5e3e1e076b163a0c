//! Core domain models for the playlist synchronization service.

use super::value_object::{ArtistName, ConnectionId, PlaylistId, SongId, SongTitle, Username};

/// Identifier of the playlist that always exists
pub const DEFAULT_PLAYLIST_ID: &str = "default";

/// Display name given to the default playlist when it is created
pub const DEFAULT_PLAYLIST_NAME: &str = "Vibes Playlist";

/// A durable, shared playlist. Its id is also the name of its broadcast room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    /// Playlist identifier
    pub id: PlaylistId,
    /// Display name
    pub name: String,
    /// Creation timestamp (SQLite DATETIME text, UTC)
    pub created_at: String,
}

impl Playlist {
    /// Create a new playlist
    pub fn new(id: PlaylistId, name: String, created_at: String) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }
}

/// Client-supplied fields of a song that is about to be added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub title: SongTitle,
    pub artist: ArtistName,
    /// Display string, not parsed
    pub duration: Option<String>,
    /// External media reference, not validated
    pub video_id: Option<String>,
    /// External thumbnail reference, not validated
    pub thumbnail: Option<String>,
}

/// A song owned by exactly one playlist
///
/// `position` is a display hint: the number of songs the playlist held when
/// this one was inserted. Concurrent inserts may share a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: SongId,
    pub playlist_id: PlaylistId,
    pub title: SongTitle,
    pub artist: ArtistName,
    pub duration: Option<String>,
    pub video_id: Option<String>,
    pub thumbnail: Option<String>,
    /// Username captured at insertion time (copy, not a live reference)
    pub added_by: String,
    pub position: i64,
    pub created_at: String,
}

impl Song {
    /// Materialize a song from its client-supplied fields
    pub fn new(
        id: SongId,
        playlist_id: PlaylistId,
        draft: NewSong,
        added_by: &Username,
        position: i64,
        created_at: String,
    ) -> Self {
        Self {
            id,
            playlist_id,
            title: draft.title,
            artist: draft.artist,
            duration: draft.duration,
            video_id: draft.video_id,
            thumbnail: draft.thumbnail,
            added_by: added_by.as_str().to_string(),
            position,
            created_at,
        }
    }
}

/// Ephemeral participant bound to a single connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Equals the owning connection's id
    pub id: ConnectionId,
    pub username: Username,
    /// CSS color, e.g. `hsl(212, 70%, 50%)`
    pub color: String,
}

impl User {
    /// Create a new user
    pub fn new(id: ConnectionId, username: Username, color: String) -> Self {
        Self {
            id,
            username,
            color,
        }
    }
}

/// Ephemeral playback state of a playlist
///
/// The default value (`None`, not playing) stands for a playlist nobody has
/// started yet. `current_time` is the client-reported offset in seconds; the
/// server relays it and never advances it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pub current_song: Option<SongId>,
    pub is_playing: bool,
    pub current_time: Option<f64>,
}

impl PlaybackState {
    pub fn new(current_song: Option<SongId>, is_playing: bool) -> Self {
        Self {
            current_song,
            is_playing,
            current_time: None,
        }
    }

    pub fn with_current_time(mut self, current_time: Option<f64>) -> Self {
        self.current_time = current_time;
        self
    }

    /// State after switching to `song_id`: playing from the start
    pub fn playing(song_id: SongId) -> Self {
        Self::new(Some(song_id), true).with_current_time(Some(0.0))
    }
}

/// Authoritative state of one playlist as seen by a newly joined client
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSnapshot {
    /// `None` when the playlist row does not exist
    pub playlist: Option<Playlist>,
    /// Ordered by position ascending
    pub songs: Vec<Song>,
    /// Users currently in the playlist's room
    pub users: Vec<User>,
    pub playback: PlaybackState,
}
