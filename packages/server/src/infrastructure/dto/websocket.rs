//! WebSocket message DTOs.
//!
//! Every frame is a JSON envelope `{"event": "<name>", "data": <payload>}`.
//! Event names and field names are the wire contract shared with existing
//! clients and must not change.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    ArtistName, NewSong, PlaybackState, Playlist, PlaylistSnapshot, Song, SongTitle, User,
    ValueObjectError,
};

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinPlaylist(JoinPlaylistPayload),
    AddSong(AddSongPayload),
    RemoveSong(RemoveSongPayload),
    PlayPause(PlayPausePayload),
    ChangeSong(ChangeSongPayload),
    CursorUpdate(CursorUpdatePayload),
}

impl ClientEvent {
    /// Wire name of the event, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinPlaylist(_) => "join-playlist",
            Self::AddSong(_) => "add-song",
            Self::RemoveSong(_) => "remove-song",
            Self::PlayPause(_) => "play-pause",
            Self::ChangeSong(_) => "change-song",
            Self::CursorUpdate(_) => "cursor-update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPlaylistPayload {
    pub playlist_id: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSongPayload {
    pub playlist_id: String,
    pub song: SongInputDto,
}

/// Song fields supplied by the client on `add-song`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInputDto {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl TryFrom<SongInputDto> for NewSong {
    type Error = ValueObjectError;

    fn try_from(dto: SongInputDto) -> Result<Self, Self::Error> {
        Ok(NewSong {
            title: SongTitle::new(dto.title)?,
            artist: ArtistName::new(dto.artist)?,
            duration: dto.duration,
            video_id: dto.video_id,
            thumbnail: dto.thumbnail,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSongPayload {
    pub playlist_id: String,
    pub song_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayPausePayload {
    pub playlist_id: String,
    pub is_playing: bool,
    #[serde(default)]
    pub current_song: Option<String>,
    /// Playback position in seconds, stored and relayed as given
    #[serde(default)]
    pub current_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSongPayload {
    pub playlist_id: String,
    pub song_id: String,
}

/// Cursor position of a client. Everything besides `playlistId` is opaque
/// and relayed untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorUpdatePayload {
    pub playlist_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Full snapshot, unicast to a connection right after it joins
    PlaylistState(PlaylistStateDto),
    UserJoined(UserDto),
    UsersUpdate(Vec<UserDto>),
    SongAdded(SongDto),
    /// Id of the removed song
    SongRemoved(String),
    PlaybackState(PlaybackStateDto),
    SongChanged(SongChangedDto),
    /// Relayed cursor position, never echoed to its sender
    CursorUpdate(CursorUpdateDto),
}

impl ServerEvent {
    /// Wire name of the event, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlaylistState(_) => "playlist-state",
            Self::UserJoined(_) => "user-joined",
            Self::UsersUpdate(_) => "users-update",
            Self::SongAdded(_) => "song-added",
            Self::SongRemoved(_) => "song-removed",
            Self::PlaybackState(_) => "playback-state",
            Self::SongChanged(_) => "song-changed",
            Self::CursorUpdate(_) => "cursor-update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDto {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl From<&Playlist> for PlaylistDto {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.as_str().to_string(),
            name: playlist.name.clone(),
            created_at: playlist.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDto {
    pub id: String,
    pub playlist_id: String,
    pub title: String,
    pub artist: String,
    pub duration: Option<String>,
    pub video_id: Option<String>,
    pub thumbnail: Option<String>,
    pub added_by: String,
    pub position: i64,
    pub created_at: String,
}

impl From<&Song> for SongDto {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.as_str().to_string(),
            playlist_id: song.playlist_id.as_str().to_string(),
            title: song.title.as_str().to_string(),
            artist: song.artist.as_str().to_string(),
            duration: song.duration.clone(),
            video_id: song.video_id.clone(),
            thumbnail: song.thumbnail.clone(),
            added_by: song.added_by.clone(),
            position: song.position,
            created_at: song.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub color: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            username: user.username.as_str().to_string(),
            color: user.color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStateDto {
    pub is_playing: bool,
    pub current_song: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_time: Option<f64>,
}

impl From<&PlaybackState> for PlaybackStateDto {
    fn from(state: &PlaybackState) -> Self {
        Self {
            is_playing: state.is_playing,
            current_song: state.current_song.as_ref().map(|id| id.as_str().to_string()),
            current_time: state.current_time,
        }
    }
}

/// `song-changed` payload; the reset position is not sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongChangedDto {
    pub current_song: Option<String>,
    pub is_playing: bool,
}

impl From<&PlaybackState> for SongChangedDto {
    fn from(state: &PlaybackState) -> Self {
        Self {
            current_song: state.current_song.as_ref().map(|id| id.as_str().to_string()),
            is_playing: state.is_playing,
        }
    }
}

/// Relayed cursor position: the sender's identity plus the client's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorUpdateDto {
    pub user_id: String,
    pub username: String,
    pub color: String,
    pub playlist_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CursorUpdateDto {
    /// Identity keys always come from the server-side User.
    pub fn new(sender: &User, payload: CursorUpdatePayload) -> Self {
        let mut extra = payload.extra;
        for key in ["userId", "username", "color", "playlistId"] {
            extra.remove(key);
        }
        Self {
            user_id: sender.id.as_str().to_string(),
            username: sender.username.as_str().to_string(),
            color: sender.color.clone(),
            playlist_id: payload.playlist_id,
            extra,
        }
    }
}

/// Snapshot payload: playlist fields flattened next to songs, users and
/// playback. A missing playlist simply contributes no fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistStateDto {
    #[serde(flatten)]
    pub playlist: Option<PlaylistDto>,
    pub songs: Vec<SongDto>,
    pub users: Vec<UserDto>,
    pub current_song: Option<String>,
    pub is_playing: bool,
}

impl From<&PlaylistSnapshot> for PlaylistStateDto {
    fn from(snapshot: &PlaylistSnapshot) -> Self {
        let playback = PlaybackStateDto::from(&snapshot.playback);
        Self {
            playlist: snapshot.playlist.as_ref().map(PlaylistDto::from),
            songs: snapshot.songs.iter().map(SongDto::from).collect(),
            users: snapshot.users.iter().map(UserDto::from).collect(),
            // An empty song id reads as "no song" in the snapshot.
            current_song: playback.current_song.filter(|id| !id.is_empty()),
            is_playing: playback.is_playing,
        }
    }
}
