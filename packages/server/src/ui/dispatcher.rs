//! Command Dispatcher: the single writer of all ephemeral state.
//!
//! One tokio task owns the Session Registry, the Playback State Table and the
//! Room Broadcaster. Connections never touch them directly; they send
//! [`DispatcherMessage`]s through a [`DispatcherHandle`], and the task
//! processes each message to completion before taking the next one. Messages
//! from one connection keep their order because they travel through the same
//! channel.
//!
//! The use cases only see the domain's repository traits; turning their results
//! into wire events happens here.
//!
//! Commands that fail validation, come from a connection that has not joined,
//! or hit a storage error are dropped: nothing is broadcast and the client is
//! not told. Every drop is logged.

use std::sync::Arc;

use thiserror::Error;
use tokio::{
    sync::{
        mpsc::{self, UnboundedReceiver, UnboundedSender},
        oneshot,
    },
    task::JoinHandle,
};

use crate::{
    domain::{
        ConnectionId, NewSong, PlaylistId, PlaylistSnapshot, RepositoryError, SongId,
        TrackRepository,
    },
    infrastructure::{
        broadcaster::{OutboundSender, RoomBroadcaster},
        dto::websocket::{
            AddSongPayload, ChangeSongPayload, ClientEvent, CursorUpdateDto, CursorUpdatePayload,
            JoinPlaylistPayload, PlayPausePayload, PlaybackStateDto, PlaylistStateDto,
            RemoveSongPayload, ServerEvent, SongChangedDto, SongDto, UserDto,
        },
        repository::{PlaybackStateTable, SessionRegistry},
    },
    usecase::{
        AddSongError, AddSongUseCase, ChangeSongUseCase, CursorUpdateUseCase, DisconnectUseCase,
        GetSnapshotUseCase, JoinPlaylistUseCase, PlayPauseUseCase, RemoveSongUseCase,
    },
};

/// Input of the dispatcher task
#[derive(Debug)]
pub enum DispatcherMessage {
    /// A connection opened; its outbound channel becomes addressable
    Connected {
        connection_id: ConnectionId,
        sender: OutboundSender,
    },
    /// A parsed client event
    Command {
        connection_id: ConnectionId,
        event: ClientEvent,
    },
    /// A connection closed
    Disconnected { connection_id: ConnectionId },
    /// Read-only snapshot request (HTTP API)
    Snapshot {
        playlist_id: PlaylistId,
        reply: oneshot::Sender<Result<PlaylistSnapshot, RepositoryError>>,
    },
}

/// Errors seen by callers of [`DispatcherHandle`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatcherError {
    #[error("command dispatcher is not running")]
    Closed,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Cloneable entry point to the dispatcher task
#[derive(Debug, Clone)]
pub struct DispatcherHandle {
    tx: UnboundedSender<DispatcherMessage>,
}

impl DispatcherHandle {
    pub fn connect(
        &self,
        connection_id: ConnectionId,
        sender: OutboundSender,
    ) -> Result<(), DispatcherError> {
        self.send(DispatcherMessage::Connected {
            connection_id,
            sender,
        })
    }

    pub fn command(
        &self,
        connection_id: ConnectionId,
        event: ClientEvent,
    ) -> Result<(), DispatcherError> {
        self.send(DispatcherMessage::Command {
            connection_id,
            event,
        })
    }

    pub fn disconnect(&self, connection_id: ConnectionId) -> Result<(), DispatcherError> {
        self.send(DispatcherMessage::Disconnected { connection_id })
    }

    /// Ask the dispatcher for the current snapshot of a playlist.
    pub async fn snapshot(
        &self,
        playlist_id: PlaylistId,
    ) -> Result<PlaylistSnapshot, DispatcherError> {
        let (reply, rx) = oneshot::channel();
        self.send(DispatcherMessage::Snapshot { playlist_id, reply })?;
        let snapshot = rx.await.map_err(|_| DispatcherError::Closed)??;
        Ok(snapshot)
    }

    fn send(&self, message: DispatcherMessage) -> Result<(), DispatcherError> {
        self.tx.send(message).map_err(|_| DispatcherError::Closed)
    }
}

/// Owner of the ephemeral stores; see the module documentation
pub struct CommandDispatcher {
    track_repository: Arc<dyn TrackRepository>,
    sessions: SessionRegistry,
    playback: PlaybackStateTable,
    rooms: RoomBroadcaster,
}

impl CommandDispatcher {
    pub fn new(track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            track_repository,
            sessions: SessionRegistry::new(),
            playback: PlaybackStateTable::new(),
            rooms: RoomBroadcaster::new(),
        }
    }

    /// Start the dispatcher task.
    ///
    /// The task stops once every [`DispatcherHandle`] has been dropped.
    pub fn spawn(self) -> (DispatcherHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(rx));
        (DispatcherHandle { tx }, task)
    }

    async fn run(mut self, mut rx: UnboundedReceiver<DispatcherMessage>) {
        tracing::info!("Command dispatcher started");
        while let Some(message) = rx.recv().await {
            self.handle(message).await;
        }
        tracing::info!("Command dispatcher stopped");
    }

    /// Process one message to completion.
    pub async fn handle(&mut self, message: DispatcherMessage) {
        match message {
            DispatcherMessage::Connected {
                connection_id,
                sender,
            } => {
                tracing::debug!("Registering connection '{}'", connection_id);
                self.rooms.register(connection_id, sender);
            }
            DispatcherMessage::Command {
                connection_id,
                event,
            } => self.handle_event(connection_id, event).await,
            DispatcherMessage::Disconnected { connection_id } => {
                self.disconnect(&connection_id);
            }
            DispatcherMessage::Snapshot { playlist_id, reply } => {
                let snapshot = GetSnapshotUseCase::new(self.track_repository.clone())
                    .execute(&self.sessions, &self.rooms, &self.playback, &playlist_id)
                    .await;
                if reply.send(snapshot).is_err() {
                    tracing::debug!("Snapshot requester for '{}' went away", playlist_id);
                }
            }
        }
    }

    #[cfg(test)]
    fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    #[cfg(test)]
    fn playback(&self) -> &PlaybackStateTable {
        &self.playback
    }

    #[cfg(test)]
    fn rooms(&self) -> &RoomBroadcaster {
        &self.rooms
    }

    async fn handle_event(&mut self, connection_id: ConnectionId, event: ClientEvent) {
        tracing::debug!("'{}' from connection '{}'", event.name(), connection_id);
        match event {
            ClientEvent::JoinPlaylist(payload) => self.join_playlist(connection_id, payload).await,
            ClientEvent::AddSong(payload) => self.add_song(connection_id, payload).await,
            ClientEvent::RemoveSong(payload) => self.remove_song(payload).await,
            ClientEvent::PlayPause(payload) => self.play_pause(payload),
            ClientEvent::ChangeSong(payload) => self.change_song(payload),
            ClientEvent::CursorUpdate(payload) => self.cursor_update(&connection_id, payload),
        }
    }

    async fn join_playlist(&mut self, connection_id: ConnectionId, payload: JoinPlaylistPayload) {
        let Some(playlist_id) = parse_playlist_id(payload.playlist_id, "join-playlist") else {
            return;
        };

        let usecase = JoinPlaylistUseCase::new(self.track_repository.clone());
        let outcome = match usecase
            .execute(
                &mut self.sessions,
                &mut self.rooms,
                &self.playback,
                connection_id.clone(),
                playlist_id.clone(),
                payload.username,
            )
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    "Dropped join-playlist from '{}' for '{}': {}",
                    connection_id,
                    playlist_id,
                    e
                );
                return;
            }
        };

        tracing::info!(
            "User '{}' ({}) joined playlist '{}'",
            outcome.user.username,
            connection_id,
            playlist_id
        );

        let state = PlaylistStateDto::from(&outcome.snapshot);
        self.rooms
            .emit_to_connection(&connection_id, &ServerEvent::PlaylistState(state));

        let joined = ServerEvent::UserJoined(UserDto::from(&outcome.user));
        self.rooms
            .emit_to_room_except_sender(&playlist_id, &connection_id, &joined);

        let users = outcome.snapshot.users.iter().map(UserDto::from).collect();
        self.rooms.emit_to_room_except_sender(
            &playlist_id,
            &connection_id,
            &ServerEvent::UsersUpdate(users),
        );
    }

    async fn add_song(&mut self, connection_id: ConnectionId, payload: AddSongPayload) {
        let Some(playlist_id) = parse_playlist_id(payload.playlist_id, "add-song") else {
            return;
        };
        let draft = match NewSong::try_from(payload.song) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("Dropped add-song from '{}': {}", connection_id, e);
                return;
            }
        };

        let usecase = AddSongUseCase::new(self.track_repository.clone());
        match usecase
            .execute(&self.sessions, &connection_id, playlist_id.clone(), draft)
            .await
        {
            Ok(song) => {
                tracing::info!(
                    "Song '{}' added to '{}' by '{}'",
                    song.id,
                    playlist_id,
                    song.added_by
                );
                self.rooms
                    .emit_to_room(&playlist_id, &ServerEvent::SongAdded(SongDto::from(&song)));
            }
            Err(AddSongError::NotJoined(id)) => {
                tracing::debug!("Ignored add-song from connection '{}' that has not joined", id);
            }
            Err(e @ AddSongError::Repository(_)) => {
                tracing::warn!("Dropped add-song from '{}': {}", connection_id, e);
            }
        }
    }

    async fn remove_song(&mut self, payload: RemoveSongPayload) {
        let Some(playlist_id) = parse_playlist_id(payload.playlist_id, "remove-song") else {
            return;
        };
        let song_id = SongId::new(payload.song_id);

        let usecase = RemoveSongUseCase::new(self.track_repository.clone());
        match usecase.execute(&playlist_id, &song_id).await {
            Ok(removed) => {
                tracing::info!(
                    "Song '{}' removed from '{}' ({} row(s))",
                    song_id,
                    playlist_id,
                    removed
                );
                self.rooms.emit_to_room(
                    &playlist_id,
                    &ServerEvent::SongRemoved(song_id.into_string()),
                );
            }
            Err(e) => {
                tracing::warn!("Dropped remove-song for '{}': {}", song_id, e);
            }
        }
    }

    fn play_pause(&mut self, payload: PlayPausePayload) {
        let Some(playlist_id) = parse_playlist_id(payload.playlist_id, "play-pause") else {
            return;
        };
        let state = PlayPauseUseCase.execute(
            &mut self.playback,
            playlist_id.clone(),
            payload.is_playing,
            payload.current_song.map(SongId::new),
            payload.current_time,
        );
        tracing::info!("Playlist '{}' playback: {:?}", playlist_id, state);
        self.rooms.emit_to_room(
            &playlist_id,
            &ServerEvent::PlaybackState(PlaybackStateDto::from(&state)),
        );
    }

    fn change_song(&mut self, payload: ChangeSongPayload) {
        let Some(playlist_id) = parse_playlist_id(payload.playlist_id, "change-song") else {
            return;
        };

        let state = ChangeSongUseCase.execute(
            &mut self.playback,
            playlist_id.clone(),
            SongId::new(payload.song_id),
        );
        tracing::info!("Playlist '{}' playback: {:?}", playlist_id, state);
        self.rooms.emit_to_room(
            &playlist_id,
            &ServerEvent::SongChanged(SongChangedDto::from(&state)),
        );
    }

    fn cursor_update(&self, connection_id: &ConnectionId, payload: CursorUpdatePayload) {
        let Some(playlist_id) = parse_playlist_id(payload.playlist_id.clone(), "cursor-update")
        else {
            return;
        };
        let sender = match CursorUpdateUseCase.execute(&self.sessions, connection_id) {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!("Ignored cursor-update: {}", e);
                return;
            }
        };

        let event = ServerEvent::CursorUpdate(CursorUpdateDto::new(&sender, payload));
        self.rooms
            .emit_to_room_except_sender(&playlist_id, connection_id, &event);
    }

    fn disconnect(&mut self, connection_id: &ConnectionId) {
        let user = DisconnectUseCase.execute(&mut self.sessions, &mut self.rooms, connection_id);
        self.rooms.unregister(connection_id);
        match user {
            Some(user) => tracing::info!(
                "User '{}' ({}) disconnected",
                user.username,
                connection_id
            ),
            None => tracing::debug!("Connection '{}' closed without joining", connection_id),
        }
    }
}

fn parse_playlist_id(raw: String, event: &str) -> Option<PlaylistId> {
    match PlaylistId::new(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("Dropped {}: {}", event, e);
            None
        }
    }
}
