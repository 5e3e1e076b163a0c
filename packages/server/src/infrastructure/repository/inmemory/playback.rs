//! Playback State Table: what each playlist is currently playing.

use std::collections::HashMap;

use crate::domain::{PlaybackRepository, PlaybackState, PlaylistId};

/// Per-playlist ephemeral playback state, last write wins
#[derive(Debug, Default)]
pub struct PlaybackStateTable {
    states: HashMap<PlaylistId, PlaybackState>,
}

impl PlaybackStateTable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackRepository for PlaybackStateTable {
    fn get(&self, playlist_id: &PlaylistId) -> PlaybackState {
        self.states.get(playlist_id).cloned().unwrap_or_default()
    }

    fn set(&mut self, playlist_id: PlaylistId, state: PlaybackState) {
        self.states.insert(playlist_id, state);
    }
}
