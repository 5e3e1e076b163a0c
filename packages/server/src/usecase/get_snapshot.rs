//! UseCase: プレイリストのスナップショット取得
//!
//! 永続データ（プレイリスト・曲）と一時データ（再生状態・参加ユーザー）を
//! まとめて、新規参加者や HTTP API に返す形に組み立てます。

use std::sync::Arc;

use crate::domain::{
    PlaybackRepository, PlaylistId, PlaylistSnapshot, RepositoryError, RoomRepository,
    SessionLookup, SessionRepository, TrackRepository, User,
};

/// スナップショット取得のユースケース
pub struct GetSnapshotUseCase {
    /// Repository（データアクセス層の抽象化）
    track_repository: Arc<dyn TrackRepository>,
}

impl GetSnapshotUseCase {
    /// 新しい GetSnapshotUseCase を作成
    pub fn new(track_repository: Arc<dyn TrackRepository>) -> Self {
        Self { track_repository }
    }

    /// スナップショットを構築
    ///
    /// 存在しないプレイリストでもエラーにはならず、`playlist: None` と
    /// 空の曲リストを返す。
    pub async fn execute(
        &self,
        sessions: &(dyn SessionRepository + Sync),
        rooms: &(dyn RoomRepository + Sync),
        playback: &(dyn PlaybackRepository + Sync),
        playlist_id: &PlaylistId,
    ) -> Result<PlaylistSnapshot, RepositoryError> {
        let playlist = self.track_repository.get_playlist(playlist_id).await?;
        let songs = self.track_repository.list_songs(playlist_id).await?;

        Ok(PlaylistSnapshot {
            playlist,
            songs,
            users: room_users(sessions, rooms, playlist_id),
            playback: playback.get(playlist_id),
        })
    }
}

/// Users whose connection is a member of the room, sorted by username
pub(crate) fn room_users(
    sessions: &dyn SessionRepository,
    rooms: &dyn RoomRepository,
    playlist_id: &PlaylistId,
) -> Vec<User> {
    let mut users: Vec<User> = rooms
        .members(playlist_id)
        .iter()
        .filter_map(|connection_id| match sessions.get(connection_id) {
            SessionLookup::Joined(user) => Some(user),
            SessionLookup::NotJoined => None,
        })
        .collect();

    // Sort by username for consistent ordering
    users.sort_by(|a, b| {
        a.username
            .as_str()
            .cmp(b.username.as_str())
            .then_with(|| a.id.cmp(&b.id))
    });
    users
}
