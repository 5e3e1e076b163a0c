//! UseCase: プレイリスト参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinPlaylistUseCase::execute() メソッド
//! - ユーザー作成、ルーム参加、スナップショット構築
//!
//! ### なぜこのテストが必要か
//! - 新規参加者が現在の状態（曲・再生状態・参加者）を正しく受け取ることを保証
//! - 同じ接続の再参加でルームのメンバーが重複しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加
//! - エッジケース：同じ接続での再参加、存在しないプレイリストへの参加
//! - 異常系：ストレージエラー（状態は変更されない）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, PlaybackRepository, PlaylistId, PlaylistSnapshot, RoomRepository,
    SessionRepository, TrackRepository, User,
};

use super::{error::JoinPlaylistError, get_snapshot::room_users};

/// Result of a successful join
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    /// The User created (or re-created) for the connection
    pub user: User,
    /// State to unicast to the joining connection
    pub snapshot: PlaylistSnapshot,
}

/// プレイリスト参加のユースケース
pub struct JoinPlaylistUseCase {
    /// Repository（データアクセス層の抽象化）
    track_repository: Arc<dyn TrackRepository>,
}

impl JoinPlaylistUseCase {
    /// 新しい JoinPlaylistUseCase を作成
    pub fn new(track_repository: Arc<dyn TrackRepository>) -> Self {
        Self { track_repository }
    }

    /// プレイリスト参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `playlist_id` - 参加するプレイリスト（ルーム）の ID
    /// * `requested_username` - クライアントが名乗るユーザー名（省略可）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 作成したユーザーと参加者向けスナップショット
    /// * `Err(JoinPlaylistError)` - ストレージ読み込み失敗（状態は変更されない）
    pub async fn execute(
        &self,
        sessions: &mut dyn SessionRepository,
        rooms: &mut dyn RoomRepository,
        playback: &(dyn PlaybackRepository + Sync),
        connection_id: ConnectionId,
        playlist_id: PlaylistId,
        requested_username: Option<String>,
    ) -> Result<JoinOutcome, JoinPlaylistError> {
        // 1. 永続データを先に読み込む（失敗時は何も変更しない）
        let playlist = self.track_repository.get_playlist(&playlist_id).await?;
        let songs = self.track_repository.list_songs(&playlist_id).await?;

        // 2. ユーザーを作成（既存のユーザーは上書き）し、ルームに参加
        let user = sessions.create(connection_id.clone(), requested_username);
        rooms.join(connection_id, playlist_id.clone());

        // 3. スナップショットを構築
        let snapshot = PlaylistSnapshot {
            playlist,
            songs,
            users: room_users(sessions, rooms, &playlist_id),
            playback: playback.get(&playlist_id),
        };

        Ok(JoinOutcome { user, snapshot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ArtistName, NewSong, Playlist, RepositoryError, Song, SongId, SongTitle, Username,
        SessionLookup, repository::MockTrackRepository,
    };
    use crate::infrastructure::{
        broadcaster::RoomBroadcaster,
        repository::{PlaybackStateTable, SessionRegistry},
    };
    use tokio::sync::mpsc;

    fn playlist_id() -> PlaylistId {
        PlaylistId::new("default".to_string()).unwrap()
    }

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn stored_song() -> Song {
        Song::new(
            SongId::new("s1".to_string()),
            playlist_id(),
            NewSong {
                title: SongTitle::new("Song A".to_string()).unwrap(),
                artist: ArtistName::new("Artist A".to_string()).unwrap(),
                duration: None,
                video_id: None,
                thumbnail: None,
            },
            &Username::new("System".to_string()).unwrap(),
            0,
            "2024-01-01 00:00:00".to_string(),
        )
    }

    fn create_test_repository() -> Arc<MockTrackRepository> {
        let mut repository = MockTrackRepository::new();
        repository.expect_get_playlist().returning(|id| {
            Ok(Some(Playlist::new(
                id.clone(),
                "Vibes Playlist".to_string(),
                "2024-01-01 00:00:00".to_string(),
            )))
        });
        repository
            .expect_list_songs()
            .returning(|_| Ok(vec![stored_song()]));
        Arc::new(repository)
    }

    #[tokio::test]
    async fn test_join_playlist_success() {
        // テスト項目: 参加するとユーザー作成・ルーム参加・スナップショット構築が行われる
        // given (前提条件):
        let usecase = JoinPlaylistUseCase::new(create_test_repository());
        let mut sessions = SessionRegistry::new();
        let mut rooms = RoomBroadcaster::new();
        let playback = PlaybackStateTable::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        rooms.register(connection("c1"), tx);

        // when (操作):
        let outcome = usecase
            .execute(
                &mut sessions,
                &mut rooms,
                &playback,
                connection("c1"),
                playlist_id(),
                Some("alice".to_string()),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome.user.username.as_str(), "alice");
        assert_eq!(
            sessions.get(&connection("c1")),
            SessionLookup::Joined(outcome.user.clone())
        );
        assert!(rooms.is_member(&connection("c1"), &playlist_id()));
        assert_eq!(outcome.snapshot.songs, vec![stored_song()]);
        assert_eq!(outcome.snapshot.users, vec![outcome.user.clone()]);
        assert_eq!(
            outcome.snapshot.playlist.map(|p| p.name),
            Some("Vibes Playlist".to_string())
        );
    }

    #[tokio::test]
    async fn test_join_playlist_twice_keeps_single_membership() {
        // テスト項目: 同じ接続で 2 回参加してもメンバーは 1 つ、ユーザーは上書き
        // given (前提条件):
        let usecase = JoinPlaylistUseCase::new(create_test_repository());
        let mut sessions = SessionRegistry::new();
        let mut rooms = RoomBroadcaster::new();
        let playback = PlaybackStateTable::new();

        // when (操作):
        for name in ["alice", "alicia"] {
            usecase
                .execute(
                    &mut sessions,
                    &mut rooms,
                    &playback,
                    connection("c1"),
                    playlist_id(),
                    Some(name.to_string()),
                )
                .await
                .unwrap();
        }

        // then (期待する結果):
        assert_eq!(rooms.members(&playlist_id()), vec![connection("c1")]);
        assert_eq!(sessions.len(), 1);
        match sessions.get(&connection("c1")) {
            SessionLookup::Joined(user) => assert_eq!(user.username.as_str(), "alicia"),
            SessionLookup::NotJoined => panic!("user should exist"),
        }
    }

    #[tokio::test]
    async fn test_join_missing_playlist_is_tolerated() {
        // テスト項目: 存在しないプレイリストにも参加でき、空のスナップショットが返る
        // given (前提条件):
        let mut repository = MockTrackRepository::new();
        repository.expect_get_playlist().returning(|_| Ok(None));
        repository.expect_list_songs().returning(|_| Ok(vec![]));
        let usecase = JoinPlaylistUseCase::new(Arc::new(repository));
        let mut sessions = SessionRegistry::new();
        let mut rooms = RoomBroadcaster::new();

        // when (操作):
        let outcome = usecase
            .execute(
                &mut sessions,
                &mut rooms,
                &PlaybackStateTable::new(),
                connection("c1"),
                PlaylistId::new("nowhere".to_string()).unwrap(),
                None,
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert!(outcome.snapshot.playlist.is_none());
        assert!(outcome.snapshot.songs.is_empty());
        assert!(outcome.user.username.as_str().starts_with("User"));
    }

    #[tokio::test]
    async fn test_join_playlist_storage_error_changes_nothing() {
        // テスト項目: ストレージエラー時はユーザーもメンバーも追加されない
        // given (前提条件):
        let mut repository = MockTrackRepository::new();
        repository
            .expect_get_playlist()
            .returning(|_| Err(RepositoryError::Storage("database is locked".to_string())));
        let usecase = JoinPlaylistUseCase::new(Arc::new(repository));
        let mut sessions = SessionRegistry::new();
        let mut rooms = RoomBroadcaster::new();

        // when (操作):
        let result = usecase
            .execute(
                &mut sessions,
                &mut rooms,
                &PlaybackStateTable::new(),
                connection("c1"),
                playlist_id(),
                Some("alice".to_string()),
            )
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(JoinPlaylistError::Repository(_))));
        assert!(sessions.is_empty());
        assert!(rooms.members(&playlist_id()).is_empty());
    }
}
