//! UseCase: 曲の追加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AddSongUseCase::execute() メソッド
//! - セッション確認、position 計算、曲の永続化
//!
//! ### なぜこのテストが必要か
//! - 未参加の接続からの追加が明示的に拒否される（NotJoined）ことを保証
//! - addedBy に参加時のユーザー名が記録されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みユーザーによる追加
//! - 異常系：未参加・切断済みの接続、ストレージエラー

use std::sync::Arc;

use vibes_shared::time::now_sqlite_datetime;

use crate::domain::{
    ConnectionId, NewSong, PlaylistId, SessionLookup, SessionRepository, Song, SongIdFactory,
    TrackRepository,
};

use super::error::AddSongError;

/// 曲追加のユースケース
pub struct AddSongUseCase {
    /// Repository（データアクセス層の抽象化）
    track_repository: Arc<dyn TrackRepository>,
}

impl AddSongUseCase {
    /// 新しい AddSongUseCase を作成
    pub fn new(track_repository: Arc<dyn TrackRepository>) -> Self {
        Self { track_repository }
    }

    /// 曲追加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 追加を要求した接続の ID
    /// * `playlist_id` - 追加先プレイリストの ID
    /// * `draft` - クライアントが指定した曲情報（検証済み）
    ///
    /// # Returns
    ///
    /// * `Ok(Song)` - 保存した曲（サーバー側で採番した ID を含む）
    /// * `Err(AddSongError::NotJoined)` - 接続にユーザーが存在しない
    /// * `Err(AddSongError::Repository)` - ストレージエラー
    pub async fn execute(
        &self,
        sessions: &(dyn SessionRepository + Sync),
        connection_id: &ConnectionId,
        playlist_id: PlaylistId,
        draft: NewSong,
    ) -> Result<Song, AddSongError> {
        // 1. セッション確認
        let user = match sessions.get(connection_id) {
            SessionLookup::Joined(user) => user,
            SessionLookup::NotJoined => {
                return Err(AddSongError::NotJoined(connection_id.clone()));
            }
        };

        // 2. position は現在の曲数（同時追加では重複し得る）
        let position = self.track_repository.count_songs(&playlist_id).await?;

        // 3. 曲を保存
        let song = Song::new(
            SongIdFactory::generate(),
            playlist_id,
            draft,
            &user.username,
            position,
            now_sqlite_datetime(),
        );
        self.track_repository.insert_song(&song).await?;

        Ok(song)
    }
}
