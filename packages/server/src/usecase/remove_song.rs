//! UseCase: 曲の削除処理

use std::sync::Arc;

use crate::domain::{PlaylistId, SongId, TrackRepository};

use super::error::RemoveSongError;

/// 曲削除のユースケース
pub struct RemoveSongUseCase {
    /// Repository（データアクセス層の抽象化）
    track_repository: Arc<dyn TrackRepository>,
}

impl RemoveSongUseCase {
    /// 新しい RemoveSongUseCase を作成
    pub fn new(track_repository: Arc<dyn TrackRepository>) -> Self {
        Self { track_repository }
    }

    /// 曲削除を実行
    ///
    /// 削除はプレイリスト ID でスコープされる。曲の存在確認は行わない。
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - 削除した行数（0 または 1）
    /// * `Err(RemoveSongError)` - ストレージエラー
    pub async fn execute(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<u64, RemoveSongError> {
        let removed = self
            .track_repository
            .delete_song(song_id, playlist_id)
            .await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RepositoryError, repository::MockTrackRepository};

    #[tokio::test]
    async fn test_remove_song_scoped_to_playlist() {
        // テスト項目: 指定したプレイリストと曲 ID で削除が行われる
        // given (前提条件):
        let mut repository = MockTrackRepository::new();
        repository
            .expect_delete_song()
            .withf(|song_id, playlist_id| song_id.as_str() == "s1" && playlist_id.as_str() == "default")
            .times(1)
            .returning(|_, _| Ok(1));
        let usecase = RemoveSongUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase
            .execute(
                &PlaylistId::new("default".to_string()).unwrap(),
                &SongId::new("s1".to_string()),
            )
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
    }

    #[tokio::test]
    async fn test_remove_song_storage_error() {
        // テスト項目: ストレージエラーが返される
        // given (前提条件):
        let mut repository = MockTrackRepository::new();
        repository
            .expect_delete_song()
            .returning(|_, _| Err(RepositoryError::Storage("disk I/O error".to_string())));
        let usecase = RemoveSongUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase
            .execute(
                &PlaylistId::new("default".to_string()).unwrap(),
                &SongId::new("s1".to_string()),
            )
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(RemoveSongError::Repository(_))));
    }
}
