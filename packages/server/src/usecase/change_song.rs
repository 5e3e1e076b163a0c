//! UseCase: 再生曲の変更

use crate::domain::{PlaybackRepository, PlaybackState, PlaylistId, SongId};

/// 再生曲変更のユースケース
///
/// 曲を切り替えると必ず再生中になり、再生位置は 0 に戻る。
/// 曲 ID は空文字列も含めてそのまま受け入れる。
pub struct ChangeSongUseCase;

impl ChangeSongUseCase {
    pub fn execute(
        &self,
        playback: &mut dyn PlaybackRepository,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> PlaybackState {
        let state = PlaybackState::playing(song_id);
        playback.set(playlist_id, state.clone());
        state
    }
}
