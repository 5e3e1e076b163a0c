//! UseCase: 再生・一時停止

use crate::domain::{PlaybackRepository, PlaybackState, PlaylistId, SongId};

/// 再生・一時停止のユースケース
///
/// 再生状態は丸ごと置き換える（後勝ち）。曲 ID の存在確認は行わない。
/// 再生位置はクライアントが送った値をそのまま保持する。
pub struct PlayPauseUseCase;

impl PlayPauseUseCase {
    pub fn execute(
        &self,
        playback: &mut dyn PlaybackRepository,
        playlist_id: PlaylistId,
        is_playing: bool,
        current_song: Option<SongId>,
        current_time: Option<f64>,
    ) -> PlaybackState {
        let state = PlaybackState::new(current_song, is_playing).with_current_time(current_time);
        playback.set(playlist_id, state.clone());
        state
    }
}
