//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! CommandDispatcher から呼び出され、Domain 層のリポジトリトレイトのみを操作します。

pub mod add_song;
pub mod change_song;
pub mod cursor_update;
pub mod disconnect;
pub mod error;
pub mod get_snapshot;
pub mod join_playlist;
pub mod play_pause;
pub mod remove_song;

pub use add_song::AddSongUseCase;
pub use change_song::ChangeSongUseCase;
pub use cursor_update::CursorUpdateUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{AddSongError, CursorUpdateError, JoinPlaylistError, RemoveSongError};
pub use get_snapshot::GetSnapshotUseCase;
pub use join_playlist::JoinPlaylistUseCase;
pub use play_pause::PlayPauseUseCase;
pub use remove_song::RemoveSongUseCase;
