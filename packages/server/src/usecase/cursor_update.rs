//! UseCase: カーソル位置の中継
//!
//! カーソル位置は保存しない。送信者が参加済みかどうかを確認し、
//! 中継イベントに付与する送信者の情報を返すだけです。

use crate::domain::{ConnectionId, SessionLookup, SessionRepository, User};

use super::error::CursorUpdateError;

/// カーソル中継のユースケース
pub struct CursorUpdateUseCase;

impl CursorUpdateUseCase {
    /// # Returns
    ///
    /// * `Ok(User)` - 中継イベントに付与する送信者
    /// * `Err(CursorUpdateError::NotJoined)` - 接続にユーザーが存在しない
    pub fn execute(
        &self,
        sessions: &dyn SessionRepository,
        connection_id: &ConnectionId,
    ) -> Result<User, CursorUpdateError> {
        match sessions.get(connection_id) {
            SessionLookup::Joined(user) => Ok(user),
            SessionLookup::NotJoined => Err(CursorUpdateError::NotJoined(connection_id.clone())),
        }
    }
}
