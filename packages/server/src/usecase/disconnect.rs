//! UseCase: 切断処理
//!
//! セッションとルームのメンバーシップを破棄します。
//! このプロトコルには user-left イベントが無いため、通知は行いません。
//! 送信チャンネルの解放は呼び出し側（CommandDispatcher）が行います。

use crate::domain::{ConnectionId, RoomRepository, SessionRepository, User};

/// 切断のユースケース
pub struct DisconnectUseCase;

impl DisconnectUseCase {
    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 接続に紐づいていたユーザー（未参加の接続なら `None`）
    pub fn execute(
        &self,
        sessions: &mut dyn SessionRepository,
        rooms: &mut dyn RoomRepository,
        connection_id: &ConnectionId,
    ) -> Option<User> {
        let user = sessions.remove(connection_id);
        rooms.leave_all(connection_id);
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlaylistId, SessionLookup};
    use crate::infrastructure::{broadcaster::RoomBroadcaster, repository::SessionRegistry};
    use tokio::sync::mpsc;

    #[test]
    fn test_disconnect_removes_user_and_memberships() {
        // テスト項目: 切断するとユーザーとルームのメンバーシップが削除される
        // given (前提条件):
        let mut sessions = SessionRegistry::new();
        let mut rooms = RoomBroadcaster::new();
        let connection_id = ConnectionId::new("c1".to_string()).unwrap();
        let playlist_id = PlaylistId::new("default".to_string()).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        rooms.register(connection_id.clone(), tx);
        sessions.create(connection_id.clone(), Some("alice".to_string()));
        rooms.join(connection_id.clone(), playlist_id.clone());

        // when (操作):
        let removed = DisconnectUseCase.execute(&mut sessions, &mut rooms, &connection_id);

        // then (期待する結果):
        assert_eq!(removed.unwrap().username.as_str(), "alice");
        assert_eq!(sessions.get(&connection_id), SessionLookup::NotJoined);
        assert!(rooms.members(&playlist_id).is_empty());
    }

    #[test]
    fn test_disconnect_without_join_is_noop() {
        // テスト項目: 未参加の接続の切断はエラーにならない
        // given (前提条件):
        let mut sessions = SessionRegistry::new();
        let mut rooms = RoomBroadcaster::new();
        let connection_id = ConnectionId::new("c1".to_string()).unwrap();

        // when (操作):
        let removed = DisconnectUseCase.execute(&mut sessions, &mut rooms, &connection_id);

        // then (期待する結果):
        assert!(removed.is_none());
    }
}
