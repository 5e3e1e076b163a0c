//! Session Registry: which User belongs to which live connection.

use std::collections::HashMap;

use crate::domain::{ConnectionId, SessionLookup, SessionRepository, User, UserFactory};

/// Maps live connections to their ephemeral Users
///
/// Entries are removed only by `remove`, which the dispatcher calls on every
/// disconnect.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    users: HashMap<ConnectionId, User>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl SessionRepository for SessionRegistry {
    fn create(&mut self, connection_id: ConnectionId, requested_username: Option<String>) -> User {
        let user = UserFactory::create(connection_id.clone(), requested_username);
        self.users.insert(connection_id, user.clone());
        user
    }

    fn get(&self, connection_id: &ConnectionId) -> SessionLookup {
        match self.users.get(connection_id) {
            Some(user) => SessionLookup::Joined(user.clone()),
            None => SessionLookup::NotJoined,
        }
    }

    fn remove(&mut self, connection_id: &ConnectionId) -> Option<User> {
        self.users.remove(connection_id)
    }
}
