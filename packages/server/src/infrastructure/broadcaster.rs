//! Room Broadcaster: room membership and event fan-out.
//!
//! Each live connection registers the sending half of its outbound channel.
//! Events are serialized once per emit and pushed as text to every target.

use std::collections::{BTreeSet, HashMap};

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    domain::{ConnectionId, PlaylistId, RoomRepository},
    infrastructure::dto::websocket::ServerEvent,
};

/// Outbound channel of one connection; every item is one text frame.
pub type OutboundSender = UnboundedSender<String>;

/// Membership of connections in playlist rooms plus their outbound channels
#[derive(Debug, Default)]
pub struct RoomBroadcaster {
    /// Outbound channel per live connection
    connections: HashMap<ConnectionId, OutboundSender>,
    /// Members per room; ordered so fan-out order is deterministic
    rooms: HashMap<PlaylistId, BTreeSet<ConnectionId>>,
}

impl RoomBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the outbound channel of a newly opened connection.
    pub fn register(&mut self, connection_id: ConnectionId, sender: OutboundSender) {
        self.connections.insert(connection_id, sender);
    }

    /// Detach a connection's channel and drop all of its memberships.
    pub fn unregister(&mut self, connection_id: &ConnectionId) {
        self.leave_all(connection_id);
        self.connections.remove(connection_id);
    }

    #[cfg(test)]
    pub fn is_member(&self, connection_id: &ConnectionId, room: &PlaylistId) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|members| members.contains(connection_id))
    }

    /// Deliver to every member of the room, sender included.
    ///
    /// Returns the number of connections the event was handed to.
    pub fn emit_to_room(&self, room: &PlaylistId, event: &ServerEvent) -> usize {
        self.fan_out(room, None, event)
    }

    /// Deliver to every member of the room except `sender`.
    pub fn emit_to_room_except_sender(
        &self,
        room: &PlaylistId,
        sender: &ConnectionId,
        event: &ServerEvent,
    ) -> usize {
        self.fan_out(room, Some(sender), event)
    }

    /// Unicast to a single connection.
    pub fn emit_to_connection(&self, connection_id: &ConnectionId, event: &ServerEvent) -> bool {
        let Some(text) = encode(event) else {
            return false;
        };
        self.deliver(connection_id, text)
    }

    fn fan_out(&self, room: &PlaylistId, except: Option<&ConnectionId>, event: &ServerEvent) -> usize {
        let Some(members) = self.rooms.get(room) else {
            return 0;
        };
        let Some(text) = encode(event) else {
            return 0;
        };

        let delivered = members
            .iter()
            .filter(|id| Some(*id) != except)
            .filter(|id| self.deliver(id, text.clone()))
            .count();

        tracing::debug!(
            "Broadcasted '{}' to {} connection(s) in room '{}'",
            event.name(),
            delivered,
            room
        );
        delivered
    }

    fn deliver(&self, connection_id: &ConnectionId, text: String) -> bool {
        match self.connections.get(connection_id) {
            Some(sender) => {
                if sender.send(text).is_err() {
                    tracing::warn!("Failed to send message to connection '{}'", connection_id);
                    return false;
                }
                true
            }
            None => {
                tracing::warn!("No outbound channel for connection '{}'", connection_id);
                false
            }
        }
    }
}

impl RoomRepository for RoomBroadcaster {
    /// Joining twice keeps a single membership.
    fn join(&mut self, connection_id: ConnectionId, room: PlaylistId) {
        self.rooms.entry(room).or_default().insert(connection_id);
    }

    fn leave(&mut self, connection_id: &ConnectionId, room: &PlaylistId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(connection_id);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }

    fn leave_all(&mut self, connection_id: &ConnectionId) {
        let joined: Vec<PlaylistId> = self
            .rooms
            .iter()
            .filter(|(_, members)| members.contains(connection_id))
            .map(|(room, _)| room.clone())
            .collect();
        for room in &joined {
            self.leave(connection_id, room);
        }
    }

    /// Current members of a room, in id order
    fn members(&self, room: &PlaylistId) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }
}

fn encode(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!("Failed to serialize '{}' event: {}", event.name(), e);
            None
        }
    }
}
