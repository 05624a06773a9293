//! Per-room bookkeeping of live connections.
//!
//! The registry tracks which connections are currently attached to which
//! room. It exists for lifecycle decisions (when does a room's broadcast
//! channel get released?) and diagnostics; it is never consulted for
//! delivery, where the broadcast channel's own subscriber set is the
//! source of truth.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parlor_types::{ConnectionId, GameId, UserId};
use serde::Serialize;
use tokio::sync::RwLock;

/// One live connection attached to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionHandle {
    /// The connection's unique id.
    pub connection_id: ConnectionId,
    /// The identified participant behind the connection.
    pub user_id: UserId,
    /// When the connection attached to the room.
    pub joined_at: DateTime<Utc>,
}

impl SessionHandle {
    /// A handle joined now.
    pub fn new(connection_id: ConnectionId, user_id: UserId) -> Self {
        Self {
            connection_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}

/// Room id -> set of connected handles.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    rooms: RwLock<HashMap<GameId, HashMap<ConnectionId, SessionHandle>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a handle to a room. Idempotent: registering the same
    /// connection twice leaves a single entry.
    pub async fn register(&self, room: GameId, handle: SessionHandle) {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room)
            .or_default()
            .insert(handle.connection_id, handle);
    }

    /// Detach a connection from a room. Returns `true` when this removal
    /// emptied the room's set (the set itself is dropped), letting the
    /// caller release per-room resources. Idempotent: a second call for
    /// the same connection returns `false` and changes nothing.
    pub async fn unregister(&self, room: GameId, connection: ConnectionId) -> bool {
        let mut rooms = self.rooms.write().await;
        let Some(handles) = rooms.get_mut(&room) else {
            return false;
        };
        if handles.remove(&connection).is_none() {
            return false;
        }
        if handles.is_empty() {
            rooms.remove(&room);
            return true;
        }
        false
    }

    /// The handles currently attached to a room. Diagnostics only.
    pub async fn members(&self, room: GameId) -> Vec<SessionHandle> {
        self.rooms
            .read()
            .await
            .get(&room)
            .map(|handles| handles.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Total live connections across all rooms.
    pub async fn connection_count(&self) -> usize {
        self.rooms.read().await.values().map(HashMap::len).sum()
    }

    /// Number of rooms with at least one live connection.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_is_idempotent() {
        let registry = SessionRegistry::new();
        let room = GameId::new();
        let handle = SessionHandle::new(ConnectionId::new(), UserId::new());

        registry.register(room, handle.clone()).await;
        registry.register(room, handle).await;

        assert_eq!(registry.members(room).await.len(), 1);
        assert_eq!(registry.connection_count().await, 1);
    }

    #[tokio::test]
    async fn unregister_reports_when_room_empties() {
        let registry = SessionRegistry::new();
        let room = GameId::new();
        let first = SessionHandle::new(ConnectionId::new(), UserId::new());
        let second = SessionHandle::new(ConnectionId::new(), UserId::new());
        registry.register(room, first.clone()).await;
        registry.register(room, second.clone()).await;

        assert!(!registry.unregister(room, first.connection_id).await);
        assert!(registry.unregister(room, second.connection_id).await);
        assert_eq!(registry.room_count().await, 0);
    }

    #[tokio::test]
    async fn unregister_twice_is_harmless() {
        let registry = SessionRegistry::new();
        let room = GameId::new();
        let handle = SessionHandle::new(ConnectionId::new(), UserId::new());
        registry.register(room, handle.clone()).await;

        assert!(registry.unregister(room, handle.connection_id).await);
        assert!(!registry.unregister(room, handle.connection_id).await);
    }

    #[tokio::test]
    async fn members_of_unknown_room_is_empty() {
        let registry = SessionRegistry::new();
        assert!(registry.members(GameId::new()).await.is_empty());
    }
}
