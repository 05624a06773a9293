//! Per-room broadcast groups.
//!
//! Each room owns one [`tokio::sync::broadcast`] channel: a single
//! ordering domain, so every subscriber observes the room's events in
//! publish order. Nothing orders events across rooms. Channels are not
//! persisted; they are created lazily on first subscribe and dropped when
//! the last connection leaves or the room is deleted.
//!
//! Delivery is best-effort per subscriber. A receiver that lagged past
//! the channel capacity skips ahead; since every event carries the full
//! authoritative snapshot, resuming from the newest event is always safe.

use std::collections::HashMap;

use parlor_types::{GameId, GameSnapshot};
use tokio::sync::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of each room's broadcast channel.
///
/// A subscriber that falls further behind than this receives a
/// [`broadcast::error::RecvError::Lagged`] and resumes from the newest
/// event.
const BROADCAST_CAPACITY: usize = 256;

/// An event published to every subscriber of one room.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    /// A state change was accepted; carries the full new snapshot, never
    /// a diff, so subscribers re-render rather than reconcile.
    Update {
        /// The new authoritative snapshot.
        snapshot: GameSnapshot,
        /// Human-readable description of what happened.
        message: String,
    },
    /// The room was deleted; subscribers should notify their client and
    /// close.
    Closed,
}

/// Room id -> broadcast sender.
#[derive(Debug, Default)]
pub struct RoomChannels {
    rooms: RwLock<HashMap<GameId, broadcast::Sender<RoomEvent>>>,
}

impl RoomChannels {
    /// Create an empty channel map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a room's channel, creating the channel if this is the
    /// room's first subscriber since it was last released.
    pub async fn subscribe(&self, room: GameId) -> broadcast::Receiver<RoomEvent> {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room)
            .or_insert_with(|| broadcast::channel(BROADCAST_CAPACITY).0)
            .subscribe()
    }

    /// Publish an event to every current subscriber of a room.
    ///
    /// Returns the number of subscribers that received the event. Zero is
    /// not an error: a released channel or a room with no connections
    /// simply has nobody to tell.
    pub async fn publish(&self, room: GameId, event: RoomEvent) -> usize {
        let rooms = self.rooms.read().await;
        match rooms.get(&room) {
            // send returns Err only when there are zero receivers, which
            // is normal when no client is connected.
            Some(tx) => tx.send(event).unwrap_or(0),
            None => 0,
        }
    }

    /// Drop a room's channel. Subsequent publishes become no-ops until a
    /// new subscriber recreates it.
    pub async fn release(&self, room: GameId) {
        if self.rooms.write().await.remove(&room).is_some() {
            debug!(%room, "broadcast channel released");
        }
    }

    /// Number of rooms with a live channel.
    pub async fn live_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
