//! The room service: lifecycle gateway plus serialized state mutation.
//!
//! One [`RoomService`] owns the store, the session registry, the broadcast
//! channels, and the per-room mutual-exclusion guards. Every state change
//! to a game, whether it arrives over a `WebSocket` or the REST join path,
//! flows through [`RoomService::join`] or [`RoomService::make_move`]:
//! load under the room's guard, apply the pure transition, persist,
//! release the guard, then broadcast. Different rooms never contend.
//!
//! The guard is released before fan-out begins, so a conflicting action
//! that arrives while a broadcast is being delivered queues behind the
//! next mutation, not behind network I/O to other subscribers.

use std::collections::HashMap;
use std::sync::Arc;

use parlor_core::rules;
use parlor_types::{ConnectionId, Game, GameId, GameSnapshot, UserId};
use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{debug, info};

use crate::broadcast::{RoomChannels, RoomEvent};
use crate::error::RoomError;
use crate::registry::{SessionHandle, SessionRegistry};
use crate::store::GameStore;

/// Coordinates all rooms: lifecycle, registry, broadcast, serialization.
#[derive(Debug)]
pub struct RoomService<S> {
    store: S,
    registry: SessionRegistry,
    channels: RoomChannels,
    guards: RwLock<HashMap<GameId, Arc<Mutex<()>>>>,
}

impl<S: GameStore> RoomService<S> {
    /// Create a service over the given store with no live rooms.
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: SessionRegistry::new(),
            channels: RoomChannels::new(),
            guards: RwLock::new(HashMap::new()),
        }
    }

    /// The session registry, for diagnostics endpoints.
    pub const fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    // -- lifecycle ----------------------------------------------------------

    /// Create a room owned by `owner`: empty board, waiting for a
    /// challenger.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::NameTaken`] when a live game already uses the
    /// name (exact, case-sensitive match).
    pub async fn create(&self, room_name: &str, owner: UserId) -> Result<Game, RoomError> {
        let game = Game::new(room_name, owner);
        self.store.insert(game.clone()).await?;
        info!(room = %game.id, room_name, %owner, "room created");
        Ok(game)
    }

    /// All games, newest first.
    pub async fn list(&self) -> Result<Vec<Game>, RoomError> {
        Ok(self.store.list().await?)
    }

    /// Fetch one game.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::NotFound`] when no game exists for `room`.
    pub async fn get(&self, room: GameId) -> Result<Game, RoomError> {
        Ok(self.store.get(room).await?)
    }

    /// Delete a room. Live connections are told the room closed, and the
    /// room's broadcast channel is released so later publishes are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::NotOwner`] unless `actor` owns the room, or
    /// [`RoomError::NotFound`] when it no longer exists.
    pub async fn delete(&self, room: GameId, actor: UserId) -> Result<(), RoomError> {
        let guard = self.room_guard(room).await;
        {
            let _serialized = guard.lock().await;
            let game = self.store.get(room).await?;
            if game.owner != actor {
                return Err(RoomError::NotOwner);
            }
            self.store.remove(room).await?;
        }

        let notified = self.channels.publish(room, RoomEvent::Closed).await;
        self.channels.release(room).await;
        self.guards.write().await.remove(&room);
        info!(%room, notified, "room deleted");
        Ok(())
    }

    // -- state mutation -----------------------------------------------------

    /// Seat `actor` as the challenger. Identical rules on every path,
    /// `WebSocket` or REST. Broadcasts the new snapshot on success.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::NotFound`] or a [`RoomError::Join`] rejection.
    pub async fn join(&self, room: GameId, actor: UserId) -> Result<GameSnapshot, RoomError> {
        self.mutate(room, |game| Ok(rules::apply_join(game, actor)?))
            .await
    }

    /// Claim a cell for `actor`. Broadcasts the new snapshot on success.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::NotFound`] or a [`RoomError::Move`] rejection.
    pub async fn make_move(
        &self,
        room: GameId,
        actor: UserId,
        position: usize,
    ) -> Result<GameSnapshot, RoomError> {
        self.mutate(room, |game| Ok(rules::apply_move(game, actor, position)?))
            .await
    }

    // -- connections --------------------------------------------------------

    /// Attach a connection: register the handle and subscribe it to the
    /// room's broadcast channel.
    pub async fn connect(
        &self,
        room: GameId,
        handle: SessionHandle,
    ) -> broadcast::Receiver<RoomEvent> {
        let receiver = self.channels.subscribe(room).await;
        self.registry.register(room, handle).await;
        receiver
    }

    /// Detach a connection. Idempotent; when the last connection leaves a
    /// room, its broadcast channel is released (the persisted game is
    /// untouched).
    pub async fn disconnect(&self, room: GameId, connection: ConnectionId) {
        if self.registry.unregister(room, connection).await {
            self.channels.release(room).await;
            debug!(%room, "last connection left, broadcast channel released");
        }
    }

    // -- internals ----------------------------------------------------------

    /// The room's mutual-exclusion guard, created on first use.
    async fn room_guard(&self, room: GameId) -> Arc<Mutex<()>> {
        let mut guards = self.guards.write().await;
        Arc::clone(guards.entry(room).or_default())
    }

    /// Run one serialized mutation: load, transition, persist under the
    /// room's guard; broadcast after the guard is released. Once a
    /// mutation is admitted past the guard it runs to completion and is
    /// broadcast even if its initiator has since disconnected.
    async fn mutate<F>(&self, room: GameId, transition: F) -> Result<GameSnapshot, RoomError>
    where
        F: FnOnce(&mut Game) -> Result<String, RoomError>,
    {
        let guard = self.room_guard(room).await;
        let (snapshot, message) = {
            let _serialized = guard.lock().await;
            let mut game = self.store.get(room).await?;
            let message = transition(&mut game)?;
            self.store.update(game.clone()).await?;
            (rules::snapshot(&game, None), message)
        };

        let delivered = self
            .channels
            .publish(
                room,
                RoomEvent::Update {
                    snapshot: snapshot.clone(),
                    message,
                },
            )
            .await;
        debug!(%room, delivered, "room update published");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use parlor_core::MoveError;
    use parlor_types::{GameStatus, Mark};

    use super::*;
    use crate::store::MemoryStore;

    fn make_service() -> RoomService<MemoryStore> {
        RoomService::new(MemoryStore::new())
    }

    /// A room with both seats filled, returning (service, room, x, o).
    async fn make_active_room() -> (RoomService<MemoryStore>, GameId, UserId, UserId) {
        let service = make_service();
        let x = UserId::new();
        let o = UserId::new();
        let game = service.create("lounge", x).await.unwrap();
        service.join(game.id, o).await.unwrap();
        (service, game.id, x, o)
    }

    #[tokio::test]
    async fn create_rejects_duplicate_names() {
        let service = make_service();
        service.create("lounge", UserId::new()).await.unwrap();

        assert!(matches!(
            service.create("lounge", UserId::new()).await,
            Err(RoomError::NameTaken)
        ));
    }

    #[tokio::test]
    async fn join_activates_and_broadcasts_the_snapshot() {
        let service = make_service();
        let x = UserId::new();
        let o = UserId::new();
        let game = service.create("lounge", x).await.unwrap();

        let handle = SessionHandle::new(ConnectionId::new(), x);
        let mut rx = service.connect(game.id, handle).await;

        service.join(game.id, o).await.unwrap();

        match rx.recv().await.unwrap() {
            RoomEvent::Update { snapshot, message } => {
                assert_eq!(snapshot.status, GameStatus::Active);
                assert_eq!(snapshot.challenger_id, Some(o));
                assert_eq!(message, "A challenger joined the game");
            }
            RoomEvent::Closed => panic!("room was not deleted"),
        }

        // The mutation is persisted, not just broadcast.
        assert_eq!(service.get(game.id).await.unwrap().challenger, Some(o));
    }

    #[tokio::test]
    async fn rejected_actions_do_not_broadcast() {
        let (service, room, x, o) = make_active_room().await;
        let handle = SessionHandle::new(ConnectionId::new(), x);
        let mut rx = service.connect(room, handle).await;

        // Out of turn: X moves first, so O's opening move is rejected.
        assert!(matches!(
            service.make_move(room, o, 0).await,
            Err(RoomError::Move(MoveError::NotYourTurn))
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn concurrent_moves_on_the_same_cell_admit_exactly_one() {
        let (service, room, x, _) = make_active_room().await;

        // The same player racing themselves: both attempts target cell 4.
        let (first, second) =
            tokio::join!(service.make_move(room, x, 4), service.make_move(room, x, 4));

        let results = [first, second];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(RoomError::Move(MoveError::CellOccupied))
        )));

        // Exactly one cell was written.
        let game = service.get(room).await.unwrap();
        assert_eq!(game.board.filled_count(), 1);
        assert_eq!(game.current_mark, Mark::O);
    }

    #[tokio::test]
    async fn different_rooms_do_not_serialize_against_each_other() {
        let service = make_service();
        let (x1, o1) = (UserId::new(), UserId::new());
        let (x2, o2) = (UserId::new(), UserId::new());
        let room_a = service.create("alpha", x1).await.unwrap().id;
        let room_b = service.create("beta", x2).await.unwrap().id;
        service.join(room_a, o1).await.unwrap();
        service.join(room_b, o2).await.unwrap();

        let (a, b) = tokio::join!(
            service.make_move(room_a, x1, 0),
            service.make_move(room_b, x2, 8)
        );
        assert!(a.is_ok());
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn delete_requires_ownership() {
        let (service, room, _, o) = make_active_room().await;
        assert!(matches!(
            service.delete(room, o).await,
            Err(RoomError::NotOwner)
        ));
        assert!(service.get(room).await.is_ok());
    }

    #[tokio::test]
    async fn delete_notifies_subscribers_and_silences_the_room() {
        let (service, room, x, _) = make_active_room().await;
        let handle = SessionHandle::new(ConnectionId::new(), x);
        let mut rx = service.connect(room, handle).await;

        service.delete(room, x).await.unwrap();

        assert!(matches!(rx.recv().await.unwrap(), RoomEvent::Closed));
        assert!(matches!(
            service.get(room).await,
            Err(RoomError::NotFound(_))
        ));
        // The game is gone, so a late move resolves to NotFound rather
        // than reaching a channel.
        assert!(matches!(
            service.make_move(room, x, 0).await,
            Err(RoomError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn last_disconnect_releases_the_channel_only() {
        let (service, room, x, o) = make_active_room().await;
        let first = SessionHandle::new(ConnectionId::new(), x);
        let second = SessionHandle::new(ConnectionId::new(), o);
        let _rx1 = service.connect(room, first.clone()).await;
        let _rx2 = service.connect(room, second.clone()).await;

        service.disconnect(room, first.connection_id).await;
        assert_eq!(service.registry().connection_count().await, 1);

        service.disconnect(room, second.connection_id).await;
        assert_eq!(service.registry().connection_count().await, 0);

        // The persisted game survives the empty room.
        assert!(service.get(room).await.is_ok());
    }
}
