//! The persistence collaborator for games.
//!
//! [`GameStore`] is the seam between room coordination and whatever holds
//! game state durably. The room service only ever touches games through
//! this trait, always from inside the room's mutual-exclusion guard, so an
//! implementation needs no cross-call consistency beyond each single
//! operation.
//!
//! [`MemoryStore`] is the in-process implementation the server runs with;
//! a key-value or relational backend slots in behind the same trait.

use std::collections::HashMap;
use std::future::Future;

use parlor_types::{Game, GameId};
use tokio::sync::RwLock;

/// Errors surfaced by a [`GameStore`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// A game with this room name already exists.
    #[error("room name {0:?} is already taken")]
    NameTaken(String),

    /// No game exists under this id.
    #[error("game {0} not found")]
    NotFound(GameId),

    /// The backend itself failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable storage for games.
pub trait GameStore: Send + Sync + 'static {
    /// Store a new game. Room names are unique: storing a game whose
    /// `room_name` matches a live game fails with [`StoreError::NameTaken`]
    /// (exact, case-sensitive comparison).
    fn insert(&self, game: Game) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fetch a game by id.
    fn get(&self, id: GameId) -> impl Future<Output = Result<Game, StoreError>> + Send;

    /// Overwrite an existing game.
    fn update(&self, game: Game) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a game, returning its final state.
    fn remove(&self, id: GameId) -> impl Future<Output = Result<Game, StoreError>> + Send;

    /// All games, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Game>, StoreError>> + Send;
}

/// In-memory [`GameStore`] backed by a [`RwLock`]ed map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: RwLock<HashMap<GameId, Game>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    async fn insert(&self, game: Game) -> Result<(), StoreError> {
        let mut games = self.games.write().await;
        if games.values().any(|g| g.room_name == game.room_name) {
            return Err(StoreError::NameTaken(game.room_name));
        }
        games.insert(game.id, game);
        Ok(())
    }

    async fn get(&self, id: GameId) -> Result<Game, StoreError> {
        self.games
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, game: Game) -> Result<(), StoreError> {
        let mut games = self.games.write().await;
        let slot = games.get_mut(&game.id).ok_or(StoreError::NotFound(game.id))?;
        *slot = game;
        Ok(())
    }

    async fn remove(&self, id: GameId) -> Result<Game, StoreError> {
        self.games
            .write()
            .await
            .remove(&id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Game>, StoreError> {
        let games = self.games.read().await;
        let mut all: Vec<Game> = games.values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(all)
    }
}
