//! Error types for room coordination.

use parlor_core::{JoinError, MoveError};
use parlor_types::GameId;

use crate::store::StoreError;

/// Errors surfaced by the room service.
///
/// Every variant except [`RoomError::Storage`] is a state-conflict error:
/// reported to the acting client, never fatal, and the room stays usable.
/// The `Display` strings double as client-facing messages.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// A live game already uses this room name (case-sensitive match).
    #[error("A game with this room name already exists")]
    NameTaken,

    /// No game exists for this room id.
    #[error("Game not found")]
    NotFound(GameId),

    /// Only the owner may delete a room.
    #[error("You can only delete your own games")]
    NotOwner,

    /// The join was rejected by the game rules.
    #[error(transparent)]
    Join(#[from] JoinError),

    /// The move was rejected by the game rules.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// The persistence collaborator failed. The only variant that is not
    /// a client mistake; propagated upward rather than reported.
    #[error("storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for RoomError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NameTaken(_) => Self::NameTaken,
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Backend(_) => Self::Storage(err),
        }
    }
}
