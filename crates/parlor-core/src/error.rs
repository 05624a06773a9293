//! Error types for the game rule transitions.
//!
//! Every variant is a state-conflict or validation failure: reported to
//! the offending client, never fatal, and never mutating. The `Display`
//! strings double as the `message` field of the wire error envelope.

/// Reasons a join attempt is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    /// The actor is the owner, or the challenger seat is already taken.
    #[error("You cannot join this game")]
    NotEligible,
}

/// Reasons a move attempt is rejected.
///
/// Checks run in declaration order; the first failing check wins. The
/// occupancy check runs before the turn check so that the loser of a
/// same-cell race is told the cell is taken rather than that the turn
/// has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The cell index is not in `0..=8`.
    #[error("Cell index is out of range")]
    OutOfRange,

    /// The actor occupies neither player seat.
    #[error("You are not a player in this game")]
    NotAPlayer,

    /// The game is waiting for a challenger or already finished.
    #[error("The game is not active")]
    GameNotActive,

    /// The target cell is already claimed.
    #[error("That cell is already taken")]
    CellOccupied,

    /// It is the other player's turn.
    #[error("It is not your turn")]
    NotYourTurn,
}
