//! Pure game rules for the Parlor game-room server.
//!
//! The rules are plain functions over [`parlor_types::Game`]: no I/O, no
//! async, no locks. The room service loads a game from its store, applies
//! a transition here under the room's mutual-exclusion guard, persists the
//! result, and broadcasts the snapshot. Keeping the rules pure makes every
//! invariant testable without a transport or a storage backend.
//!
//! # Modules
//!
//! - [`rules`] -- `apply_join`, `apply_move`, win/draw detection, snapshots
//! - [`error`] -- rejection reasons for joins and moves

pub mod error;
pub mod rules;

// Re-export primary types for convenience.
pub use error::{JoinError, MoveError};
pub use rules::{WIN_LINES, apply_join, apply_move, snapshot, winner};
