//! Shared type definitions for the Parlor game-room server.
//!
//! This crate is the single source of truth for all types used across the
//! Parlor workspace. Wire-visible types flow downstream to `TypeScript`
//! via `ts-rs` for the browser client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Marks, cells, and the game status lifecycle
//! - [`game`] -- The [`Game`] entity and its [`Board`]
//! - [`snapshot`] -- The authoritative [`GameSnapshot`] projection
//! - [`protocol`] -- The `WebSocket` wire envelope, both directions
//!
//! [`Game`]: game::Game
//! [`Board`]: game::Board
//! [`GameSnapshot`]: snapshot::GameSnapshot

pub mod enums;
pub mod game;
pub mod ids;
pub mod protocol;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use enums::{Cell, GameStatus, Mark};
pub use game::{BOARD_CELLS, Board, Game};
pub use ids::{ConnectionId, GameId, UserId};
pub use protocol::{ClientMessage, ServerMessage};
pub use snapshot::GameSnapshot;
