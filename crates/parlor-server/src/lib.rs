//! Room API server for the Parlor game rooms.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/rooms/:id`) -- the persistent
//!   per-connection channel: clients receive the current snapshot on
//!   connect, send `join_game` / `make_move` actions, and receive every
//!   accepted change in their room as a `game_update` broadcast
//! - **REST endpoints** for the room lifecycle (create, list, snapshot,
//!   delete, non-socket join, connection diagnostics)
//! - **Minimal HTML status page** (`GET /`) showing room and connection
//!   counts
//!
//! # Architecture
//!
//! Handlers and connection tasks share one
//! [`RoomService`](parlor_rooms::RoomService) via [`AppState`]. Game
//! mutations are serialized per room inside the service; this crate only
//! parses the wire, invokes the service, and routes results: errors back
//! to the offending connection, accepted changes out through the room's
//! broadcast group.
//!
//! [`AppState`]: state::AppState

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ConfigError, ServerConfig, ServerError, start_server};
pub use state::AppState;
