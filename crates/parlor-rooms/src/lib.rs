//! Room coordination for the Parlor game-room server.
//!
//! This crate owns everything between the pure rules and the transport:
//! which games exist, who is connected to which room, and how accepted
//! state changes fan out to the room's subscribers.
//!
//! # Architecture
//!
//! ```text
//! Connection handler / REST gateway
//!     |
//!     +-- RoomService ---- per-room Mutex guard (one mutation in flight)
//!         |-- GameStore       (persistence collaborator; MemoryStore in-process)
//!         |-- SessionRegistry (who is connected; lifecycle + diagnostics)
//!         +-- RoomChannels    (per-room broadcast; one ordering domain per room)
//! ```
//!
//! # Modules
//!
//! - [`service`] -- the [`RoomService`] lifecycle gateway and mutation path
//! - [`store`] -- the [`GameStore`] trait and in-memory implementation
//! - [`registry`] -- per-room connection bookkeeping
//! - [`broadcast`] -- per-room publish/subscribe channels
//! - [`error`] -- shared error types
//!
//! [`RoomService`]: service::RoomService
//! [`GameStore`]: store::GameStore

pub mod broadcast;
pub mod error;
pub mod registry;
pub mod service;
pub mod store;

// Re-export primary types for convenience.
pub use broadcast::{RoomChannels, RoomEvent};
pub use error::RoomError;
pub use registry::{SessionHandle, SessionRegistry};
pub use service::RoomService;
pub use store::{GameStore, MemoryStore, StoreError};
