//! Shared application state for the room API server.
//!
//! [`AppState`] holds the one [`RoomService`] every handler and connection
//! task works through. The service runs over the in-memory store here; a
//! durable backend slots in behind the same [`parlor_rooms::GameStore`]
//! trait without touching this crate.

use parlor_rooms::{MemoryStore, RoomService};

/// The room service as the server runs it.
pub type Service = RoomService<MemoryStore>;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug)]
pub struct AppState {
    /// The room coordination service.
    pub service: Service,
}

impl AppState {
    /// Create application state with an empty in-memory store.
    pub fn new() -> Self {
        Self {
            service: RoomService::new(MemoryStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
