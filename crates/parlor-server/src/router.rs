//! Axum router construction for the room API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin browser-client access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the room server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/rooms/:id` -- `WebSocket` room stream
/// - `GET /api/rooms` + `POST /api/rooms` -- list and create rooms
/// - `GET /api/rooms/:id` + `DELETE /api/rooms/:id` -- snapshot and delete
/// - `POST /api/rooms/:id/join` -- non-socket join path
/// - `GET /api/rooms/:id/sessions` -- live-connection diagnostics
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/rooms/{id}", get(ws::ws_room))
        // REST API
        .route(
            "/api/rooms",
            get(handlers::list_rooms).post(handlers::create_room),
        )
        .route(
            "/api/rooms/{id}",
            get(handlers::get_room).delete(handlers::delete_room),
        )
        .route("/api/rooms/{id}/join", post(handlers::join_room))
        .route("/api/rooms/{id}/sessions", get(handlers::room_sessions))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
