//! REST endpoint handlers for the room API server.
//!
//! All handlers go through the shared [`AppState`]'s room service; the
//! `WebSocket` upgrade lives in [`crate::ws`]. REST covers the room
//! lifecycle collaborator surface; in-game actions normally arrive over
//! the socket, with `POST /api/rooms/:id/join` as the non-socket join
//! path (identical rules, same serialized code path).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/rooms` | List rooms, newest first |
//! | `POST` | `/api/rooms` | Create a room |
//! | `GET` | `/api/rooms/:id` | Snapshot (viewer-relative with `?user_id=`) |
//! | `DELETE` | `/api/rooms/:id` | Delete a room (owner only) |
//! | `POST` | `/api/rooms/:id/join` | Take the challenger seat |
//! | `GET` | `/api/rooms/:id/sessions` | Live-connection diagnostics |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use parlor_core::rules;
use parlor_types::{GameId, UserId};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request payloads and query parameters
// ---------------------------------------------------------------------------

/// Body of `POST /api/rooms`.
#[derive(Debug, serde::Deserialize, Validate)]
pub struct CreateRoomRequest {
    /// Human-chosen room name, unique across live games.
    #[validate(length(min = 1, max = 64, message = "room name must be 1-64 characters"))]
    pub room_name: String,
    /// The creating participant; becomes the owner and plays X.
    pub user_id: UserId,
}

/// Body of `POST /api/rooms/:id/join`.
#[derive(Debug, serde::Deserialize)]
pub struct JoinRoomRequest {
    /// The participant taking the challenger seat.
    pub user_id: UserId,
}

/// Query parameters for `GET /api/rooms/:id`.
#[derive(Debug, serde::Deserialize)]
pub struct ViewerQuery {
    /// When present, the snapshot carries viewer-relative fields for this
    /// participant.
    pub user_id: Option<UserId>,
}

/// Query parameters for `DELETE /api/rooms/:id`.
#[derive(Debug, serde::Deserialize)]
pub struct ActorQuery {
    /// The participant requesting the deletion.
    pub user_id: UserId,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let room_count = state.service.list().await.map_or(0, |g| g.len());
    let connection_count = state.service.registry().connection_count().await;
    let live_room_count = state.service.registry().room_count().await;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Parlor</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Parlor</h1>
    <p class="subtitle">Real-time game rooms</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Rooms</div>
            <div class="value">{room_count}</div>
        </div>
        <div class="metric">
            <div class="label">Live rooms</div>
            <div class="value">{live_room_count}</div>
        </div>
        <div class="metric">
            <div class="label">Connections</div>
            <div class="value">{connection_count}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li>GET <a href="/api/rooms">/api/rooms</a> -- List rooms, newest first</li>
        <li>POST /api/rooms -- Create a room</li>
        <li>GET /api/rooms/:id -- Room snapshot (?user_id= for viewer fields)</li>
        <li>DELETE /api/rooms/:id -- Delete a room (owner only)</li>
        <li>POST /api/rooms/:id/join -- Take the challenger seat</li>
        <li>GET /api/rooms/:id/sessions -- Live-connection diagnostics</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/rooms/:id?user_id=...</code> -- Live room stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/rooms -- list rooms
// ---------------------------------------------------------------------------

/// List all rooms, newest first.
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let games = state.service.list().await?;

    let rooms: Vec<serde_json::Value> = games
        .iter()
        .map(|game| {
            serde_json::json!({
                "id": game.id,
                "room_name": game.room_name,
                "status": game.status,
                "owner_id": game.owner,
                "challenger_id": game.challenger,
                "created_at": game.created_at,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "count": rooms.len(),
        "rooms": rooms,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/rooms -- create a room
// ---------------------------------------------------------------------------

/// Create a room. The caller becomes the owner and plays X; the game
/// waits for a challenger.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    let game = state
        .service
        .create(&payload.room_name, payload.user_id)
        .await?;

    let body = serde_json::json!({
        "game": rules::snapshot(&game, Some(payload.user_id)),
    });
    Ok((StatusCode::CREATED, Json(body)))
}

// ---------------------------------------------------------------------------
// GET /api/rooms/:id -- room snapshot
// ---------------------------------------------------------------------------

/// Return the current snapshot of one room. With `?user_id=` the snapshot
/// carries the viewer-relative fields.
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Query(params): Query<ViewerQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let room = GameId::from(parse_uuid(&id_str)?);
    let game = state.service.get(room).await?;

    Ok(Json(serde_json::json!({
        "game": rules::snapshot(&game, params.user_id),
    })))
}

// ---------------------------------------------------------------------------
// DELETE /api/rooms/:id -- delete a room
// ---------------------------------------------------------------------------

/// Delete a room. Owner only; live connections are told the room closed.
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Query(params): Query<ActorQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let room = GameId::from(parse_uuid(&id_str)?);
    state.service.delete(room, params.user_id).await?;

    Ok(Json(serde_json::json!({
        "status": "deleted",
        "id": room,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/rooms/:id/join -- non-socket join path
// ---------------------------------------------------------------------------

/// Take the challenger seat over plain HTTP. Runs the same rules and the
/// same serialized path as the socket variant, so connected clients still
/// receive the broadcast.
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Json(payload): Json<JoinRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let room = GameId::from(parse_uuid(&id_str)?);
    let snapshot = state.service.join(room, payload.user_id).await?;

    Ok(Json(serde_json::json!({ "game": snapshot })))
}

// ---------------------------------------------------------------------------
// GET /api/rooms/:id/sessions -- diagnostics
// ---------------------------------------------------------------------------

/// List the live connections attached to a room. Diagnostics only; the
/// broadcast channel, not this registry view, decides delivery.
pub async fn room_sessions(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let room = GameId::from(parse_uuid(&id_str)?);
    // 404 for rooms that never existed; an empty list for idle rooms.
    state.service.get(room).await?;

    let sessions = state.service.registry().members(room).await;
    Ok(Json(serde_json::json!({
        "count": sessions.len(),
        "sessions": sessions,
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a UUID from a string, returning an [`ApiError`] on failure.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, ApiError> {
    s.parse::<Uuid>()
        .map_err(|e| ApiError::InvalidUuid(format!("{s}: {e}")))
}
