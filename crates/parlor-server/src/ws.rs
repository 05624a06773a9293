//! `WebSocket` connection handler for live game rooms.
//!
//! Clients connect to `GET /ws/rooms/:id?user_id=...` and hold the
//! connection for the life of their visit. Each connection runs as one
//! task moving through `Connecting -> Joined -> Closed`:
//!
//! - on upgrade the task registers with the session registry, subscribes
//!   to the room's broadcast channel, and unicasts the current snapshot;
//! - inbound `join_game` / `make_move` messages go through the room
//!   service's serialized mutation path; accepted changes come back to
//!   every subscriber (this connection included) as `game_update`;
//! - errors of any kind are unicast to this connection only and never
//!   close it;
//! - on disconnect, however it happens, the task unregisters exactly once.
//!
//! If a client falls behind the broadcast channel, lagged events are
//! skipped; every event carries the full snapshot, so the client resumes
//! from the newest state.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use parlor_core::rules;
use parlor_rooms::{RoomEvent, SessionHandle};
use parlor_types::{ClientMessage, ConnectionId, GameId, ServerMessage, UserId};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::handlers::parse_uuid;
use crate::state::AppState;

/// Query parameters of the `WebSocket` upgrade.
///
/// Identity is resolved upstream; the connection arrives already bound to
/// a participant.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// The identified participant behind this connection.
    pub user_id: UserId,
}

/// Upgrade an HTTP request to a `WebSocket` connection bound to one room.
///
/// # Route
///
/// `GET /ws/rooms/:id?user_id=...`
pub async fn ws_room(
    ws: WebSocketUpgrade,
    Path(id_str): Path<String>,
    Query(query): Query<WsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let room = GameId::from(parse_uuid(&id_str)?);
    Ok(ws.on_upgrade(move |socket| handle_room_socket(socket, state, room, query.user_id)))
}

/// Run one connection's lifecycle against its room.
async fn handle_room_socket(mut socket: WebSocket, state: Arc<AppState>, room: GameId, user: UserId) {
    debug!(%room, %user, "WebSocket client connected");

    let connection = ConnectionId::new();
    let mut events = state
        .service
        .connect(room, SessionHandle::new(connection, user))
        .await;

    // Unicast the current snapshot to the new connection only. The
    // subscription is already live, so an update that lands between this
    // read and the loop below is queued, not lost. A missing room is
    // reported and the connection closed; the client redirects.
    let joined = match state.service.get(room).await {
        Ok(game) => {
            let initial = ServerMessage::GameState {
                game_data: rules::snapshot(&game, Some(user)),
            };
            send_json(&mut socket, &initial).await.is_ok()
        }
        Err(err) => {
            let _ = send_json(
                &mut socket,
                &ServerMessage::Error {
                    message: err.to_string(),
                },
            )
            .await;
            false
        }
    };

    if joined {
        run_joined_loop(&mut socket, &state, room, connection, &mut events).await;
    }

    // Every exit path lands here once; unregistering is idempotent, so a
    // race between an explicit close and a transport error is harmless.
    state.service.disconnect(room, connection).await;
}

/// Forward room events and client frames until either side closes.
async fn run_joined_loop(
    socket: &mut WebSocket,
    state: &Arc<AppState>,
    room: GameId,
    connection: ConnectionId,
    events: &mut broadcast::Receiver<RoomEvent>,
) {
    loop {
        tokio::select! {
            // An event published to the room's broadcast group.
            event = events.recv() => {
                match event {
                    Ok(RoomEvent::Update { snapshot, message }) => {
                        let update = ServerMessage::GameUpdate {
                            game_data: snapshot,
                            message,
                        };
                        if send_json(socket, &update).await.is_err() {
                            debug!(%room, %connection, "client disconnected (send failed)");
                            break;
                        }
                    }
                    Ok(RoomEvent::Closed) => {
                        let notice = ServerMessage::RoomClosed {
                            message: "This room has been closed by its owner".to_string(),
                        };
                        let _ = send_json(socket, &notice).await;
                        break;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Full snapshots: the newest event supersedes
                        // everything that was skipped.
                        debug!(%room, skipped, "client lagged, skipping ahead");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!(%room, "broadcast channel closed, shutting down connection");
                        break;
                    }
                }
            }
            // A frame from the client.
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = handle_client_text(state, room, &text).await
                            && send_json(socket, &reply).await.is_err()
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%room, %connection, "WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        debug!(%room, %connection, "WebSocket error: {e}");
                        break;
                    }
                    _ => {
                        // Ignore binary and pong frames.
                    }
                }
            }
        }
    }
}

/// Handle one inbound text frame.
///
/// Returns the unicast reply for this connection, or `None` when the
/// action was accepted and the result will arrive through the room's
/// broadcast instead.
async fn handle_client_text(state: &AppState, room: GameId, text: &str) -> Option<ServerMessage> {
    let parsed: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(_) => {
            return Some(ServerMessage::Error {
                message: "Invalid JSON data".to_string(),
            });
        }
    };

    let result = match parsed {
        ClientMessage::JoinGame { user_id } => state.service.join(room, user_id).await,
        ClientMessage::MakeMove { position, user_id } => {
            state.service.make_move(room, user_id, position).await
        }
    };

    // Accepted changes come back through the broadcast; only failures
    // produce a unicast reply.
    result.err().map(|err| ServerMessage::Error {
        message: err.to_string(),
    })
}

/// Serialize and send one outbound message.
///
/// A serialization failure is logged and swallowed (the connection stays
/// up); a transport failure propagates so the caller can tear down.
async fn send_json(socket: &mut WebSocket, message: &ServerMessage) -> Result<(), axum::Error> {
    match serde_json::to_string(message) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            warn!("failed to serialize outbound message: {e}");
            Ok(())
        }
    }
}
