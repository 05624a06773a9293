//! `WebSocket` wire protocol: messages exchanged between a client and its
//! connection handler.
//!
//! Both directions share the same envelope shape: a JSON object whose
//! `type` field selects the variant. Inbound messages always carry the
//! acting `user_id` (identity is resolved upstream; the per-message id is
//! authoritative for actions). Outbound successes are broadcast to the
//! whole room; outbound errors are unicast to the offending connection
//! only.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::UserId;
use crate::snapshot::GameSnapshot;

// ---------------------------------------------------------------------------
// Client -> server
// ---------------------------------------------------------------------------

/// A message sent by a client over its room connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Take the challenger seat in this room.
    JoinGame {
        /// The acting participant.
        user_id: UserId,
    },
    /// Claim a board cell.
    MakeMove {
        /// Target cell index, 0 through 8, row-major.
        position: usize,
        /// The acting participant.
        user_id: UserId,
    },
}

// ---------------------------------------------------------------------------
// Server -> client
// ---------------------------------------------------------------------------

/// A message sent by the server to one or all connections in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Initial state, unicast to a connection right after it opens.
    GameState {
        /// The current authoritative snapshot.
        game_data: GameSnapshot,
    },
    /// A state change was accepted; broadcast to every connection in the
    /// room, including the one that initiated it.
    GameUpdate {
        /// The new authoritative snapshot.
        game_data: GameSnapshot,
        /// Human-readable description of what happened.
        message: String,
    },
    /// Something went wrong with this connection's last message; unicast.
    Error {
        /// Human-readable description of the failure.
        message: String,
    },
    /// The room was deleted by its owner; the client should close.
    RoomClosed {
        /// Human-readable closing notice.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn inbound_envelope_parses_make_move() {
        let user = UserId::new();
        let raw = format!(r#"{{"type": "make_move", "position": 4, "user_id": "{user}"}}"#);
        let parsed: ClientMessage = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            parsed,
            ClientMessage::MakeMove {
                position: 4,
                user_id: user
            }
        );
    }

    #[test]
    fn inbound_envelope_parses_join_game() {
        let user = UserId::new();
        let raw = format!(r#"{{"type": "join_game", "user_id": "{user}"}}"#);
        let parsed: ClientMessage = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, ClientMessage::JoinGame { user_id: user });
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let raw = r#"{"type": "restart_game", "user_id": "00000000-0000-0000-0000-000000000000"}"#;
        assert!(serde_json::from_str::<ClientMessage>(raw).is_err());
    }

    #[test]
    fn outbound_error_uses_type_tag() {
        let msg = ServerMessage::Error {
            message: "Invalid JSON data".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json.get("type"), Some(&serde_json::json!("error")));
        assert_eq!(
            json.get("message"),
            Some(&serde_json::json!("Invalid JSON data"))
        );
    }
}
