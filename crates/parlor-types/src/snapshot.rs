//! The [`GameSnapshot`] projection sent to clients.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{GameStatus, Mark};
use crate::game::Board;
use crate::ids::{GameId, UserId};

/// A full, authoritative view of one game, as delivered to clients.
///
/// Every broadcast carries the complete snapshot rather than a diff, so a
/// client can always re-render from the latest message without tracking
/// incremental state. The two viewer-relative fields are populated only
/// when the snapshot was produced for a specific viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameSnapshot {
    /// Room identifier.
    pub id: GameId,
    /// Human-chosen room name.
    pub room_name: String,
    /// The nine board cells, row-major, as `" "` / `"X"` / `"O"`.
    pub board: Board,
    /// The mark whose turn it is.
    pub current_player: Mark,
    /// Lifecycle status.
    pub status: GameStatus,
    /// The owner's user id (plays X).
    pub owner_id: UserId,
    /// The challenger's user id (plays O), when one has joined.
    pub challenger_id: Option<UserId>,
    /// Whether the requesting viewer occupies a player seat. Absent on
    /// broadcasts, which have no single viewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub is_player: Option<bool>,
    /// The viewer's mark, when the viewer is a player.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub player_mark: Option<Mark>,
}
