//! The [`Game`] entity and its [`Board`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Cell, GameStatus, Mark};
use crate::ids::{GameId, UserId};

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A 3x3 board stored as nine cells in row-major order.
///
/// Serializes as a flat nine-element array of one-character strings, the
/// shape the browser client consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Board(pub [Cell; BOARD_CELLS]);

impl Board {
    /// The cell at `index`, or `None` when the index is off the board.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.0.get(index).copied()
    }

    /// Write `cell` at `index`. Returns `false` when the index is off the
    /// board, in which case nothing is written.
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        self.0.get_mut(index).is_some_and(|slot| {
            *slot = cell;
            true
        })
    }

    /// Iterate over the cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().copied()
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells().filter(|c| !c.is_empty()).count()
    }

    /// Whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells().all(|c| !c.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// The authoritative state of one game room.
///
/// A `Game` is created by the room lifecycle gateway and thereafter mutated
/// only through the pure transition functions in `parlor-core`, always under
/// the room's mutual-exclusion guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Game {
    /// Unique room identifier.
    pub id: GameId,
    /// Human-chosen room name, unique across live games (case-sensitive).
    pub room_name: String,
    /// The participant who created the room. Plays X.
    pub owner: UserId,
    /// The first non-owner participant to join. Plays O. Assigned at most
    /// once over the life of the game.
    pub challenger: Option<UserId>,
    /// The nine board cells.
    pub board: Board,
    /// The mark whose turn it is.
    pub current_mark: Mark,
    /// Lifecycle status, recomputed from the board after every move.
    pub status: GameStatus,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// Create a fresh game: empty board, X to move, waiting for a
    /// challenger.
    pub fn new(room_name: impl Into<String>, owner: UserId) -> Self {
        Self {
            id: GameId::new(),
            room_name: room_name.into(),
            owner,
            challenger: None,
            board: Board::default(),
            current_mark: Mark::X,
            status: GameStatus::WaitingForChallenger,
            created_at: Utc::now(),
        }
    }

    /// Whether `user` occupies one of the two player seats.
    pub fn is_player(&self, user: UserId) -> bool {
        self.mark_of(user).is_some()
    }

    /// The mark `user` plays, if they are a player: the owner plays X, the
    /// challenger plays O.
    pub fn mark_of(&self, user: UserId) -> Option<Mark> {
        if self.owner == user {
            Some(Mark::X)
        } else if self.challenger == Some(user) {
            Some(Mark::O)
        } else {
            None
        }
    }
}
