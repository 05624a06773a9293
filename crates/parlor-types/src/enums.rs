//! Enumeration types for the game-room domain.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

/// One of the two player marks.
///
/// The room owner always plays [`Mark::X`] and X always moves first; the
/// challenger plays [`Mark::O`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Mark {
    /// The owner's mark.
    X,
    /// The challenger's mark.
    O,
}

impl Mark {
    /// The opposing mark.
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// The board cell value this mark writes.
    pub const fn cell(self) -> Cell {
        match self {
            Self::X => Cell::X,
            Self::O => Cell::O,
        }
    }
}

impl core::fmt::Display for Mark {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// The contents of one board cell.
///
/// On the wire a cell is a one-character string: `" "`, `"X"` or `"O"`,
/// matching what the browser client renders directly into the grid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Cell {
    /// An empty cell.
    #[default]
    #[serde(rename = " ")]
    Empty,
    /// A cell claimed by X.
    X,
    /// A cell claimed by O.
    O,
}

impl Cell {
    /// Whether the cell has not been claimed yet.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The mark occupying this cell, if any.
    pub const fn mark(self) -> Option<Mark> {
        match self {
            Self::Empty => None,
            Self::X => Some(Mark::X),
            Self::O => Some(Mark::O),
        }
    }
}

// ---------------------------------------------------------------------------
// Game status
// ---------------------------------------------------------------------------

/// The lifecycle status of a game.
///
/// Recomputed deterministically from the board after every accepted move;
/// never set directly by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// The room exists but no challenger has joined yet. No moves are
    /// accepted in this state.
    WaitingForChallenger,
    /// Both players are present and the game is in progress.
    Active,
    /// X completed a line. Terminal.
    XWon,
    /// O completed a line. Terminal.
    OWon,
    /// All nine cells are filled with no line completed. Terminal.
    Draw,
}

impl GameStatus {
    /// Whether moves are currently accepted.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// The terminal status for a win by the given mark.
    pub const fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::X => Self::XWon,
            Mark::O => Self::OWon,
        }
    }
}
