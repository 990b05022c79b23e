//! Error types for the game engine.

use crate::board::Coord;
use crate::session::TurnState;

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Row or column outside `0..=2`.
    #[display("Coordinate ({}, {}) is outside the board", row, col)]
    OutOfRange {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
    },

    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", coord)]
    CellOccupied {
        /// The occupied cell.
        coord: Coord,
    },

    /// A placement was attempted while the session was not waiting for that side.
    #[display("No move expected while {}", state)]
    OutOfTurn {
        /// State the session was in.
        state: TurnState,
    },
}

impl std::error::Error for MoveError {}

/// Failure reported by an input collaborator.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InputError {
    /// The input stream ended.
    #[display("Input closed")]
    Closed,

    /// Reading from the input failed.
    #[display("Input error: {}", _0)]
    Io(String),
}

impl std::error::Error for InputError {}

impl From<std::io::Error> for InputError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
