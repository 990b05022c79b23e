//! Game status derived after every placement.

use crate::board::{Board, Coord, Mark};
use crate::win::has_three_in_a_row;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Final result of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Outcome {
    /// The human completed a line.
    #[display("You win!")]
    PlayerWon,
    /// The computer completed a line.
    #[display("The computer wins.")]
    ComputerWon,
    /// Board filled with no line.
    #[display("Draw.")]
    Draw,
}

impl Outcome {
    /// Outcome of `mark` completing a line.
    pub fn win_for(mark: Mark) -> Self {
        match mark {
            Mark::Player => Outcome::PlayerWon,
            Mark::Computer => Outcome::ComputerWon,
        }
    }

    /// The winning side, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::PlayerWon => Some(Mark::Player),
            Outcome::ComputerWon => Some(Mark::Computer),
            Outcome::Draw => None,
        }
    }
}

/// Status of the board after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Play continues.
    InProgress,
    /// Round over.
    Finished(Outcome),
}

/// Derives the status after `mark` was placed at `last`.
///
/// A win is checked before a draw, so a full board containing the new line
/// reports the win.
#[instrument(level = "debug", skip(board), ret)]
pub fn evaluate(board: &Board, last: Coord, mark: Mark) -> GameStatus {
    if has_three_in_a_row(board, last, mark) {
        GameStatus::Finished(Outcome::win_for(mark))
    } else if board.is_full() {
        GameStatus::Finished(Outcome::Draw)
    } else {
        GameStatus::InProgress
    }
}
