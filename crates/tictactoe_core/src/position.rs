//! Named board positions used to pick which lines pass through a cell.

use crate::board::Coord;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the nine named cells of the board.
///
/// Row 0 is `Top*`, row 1 `Mid*`, row 2 `Bottom*`; column 0 is `*Left`,
/// column 1 `*Mid`, column 2 `*Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Position {
    /// (0, 0)
    TopLeft,
    /// (0, 1)
    TopMid,
    /// (0, 2)
    TopRight,
    /// (1, 0)
    MidLeft,
    /// (1, 1)
    MidMid,
    /// (1, 2)
    MidRight,
    /// (2, 0)
    BottomLeft,
    /// (2, 1)
    BottomMid,
    /// (2, 2)
    BottomRight,
}

/// Geometric role of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionKind {
    /// Three lines pass through: a row, a column and a diagonal.
    Corner,
    /// Two lines pass through: a row and a column.
    Edge,
    /// Four lines pass through.
    Center,
}

impl Position {
    /// All 9 positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopMid,
        Position::TopRight,
        Position::MidLeft,
        Position::MidMid,
        Position::MidRight,
        Position::BottomLeft,
        Position::BottomMid,
        Position::BottomRight,
    ];

    /// Classifies a coordinate.
    #[instrument(level = "trace")]
    pub fn classify(coord: Coord) -> Position {
        Self::ALL[coord.index()]
    }

    /// Coordinate of this position.
    pub fn coord(self) -> Coord {
        let index = self as usize;
        Coord::from_axes(index / 3, index % 3)
    }

    /// Corner, edge or center.
    pub fn kind(self) -> PositionKind {
        match self {
            Position::TopLeft
            | Position::TopRight
            | Position::BottomLeft
            | Position::BottomRight => PositionKind::Corner,
            Position::TopMid | Position::MidLeft | Position::MidRight | Position::BottomMid => {
                PositionKind::Edge
            }
            Position::MidMid => PositionKind::Center,
        }
    }

    /// Label for display.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopMid => "Top-middle",
            Position::TopRight => "Top-right",
            Position::MidLeft => "Middle-left",
            Position::MidMid => "Center",
            Position::MidRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomMid => "Bottom-middle",
            Position::BottomRight => "Bottom-right",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
