//! Win detection anchored at the most recently placed cell.
//!
//! A new win must include the cell just played, so only the lines passing
//! through that cell are examined. Which lines those are depends on the
//! cell's [`Position`]: see [`line_checks`].

use crate::board::{Board, Coord, Mark};
use crate::position::Position;
use tracing::{instrument, trace};

/// Compass direction for line scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Direction {
    /// Towards column 0.
    Left,
    /// Towards column 2.
    Right,
    /// Towards row 0.
    Up,
    /// Towards row 2.
    Down,
    /// Towards (0, 0).
    UpLeft,
    /// Towards (0, 2).
    UpRight,
    /// Towards (2, 0).
    DownLeft,
    /// Towards (2, 2).
    DownRight,
}

impl Direction {
    /// (row, col) step for one cell in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }

    /// The cell one step from `from`, if it is on the board.
    pub fn step(self, from: Coord) -> Option<Coord> {
        let (d_row, d_col) = self.delta();
        from.offset(d_row, d_col)
    }
}

/// One line test relative to the anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCheck {
    /// Every cell from the anchor to the edge in this direction matches.
    Scan(Direction),
    /// The single neighbors on both sides of the anchor match.
    ///
    /// Only listed for positions where both neighbors exist.
    BothSides(Direction, Direction),
}

impl LineCheck {
    /// Evaluates this check for `mark` anchored at `anchor`.
    pub fn holds(self, board: &Board, anchor: Coord, mark: Mark) -> bool {
        match self {
            LineCheck::Scan(dir) => scan(board, anchor, mark, dir),
            LineCheck::BothSides(a, b) => both_sides(board, anchor, mark, a, b),
        }
    }
}

/// Checks relevant to each position.
///
/// Corners: the row and column running away from the corner plus the
/// diagonal through it. Edges: the perpendicular run inward plus the line
/// along the edge with one neighbor either side. Center: all four lines,
/// each with one neighbor either side.
pub fn line_checks(position: Position) -> &'static [LineCheck] {
    use Direction::*;
    use LineCheck::*;

    match position {
        Position::TopLeft => &[Scan(Right), Scan(Down), Scan(DownRight)],
        Position::TopRight => &[Scan(Left), Scan(Down), Scan(DownLeft)],
        Position::BottomLeft => &[Scan(Right), Scan(Up), Scan(UpRight)],
        Position::BottomRight => &[Scan(Left), Scan(Up), Scan(UpLeft)],
        Position::TopMid => &[Scan(Down), BothSides(Left, Right)],
        Position::BottomMid => &[Scan(Up), BothSides(Left, Right)],
        Position::MidLeft => &[Scan(Right), BothSides(Up, Down)],
        Position::MidRight => &[Scan(Left), BothSides(Up, Down)],
        Position::MidMid => &[
            BothSides(Left, Right),
            BothSides(Up, Down),
            BothSides(UpLeft, DownRight),
            BothSides(UpRight, DownLeft),
        ],
    }
}

/// True if every cell strictly beyond `from` in `dir` holds `mark`.
///
/// Vacuously true when `from` already sits on that edge.
pub fn scan(board: &Board, from: Coord, mark: Mark, dir: Direction) -> bool {
    let mut cursor = dir.step(from);
    while let Some(coord) = cursor {
        if !board.has(coord, mark) {
            return false;
        }
        cursor = dir.step(coord);
    }
    true
}

/// True if the adjacent cells in `a` and in `b` both hold `mark`.
pub fn both_sides(board: &Board, anchor: Coord, mark: Mark, a: Direction, b: Direction) -> bool {
    let (first, second) = (a.step(anchor), b.step(anchor));
    debug_assert!(
        first.is_some() && second.is_some(),
        "both-sides check from {anchor} runs off the board"
    );
    match (first, second) {
        (Some(first), Some(second)) => board.has(first, mark) && board.has(second, mark),
        _ => false,
    }
}

/// True if `mark` has three in a row through `anchor`.
#[instrument(level = "debug", skip_all, fields(%anchor, ?mark))]
pub fn has_three_in_a_row(board: &Board, anchor: Coord, mark: Mark) -> bool {
    let position = Position::classify(anchor);
    let won = line_checks(position)
        .iter()
        .any(|check| check.holds(board, anchor, mark));
    trace!(%position, won, "Anchored line checks evaluated");
    won
}
