//! Core board types: marks, cells, coordinates and the 3x3 grid.

use crate::error::MoveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{instrument, trace};

/// Number of rows (and columns) on the board.
pub const SIZE: usize = 3;

/// Owner of a placed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The human player (`X`, always moves first).
    Player,
    /// The computer opponent (`O`).
    Computer,
}

impl Mark {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Player => Mark::Computer,
            Mark::Computer => Mark::Player,
        }
    }

    /// Glyph used when rendering the board.
    pub fn glyph(self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Computer => 'O',
        }
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Cell holds a mark.
    Marked(Mark),
}

impl Cell {
    /// True if no mark has been placed here.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Glyph used when rendering the board.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Marked(mark) => mark.glyph(),
        }
    }
}

/// A validated (row, col) pair on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// Creates a coordinate, rejecting anything outside `0..=2`.
    pub fn new(row: i64, col: i64) -> Result<Self, MoveError> {
        let in_range = |v: i64| (0..SIZE as i64).contains(&v);
        if in_range(row) && in_range(col) {
            Ok(Self {
                row: row as usize,
                col: col as usize,
            })
        } else {
            Err(MoveError::OutOfRange { row, col })
        }
    }

    /// Creates a coordinate from row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SIZE * SIZE).then(|| Self::from_axes(index / SIZE, index % SIZE))
    }

    /// Creates a coordinate from axes already known to be in range.
    pub(crate) fn from_axes(row: usize, col: usize) -> Self {
        debug_assert!(row < SIZE && col < SIZE, "({row}, {col}) off the board");
        Self { row, col }
    }

    /// Row (0 = top).
    pub fn row(self) -> usize {
        self.row
    }

    /// Column (0 = left).
    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    /// Chebyshev distance: the larger of the row and column offsets.
    pub fn distance(self, other: Coord) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Steps one cell by `(d_row, d_col)`, or `None` past the edge.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(d_row).filter(|r| *r < SIZE)?;
        let col = self.col.checked_add_signed(d_col).filter(|c| *c < SIZE)?;
        Some(Self { row, col })
    }

    /// All nine coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..SIZE * SIZE).map(|i| Self::from_axes(i / SIZE, i % SIZE))
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; SIZE * SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; SIZE * SIZE];
    }

    /// Places `mark` at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::CellOccupied`] if the cell already holds a mark;
    /// the board is left untouched.
    #[instrument(level = "debug", skip_all, fields(%coord, ?mark))]
    pub fn place(&mut self, coord: Coord, mark: Mark) -> Result<(), MoveError> {
        let cell = &mut self.cells[coord.index()];
        if !cell.is_empty() {
            return Err(MoveError::CellOccupied { coord });
        }
        *cell = Cell::Marked(mark);
        trace!("Mark placed");
        Ok(())
    }

    /// Returns the cell at `coord`.
    pub fn at(&self, coord: Coord) -> Cell {
        self.cells[coord.index()]
    }

    /// True if `coord` holds `mark`.
    pub fn has(&self, coord: Coord, mark: Mark) -> bool {
        self.at(coord) == Cell::Marked(mark)
    }

    /// True once no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Marked(mark)).count()
    }

    /// Snapshot of all nine cells, row-major.
    pub fn cells(&self) -> &[Cell; SIZE * SIZE] {
        &self.cells
    }
}

/// Renders the board with column and row headers:
///
/// ```text
///   0 1 2
/// 0 X|-|-
/// 1 -|O|-
/// 2 -|-|-
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..SIZE {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for row in 0..SIZE {
            write!(f, "{row} ")?;
            for col in 0..SIZE {
                write!(f, "{}", self.cells[row * SIZE + col].glyph())?;
                if col < SIZE - 1 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
