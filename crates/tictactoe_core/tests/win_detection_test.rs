//! Tests for anchored three-in-a-row detection.

use strum::IntoEnumIterator;
use tictactoe_core::{Board, Cell, Coord, Direction, Mark, has_three_in_a_row, scan};

const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

fn coord(index: usize) -> Coord {
    Coord::from_index(index).unwrap()
}

/// Board number `n` read as nine base-3 digits: 0 empty, 1 X, 2 O.
fn board_from_number(mut n: u32) -> Board {
    let mut board = Board::new();
    for index in 0..9 {
        match n % 3 {
            1 => board.place(coord(index), Mark::Player).unwrap(),
            2 => board.place(coord(index), Mark::Computer).unwrap(),
            _ => {}
        }
        n /= 3;
    }
    board
}

fn line_through(board: &Board, anchor: Coord, mark: Mark) -> bool {
    LINES
        .iter()
        .filter(|line| line.contains(&anchor.index()))
        .any(|line| line.iter().all(|i| board.has(coord(*i), mark)))
}

#[test]
fn test_every_winning_line_from_every_anchor() {
    for mark in [Mark::Player, Mark::Computer] {
        for line in LINES {
            let mut board = Board::new();
            for index in line {
                board.place(coord(index), mark).unwrap();
            }
            for anchor in line {
                assert!(
                    has_three_in_a_row(&board, coord(anchor), mark),
                    "{line:?} missed from anchor {anchor}"
                );
                assert!(!has_three_in_a_row(&board, coord(anchor), mark.opponent()));
            }
        }
    }
}

#[test]
fn test_matches_brute_force_on_all_boards() {
    for n in 0..3u32.pow(9) {
        let board = board_from_number(n);
        for anchor in Coord::all() {
            let Cell::Marked(mark) = board.at(anchor) else {
                continue;
            };
            assert_eq!(
                has_three_in_a_row(&board, anchor, mark),
                line_through(&board, anchor, mark),
                "board #{n} anchored at {anchor}\n{board}"
            );
        }
    }
}

#[test]
fn test_scans_cover_whole_board_from_center() {
    let mut board = Board::new();
    for c in Coord::all() {
        board.place(c, Mark::Computer).unwrap();
    }
    let center = Coord::new(1, 1).unwrap();
    for dir in Direction::iter() {
        assert!(scan(&board, center, Mark::Computer, dir), "{dir:?}");
        assert!(!scan(&board, center, Mark::Player, dir), "{dir:?}");
    }
}
