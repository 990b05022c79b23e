//! Computer opponent: prefers cells next to the player's last move.

use crate::board::{Board, Coord, SIZE};
use crate::config::GameConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, trace};

/// Source of randomness for the computer opponent.
pub trait MoveRng {
    /// Uniform integer in `[0, 3)`.
    fn coordinate(&mut self) -> usize;

    /// `true` with probability `chance`.
    fn coin(&mut self, chance: f64) -> bool;

    /// Reseeds at the start of round `round`.
    fn reseed(&mut self, round: u64);
}

/// [`StdRng`]-backed randomness that reseeds every round.
///
/// With a fixed seed, round `n` uses `seed + n` so whole sessions replay
/// identically. Without one, each round draws fresh entropy.
#[derive(Debug, Clone)]
pub struct SessionRng {
    seed: Option<u64>,
    rng: StdRng,
}

impl SessionRng {
    /// Creates an RNG, seeded if `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            rng: Self::rng_for(seed, 0),
        }
    }

    /// Creates a deterministic RNG.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    fn rng_for(seed: Option<u64>, round: u64) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(round)),
            None => StdRng::from_entropy(),
        }
    }
}

impl MoveRng for SessionRng {
    fn coordinate(&mut self) -> usize {
        self.rng.gen_range(0..SIZE)
    }

    fn coin(&mut self, chance: f64) -> bool {
        self.rng.gen_bool(chance)
    }

    fn reseed(&mut self, round: u64) {
        trace!(round, seeded = self.seed.is_some(), "Reseeding");
        self.rng = Self::rng_for(self.seed, round);
    }
}

/// How the computer picked its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Within one step of the player's last move.
    Adjacent,
    /// Any empty cell.
    Random,
}

/// Heuristic move selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSelector {
    adjacent_attempts: u32,
    adjacent_chance: f64,
}

impl MoveSelector {
    /// Creates a selector.
    ///
    /// `adjacent_chance` must lie in `[0, 1]`.
    pub fn new(adjacent_attempts: u32, adjacent_chance: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&adjacent_chance));
        Self {
            adjacent_attempts,
            adjacent_chance,
        }
    }

    /// Selector using the tuning in `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(*config.adjacent_attempts(), *config.adjacent_chance())
    }

    /// Picks an empty cell for the computer.
    ///
    /// A coin flip decides whether to first try up to `adjacent_attempts`
    /// random cells for one that is empty and within one step of
    /// `last_player_move`. Otherwise, or if those attempts all miss, random
    /// cells are drawn until an empty one turns up.
    ///
    /// The board must have at least one empty cell.
    #[instrument(level = "debug", skip_all, fields(last = ?last_player_move))]
    pub fn select(
        &self,
        board: &Board,
        last_player_move: Option<Coord>,
        rng: &mut impl MoveRng,
    ) -> (Coord, Strategy) {
        debug_assert!(!board.is_full(), "no empty cell to select");

        if rng.coin(self.adjacent_chance) {
            match last_player_move {
                Some(last) => {
                    if let Some(coord) = self.adjacent(board, last, rng) {
                        debug!(%coord, "Adjacent cell chosen");
                        return (coord, Strategy::Adjacent);
                    }
                    debug!("Adjacent attempts exhausted");
                }
                None => debug!("No player move to play next to"),
            }
        }

        let coord = random_empty(board, rng);
        debug!(%coord, "Random cell chosen");
        (coord, Strategy::Random)
    }

    fn adjacent(&self, board: &Board, last: Coord, rng: &mut impl MoveRng) -> Option<Coord> {
        (0..self.adjacent_attempts).find_map(|attempt| {
            let candidate = Coord::from_axes(rng.coordinate(), rng.coordinate());
            let hit = board.at(candidate).is_empty() && candidate.distance(last) <= 1;
            trace!(attempt, %candidate, hit, "Adjacent candidate");
            hit.then_some(candidate)
        })
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Draws cells until an empty one is found, resampling the row and then
/// the column on each miss.
fn random_empty(board: &Board, rng: &mut impl MoveRng) -> Coord {
    let mut row = rng.coordinate();
    let mut col = rng.coordinate();
    loop {
        if board.at(Coord::from_axes(row, col)).is_empty() {
            break;
        }
        row = rng.coordinate();
        if board.at(Coord::from_axes(row, col)).is_empty() {
            break;
        }
        col = rng.coordinate();
    }
    Coord::from_axes(row, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;
    use std::collections::VecDeque;

    /// Replays scripted draws.
    struct Scripted {
        coords: VecDeque<usize>,
        coins: VecDeque<bool>,
    }

    impl Scripted {
        fn new(coins: &[bool], coords: &[usize]) -> Self {
            Self {
                coords: coords.iter().copied().collect(),
                coins: coins.iter().copied().collect(),
            }
        }
    }

    impl MoveRng for Scripted {
        fn coordinate(&mut self) -> usize {
            self.coords.pop_front().expect("script ran out of coordinates")
        }

        fn coin(&mut self, _chance: f64) -> bool {
            self.coins.pop_front().expect("script ran out of coins")
        }

        fn reseed(&mut self, _round: u64) {}
    }

    fn c(row: i64, col: i64) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_adjacent_hit_on_second_attempt() {
        let mut board = Board::new();
        board.place(c(0, 0), Mark::Player).unwrap();
        // Attempt 1: (2, 2) is too far. Attempt 2: (1, 0) is adjacent.
        let mut rng = Scripted::new(&[true], &[2, 2, 1, 0]);

        let (coord, strategy) = MoveSelector::default().select(&board, Some(c(0, 0)), &mut rng);
        assert_eq!(coord, c(1, 0));
        assert_eq!(strategy, Strategy::Adjacent);
    }

    #[test]
    fn test_adjacent_rejects_occupied_last_move() {
        let mut board = Board::new();
        board.place(c(1, 1), Mark::Player).unwrap();
        // Three attempts land on the player's own cell, then fall back.
        let mut rng = Scripted::new(&[true], &[1, 1, 1, 1, 1, 1, 2, 2]);

        let (coord, strategy) = MoveSelector::default().select(&board, Some(c(1, 1)), &mut rng);
        assert_eq!(coord, c(2, 2));
        assert_eq!(strategy, Strategy::Random);
    }

    #[test]
    fn test_tails_goes_straight_to_random() {
        let mut board = Board::new();
        board.place(c(1, 1), Mark::Player).unwrap();
        let mut rng = Scripted::new(&[false], &[0, 2]);

        let (coord, strategy) = MoveSelector::default().select(&board, Some(c(1, 1)), &mut rng);
        assert_eq!(coord, c(0, 2));
        assert_eq!(strategy, Strategy::Random);
    }

    #[test]
    fn test_random_resamples_row_then_col() {
        let mut board = Board::new();
        board.place(c(0, 0), Mark::Player).unwrap();
        board.place(c(1, 0), Mark::Computer).unwrap();
        // (0,0) taken -> row 1 gives (1,0) taken -> col 2 -> (1,2) free.
        let mut rng = Scripted::new(&[false], &[0, 0, 1, 2]);

        let (coord, _) = MoveSelector::default().select(&board, Some(c(0, 0)), &mut rng);
        assert_eq!(coord, c(1, 2));
    }

    #[test]
    fn test_seeded_rng_is_reproducible_per_round() {
        let mut a = SessionRng::seeded(7);
        let mut b = SessionRng::seeded(7);
        let draws_a: Vec<usize> = (0..16).map(|_| a.coordinate()).collect();
        let draws_b: Vec<usize> = (0..16).map(|_| b.coordinate()).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|v| *v < SIZE));

        a.reseed(3);
        b.reseed(3);
        assert_eq!(a.coordinate(), b.coordinate());
    }
}
