//! Turn controller: one human against the computer, round after round.
//!
//! [`GameSession`] owns the board, the player's last move and the RNG for a
//! round and resets them together. It talks to the outside world only
//! through [`GameInput`] and [`GameOutput`].

use crate::ai::{MoveRng, MoveSelector, SessionRng};
use crate::board::{Board, Coord, Mark};
use crate::config::GameConfig;
use crate::error::{InputError, MoveError};
use crate::rules::{GameStatus, Outcome, evaluate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the session is in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TurnState {
    /// Waiting for the human's coordinates.
    #[display("awaiting the player's move")]
    AwaitingPlayerMove,
    /// The computer moves next.
    #[display("awaiting the computer's move")]
    AwaitingComputerMove,
    /// Round finished; waiting for the replay decision.
    #[display("game over ({})", _0)]
    GameOver(Outcome),
    /// The human chose to stop.
    #[display("exited")]
    Exited,
}

/// Running tally across rounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[display("You {} - Computer {} - Draws {}", player_wins, computer_wins, draws)]
pub struct Scoreboard {
    /// Rounds the human won.
    pub player_wins: u32,
    /// Rounds the computer won.
    pub computer_wins: u32,
    /// Drawn rounds.
    pub draws: u32,
}

impl Scoreboard {
    /// Counts one finished round.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWon => self.player_wins += 1,
            Outcome::ComputerWon => self.computer_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Total finished rounds.
    pub fn rounds(&self) -> u32 {
        self.player_wins + self.computer_wins + self.draws
    }
}

/// Supplies the human's decisions.
pub trait GameInput {
    /// `true` to begin playing, `false` to exit straight away.
    fn start(&mut self) -> Result<bool, InputError>;

    /// Next move, already range-checked.
    fn player_move(&mut self, board: &Board) -> Result<Coord, InputError>;

    /// `true` to play another round.
    fn replay(&mut self, outcome: Outcome) -> Result<bool, InputError>;
}

/// Receives everything the human should see.
pub trait GameOutput {
    /// Board after setup or a placement.
    fn board(&mut self, board: &Board);

    /// The human picked a taken cell and will be asked again.
    fn cell_occupied(&mut self, coord: Coord);

    /// A round just ended.
    fn game_over(&mut self, outcome: Outcome, scoreboard: &Scoreboard);
}

/// State of one play session.
#[derive(Debug)]
pub struct GameSession<R = SessionRng> {
    board: Board,
    last_player_move: Option<Coord>,
    state: TurnState,
    round: u64,
    scoreboard: Scoreboard,
    selector: MoveSelector,
    rng: R,
}

impl GameSession<SessionRng> {
    /// Creates a session tuned by `config`.
    #[instrument(skip_all, fields(seed = ?config.seed()))]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(MoveSelector::from_config(config), SessionRng::new(*config.seed()))
    }
}

impl<R: MoveRng> GameSession<R> {
    /// Creates a session with an explicit selector and randomness source.
    pub fn with_rng(selector: MoveSelector, rng: R) -> Self {
        Self {
            board: Board::new(),
            last_player_move: None,
            state: TurnState::AwaitingPlayerMove,
            round: 0,
            scoreboard: Scoreboard::default(),
            selector,
            rng,
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// The human's most recent placement this round.
    pub fn last_player_move(&self) -> Option<Coord> {
        self.last_player_move
    }

    /// Zero-based round number.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Results so far.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Randomness source.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Places the human's mark.
    ///
    /// # Errors
    ///
    /// [`MoveError::CellOccupied`] if the cell is taken; nothing changes and
    /// the human should be asked again. [`MoveError::OutOfTurn`] if the
    /// session is not waiting for the human.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn player_move(&mut self, coord: Coord) -> Result<TurnState, MoveError> {
        self.expect(TurnState::AwaitingPlayerMove)?;
        if let Err(err) = self.board.place(coord, Mark::Player) {
            warn!(%err, "Player move rejected");
            return Err(err);
        }
        self.last_player_move = Some(coord);
        Ok(self.advance(coord, Mark::Player))
    }

    /// Lets the computer pick and place its mark, returning the chosen cell.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfTurn`] if the session is not waiting for the computer.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn computer_move(&mut self) -> Result<Coord, MoveError> {
        self.expect(TurnState::AwaitingComputerMove)?;
        let (coord, strategy) = self
            .selector
            .select(&self.board, self.last_player_move, &mut self.rng);
        if let Err(err) = self.board.place(coord, Mark::Computer) {
            unreachable!("move selector returned a taken cell: {err}");
        }
        debug!(%coord, ?strategy, "Computer moved");
        self.advance(coord, Mark::Computer);
        Ok(coord)
    }

    /// Applies the replay decision after a round ends.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfTurn`] unless the round is over.
    #[instrument(skip(self))]
    pub fn replay(&mut self, again: bool) -> Result<TurnState, MoveError> {
        if !matches!(self.state, TurnState::GameOver(_)) {
            return Err(MoveError::OutOfTurn { state: self.state });
        }
        if again {
            self.reset();
        } else {
            info!(scoreboard = %self.scoreboard, "Session finished");
            self.state = TurnState::Exited;
        }
        Ok(self.state)
    }

    /// Starts a fresh round: empty board, no last move, reseeded RNG.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.round += 1;
        self.board.reset();
        self.last_player_move = None;
        self.rng.reseed(self.round);
        self.state = TurnState::AwaitingPlayerMove;
        info!(round = self.round, "New round");
    }

    /// Drives rounds until the human exits.
    ///
    /// Occupied-cell rejections loop back to the input for another move.
    ///
    /// # Errors
    ///
    /// Propagates failures from `input`.
    #[instrument(skip_all)]
    pub fn run(
        &mut self,
        input: &mut impl GameInput,
        output: &mut impl GameOutput,
    ) -> Result<Scoreboard, InputError> {
        if !input.start()? {
            info!("Exit chosen before play");
            self.state = TurnState::Exited;
            return Ok(self.scoreboard);
        }
        info!(round = self.round, "Session started");
        output.board(&self.board);

        loop {
            match self.state {
                TurnState::AwaitingPlayerMove => {
                    let coord = input.player_move(&self.board)?;
                    match self.player_move(coord) {
                        Ok(_) => output.board(&self.board),
                        Err(MoveError::CellOccupied { coord }) => output.cell_occupied(coord),
                        Err(err) => unreachable!("player move failed while awaiting it: {err}"),
                    }
                }
                TurnState::AwaitingComputerMove => {
                    if let Err(err) = self.computer_move() {
                        unreachable!("computer move failed while awaiting it: {err}");
                    }
                    output.board(&self.board);
                }
                TurnState::GameOver(outcome) => {
                    output.game_over(outcome, &self.scoreboard);
                    let again = input.replay(outcome)?;
                    if let Ok(TurnState::AwaitingPlayerMove) = self.replay(again) {
                        output.board(&self.board);
                    }
                }
                TurnState::Exited => return Ok(self.scoreboard),
            }
        }
    }

    fn expect(&self, wanted: TurnState) -> Result<(), MoveError> {
        if self.state == wanted {
            Ok(())
        } else {
            Err(MoveError::OutOfTurn { state: self.state })
        }
    }

    /// Evaluates the board after `mark` landed on `coord` and moves on.
    fn advance(&mut self, coord: Coord, mark: Mark) -> TurnState {
        self.assert_invariants();
        self.state = match evaluate(&self.board, coord, mark) {
            GameStatus::Finished(outcome) => {
                self.scoreboard.record(outcome);
                info!(round = self.round, %outcome, "Round over");
                TurnState::GameOver(outcome)
            }
            GameStatus::InProgress => match mark {
                Mark::Player => TurnState::AwaitingComputerMove,
                Mark::Computer => TurnState::AwaitingPlayerMove,
            },
        };
        self.state
    }

    /// The player moves first, so X count is O count or one more.
    fn assert_invariants(&self) {
        let x = self.board.count(Mark::Player);
        let o = self.board.count(Mark::Computer);
        if !(x == o || x == o + 1) {
            warn!(x, o, "Mark counts out of balance");
        }
        debug_assert!(x == o || x == o + 1, "mark counts out of balance: {x} vs {o}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i64, col: i64) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = GameSession::new(&GameConfig::default().with_seed(Some(1)));
        assert_eq!(session.state(), TurnState::AwaitingPlayerMove);

        let state = session.player_move(c(1, 1)).unwrap();
        assert_eq!(state, TurnState::AwaitingComputerMove);
        assert_eq!(session.last_player_move(), Some(c(1, 1)));

        let coord = session.computer_move().unwrap();
        assert_ne!(coord, c(1, 1));
        assert_eq!(session.state(), TurnState::AwaitingPlayerMove);
        assert_eq!(session.board().count(Mark::Computer), 1);
    }

    #[test]
    fn test_out_of_turn_moves_are_refused() {
        let mut session = GameSession::new(&GameConfig::default().with_seed(Some(2)));
        assert_eq!(
            session.computer_move(),
            Err(MoveError::OutOfTurn {
                state: TurnState::AwaitingPlayerMove
            })
        );

        session.player_move(c(0, 0)).unwrap();
        assert!(matches!(
            session.player_move(c(0, 1)),
            Err(MoveError::OutOfTurn { .. })
        ));
        assert!(session.replay(true).is_err());
    }

    #[test]
    fn test_scoreboard_display() {
        let mut scoreboard = Scoreboard::default();
        scoreboard.record(Outcome::PlayerWon);
        scoreboard.record(Outcome::Draw);
        scoreboard.record(Outcome::PlayerWon);
        assert_eq!(scoreboard.rounds(), 3);
        assert_eq!(scoreboard.to_string(), "You 2 - Computer 0 - Draws 1");
    }
}
