//! Tic-tac-toe engine for a human playing against the computer.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid of cells with placement and occupancy queries
//! - **Position**: names each cell to pick the lines passing through it
//! - **Win detection**: scans outward from the last placed cell only
//! - **AI**: plays next to the human's last move when it can, otherwise anywhere
//! - **Session**: the turn controller, driving input and output collaborators
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{Coord, GameConfig, GameSession, TurnState};
//!
//! let mut session = GameSession::new(&GameConfig::default().with_seed(Some(7)));
//! let state = session.player_move(Coord::new(1, 1).unwrap()).unwrap();
//! assert_eq!(state, TurnState::AwaitingComputerMove);
//! session.computer_move().unwrap();
//! assert_eq!(session.state(), TurnState::AwaitingPlayerMove);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod board;
mod config;
mod error;
mod position;
mod rules;
mod session;
mod win;

pub use ai::{MoveRng, MoveSelector, SessionRng, Strategy};
pub use board::{Board, Cell, Coord, Mark, SIZE};
pub use config::{ConfigError, GameConfig};
pub use error::{InputError, MoveError};
pub use position::{Position, PositionKind};
pub use rules::{GameStatus, Outcome, evaluate};
pub use session::{GameInput, GameOutput, GameSession, Scoreboard, TurnState};
pub use win::{Direction, LineCheck, both_sides, has_three_in_a_row, line_checks, scan};
