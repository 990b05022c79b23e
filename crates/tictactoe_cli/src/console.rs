//! Console input and output collaborators.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use tictactoe_core::{
    Board, Coord, GameInput, GameOutput, InputError, Outcome, SIZE, Scoreboard,
};
use tracing::{debug, instrument, warn};

/// Reads the human's choices as whitespace-separated tokens, like `cin >>`.
///
/// Prompts are written to `out`.
pub struct ConsoleInput<R, W> {
    reader: R,
    out: W,
    welcome: bool,
    tokens: VecDeque<String>,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    /// Creates a console reader. `welcome` prints the banner before the start prompt.
    pub fn new(reader: R, out: W, welcome: bool) -> Self {
        Self {
            reader,
            out,
            welcome,
            tokens: VecDeque::new(),
        }
    }

    /// Next whitespace-separated token, reading more lines as needed.
    fn token(&mut self) -> Result<String, InputError> {
        loop {
            if let Some(token) = self.tokens.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(InputError::Closed);
            }
            self.tokens
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }

    fn prompt(&mut self, text: &str) -> Result<(), InputError> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    /// Prompts until a value in `0..=2` is entered.
    fn axis(&mut self, name: &str) -> Result<i64, InputError> {
        loop {
            self.prompt(&format!("{}: ", name))?;
            let token = self.token()?;
            let value = atoi(&token);
            if (0..SIZE as i64).contains(&value) {
                return Ok(value);
            }
            debug!(%token, value, "Axis out of range");
            writeln!(self.out, "ERROR: {} out of range", name)?;
        }
    }

    fn yes(&mut self, accept: char) -> Result<bool, InputError> {
        let token = self.token()?;
        Ok(token
            .chars()
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&accept)))
    }
}

impl<R: BufRead, W: Write> GameInput for ConsoleInput<R, W> {
    #[instrument(skip(self))]
    fn start(&mut self) -> Result<bool, InputError> {
        if self.welcome {
            writeln!(self.out, "Welcome to Command-Line Tic-Tac-Toe!")?;
            writeln!(self.out, "Play 1-on-1 against the computer")?;
            writeln!(self.out, "Player Pieces: X")?;
            writeln!(self.out, "Comp Pieces: O")?;
            writeln!(self.out)?;
        }
        writeln!(self.out, "Press [B] to begin, [E] to exit")?;
        self.yes('b')
    }

    #[instrument(skip_all)]
    fn player_move(&mut self, _board: &Board) -> Result<Coord, InputError> {
        writeln!(self.out)?;
        writeln!(self.out, "Enter row and column.")?;
        writeln!(self.out, "NOTE: Non-numeric input interpreted as 0")?;
        loop {
            let row = self.axis("Row")?;
            let col = self.axis("Col")?;
            match Coord::new(row, col) {
                Ok(coord) => return Ok(coord),
                Err(err) => writeln!(self.out, "ERROR: {}", err)?,
            }
        }
    }

    #[instrument(skip(self))]
    fn replay(&mut self, outcome: Outcome) -> Result<bool, InputError> {
        self.prompt("Play again? [Y/N] ")?;
        self.yes('y')
    }
}

/// Writes boards and results for the human.
pub struct ConsoleOutput<W> {
    out: W,
}

impl<W: Write> ConsoleOutput<W> {
    /// Creates a console writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Final tally, shown when the human leaves.
    pub fn farewell(&mut self, scoreboard: &Scoreboard) {
        let text = if scoreboard.rounds() == 0 {
            "Goodbye!\n".to_string()
        } else {
            format!("Final score: {}\nGoodbye!\n", scoreboard)
        };
        self.emit(&text);
    }

    /// Output failures are logged, not fatal: the game state is unaffected.
    fn emit(&mut self, text: &str) {
        let written = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(err) = written {
            warn!(%err, "Failed to write to console");
        }
    }
}

impl<W: Write> GameOutput for ConsoleOutput<W> {
    fn board(&mut self, board: &Board) {
        self.emit(&board.to_string());
    }

    fn cell_occupied(&mut self, coord: Coord) {
        debug!(%coord, "Occupied cell picked");
        self.emit("Provided coordinates already used. Try again.\n");
    }

    fn game_over(&mut self, outcome: Outcome, scoreboard: &Scoreboard) {
        self.emit(&format!("\n{}\nScore: {}\n", outcome, scoreboard));
    }
}

/// Parses a leading integer the way C's `atoi` does: optional sign, then
/// digits; anything unparseable is 0.
fn atoi(token: &str) -> i64 {
    let token = token.trim_start();
    let (sign, rest) = match token.as_bytes().first() {
        Some(b'-') => (-1, &token[1..]),
        Some(b'+') => (1, &token[1..]),
        _ => (1, token),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..digits]
        .parse::<i64>()
        .map(|v| sign * v)
        .unwrap_or(if digits > 0 { i64::MAX } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn input(text: &str) -> ConsoleInput<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleInput::new(Cursor::new(text.as_bytes().to_vec()), Vec::new(), true)
    }

    fn written(input: &ConsoleInput<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(input.out.clone()).unwrap()
    }

    #[test]
    fn test_atoi() {
        assert_eq!(atoi("2"), 2);
        assert_eq!(atoi("1abc"), 1);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi("-1"), -1);
        assert_eq!(atoi("+2"), 2);
        assert_eq!(atoi(""), 0);
        assert_eq!(atoi("99999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_start_accepts_either_case() {
        assert!(input("b\n").start().unwrap());
        assert!(input("B\n").start().unwrap());
        assert!(!input("e\n").start().unwrap());
        assert!(!input("x\n").start().unwrap());
    }

    #[test]
    fn test_start_prints_banner() {
        let mut console = input("b\n");
        console.start().unwrap();
        let text = written(&console);
        assert!(text.contains("Welcome to Command-Line Tic-Tac-Toe!"));
        assert!(text.contains("Player Pieces: X"));
    }

    #[test]
    fn test_move_reprompts_out_of_range() {
        let mut console = input("5\n1\nfoo\n");
        let coord = console.player_move(&Board::new()).unwrap();
        assert_eq!(coord, Coord::new(1, 0).unwrap());
        assert!(written(&console).contains("ERROR: Row out of range"));
    }

    #[test]
    fn test_move_tokens_on_one_line() {
        let mut console = input("2 1\n");
        let coord = console.player_move(&Board::new()).unwrap();
        assert_eq!(coord, Coord::new(2, 1).unwrap());
    }

    #[test]
    fn test_closed_input() {
        let mut console = input("1\n");
        assert_eq!(
            console.player_move(&Board::new()),
            Err(InputError::Closed)
        );
    }

    #[test]
    fn test_replay_answer() {
        assert!(input("y\n").replay(Outcome::Draw).unwrap());
        assert!(!input("n\n").replay(Outcome::Draw).unwrap());
    }

    #[test]
    fn test_output_messages() {
        let mut output = ConsoleOutput::new(Vec::new());
        output.board(&Board::new());
        output.cell_occupied(Coord::new(0, 0).unwrap());
        output.game_over(Outcome::ComputerWon, &Scoreboard::default());
        let text = String::from_utf8(output.out).unwrap();
        assert!(text.starts_with("  0 1 2\n0 -|-|-\n"));
        assert!(text.contains("Provided coordinates already used. Try again."));
        assert!(text.contains("The computer wins."));
    }
}
