//! Tic-Tac-Toe - one human against the computer on the command line.

#![warn(missing_docs)]

mod cli;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use console::{ConsoleInput, ConsoleOutput};
use std::io;
use tictactoe_core::{GameConfig, GameSession, InputError};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;
    run_game(&config, !cli.no_welcome)
}

/// Reads the config file if one was given and applies the `--seed` override.
#[instrument(skip_all, fields(config = ?cli.config, seed = ?cli.seed))]
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    Ok(match cli.seed {
        Some(seed) => config.with_seed(Some(seed)),
        None => config,
    })
}

/// Plays rounds on stdin/stdout until the human exits.
#[instrument(skip(config))]
fn run_game(config: &GameConfig, welcome: bool) -> Result<()> {
    let mut input = ConsoleInput::new(io::stdin().lock(), io::stdout(), welcome);
    let mut output = ConsoleOutput::new(io::stdout());
    let mut session = GameSession::new(config);

    let scoreboard = match session.run(&mut input, &mut output) {
        Ok(scoreboard) => scoreboard,
        Err(InputError::Closed) => {
            info!("Input closed, leaving the game");
            *session.scoreboard()
        }
        Err(err) => return Err(err).context("Failed to read player input"),
    };

    output.farewell(&scoreboard);
    Ok(())
}
