//! Command-line interface for tictactoe.

use clap::Parser;
use std::path::PathBuf;

/// Play tic-tac-toe against the computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Command-line tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fixed RNG seed, overriding the config file
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Skip the welcome banner
    #[arg(long)]
    pub no_welcome: bool,
}
