//! Command-line interface for sliding_games.

use clap::{Parser, Subcommand};
use sliding_tictactoe::Mark;
use std::path::PathBuf;

/// Sliding Games - tic-tac-toe where only the last six moves stay on the board
#[derive(Parser, Debug)]
#[command(name = "sliding_games")]
#[command(about = "Sliding-window tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = sliding_games::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the computer
    Local {
        /// Mark to play (X moves first)
        #[arg(long, value_parser = parse_mark)]
        mark: Option<Mark>,

        /// Search depth for the computer (2-9)
        #[arg(long)]
        depth: Option<u8>,
    },

    /// Two players on one terminal, synchronized through a match store
    Duel {
        /// Name of the X player
        #[arg(long, default_value = "Player X")]
        x_name: String,

        /// Name of the O player
        #[arg(long, default_value = "Player O")]
        o_name: String,
    },

    /// Watch the computer play itself
    Watch {
        /// Search depth for X (2-9)
        #[arg(long, default_value_t = 4)]
        x_depth: u8,

        /// Search depth for O (2-9)
        #[arg(long, default_value_t = 4)]
        o_depth: u8,

        /// Stop after this many moves
        #[arg(long, default_value_t = 30)]
        moves: usize,
    },

    /// Print the computer's move for a match record (JSON)
    Suggest {
        /// File holding the record; reads stdin if omitted
        #[arg(long)]
        file: Option<PathBuf>,

        /// Search depth (2-9)
        #[arg(long)]
        depth: Option<u8>,
    },
}

/// Parses `X` or `O`, case-insensitively.
pub fn parse_mark(value: &str) -> Result<Mark, String> {
    match value {
        "x" | "X" => Ok(Mark::X),
        "o" | "O" => Ok(Mark::O),
        other => Err(format!("expected X or O, got '{}'", other)),
    }
}
