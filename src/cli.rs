//! Command-line interface for tictactoe_cli

use clap::{ArgAction, Parser, Subcommand};

/// Play Tic-Tac-Toe against a perfect opponent, or query its moves
#[derive(Parser, Debug)]
#[command(name = "tictactoe_cli", version, long_about = None)]
pub struct Cli {
    /// Log more detail (-v for info, -vv for debug), RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal as X
    Play {
        /// Let the AI place the first mark
        #[arg(long)]
        ai_first: bool,

        /// Pause before each AI move, in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,
    },

    /// Print the AI's move for a position, e.g. "XX./.../..."
    Move {
        /// Board in compact notation, rows top to bottom, '.' for empty cells
        board: String,
    },

    /// Play the AI against every possible human strategy and report the results
    Verify {
        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
    },
}
