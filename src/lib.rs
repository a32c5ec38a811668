//! A perfect agent for playing the board game 'Tic-Tac-Toe'
//!
//! The agent plays the `O` mark against a human playing `X`. It takes an
//! immediate win when one exists, blocks the opponent's immediate win
//! otherwise, and falls back to an exhaustive minimax search with
//! alpha-beta pruning for every other position.
//!
//! # Basic Usage
//!
//! ```
//! use tictactoe_ai::{select_move, Board, Move};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board: Board = "XX./.../...".parse()?;
//!
//! // block the top row
//! assert_eq!(select_move(&board), Some(Move::new(0, 2)?));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod outcome;

pub mod search;

pub mod selector;

pub mod round;

pub mod census;

mod test;

pub use board::{Board, BoardError, Cell, Mark, Move};
pub use outcome::{detect_outcome, Line, Outcome};
pub use selector::select_move;

/// The width and height of the game board in cells
pub const SIZE: usize = 3;

/// The number of cells on the game board
pub const CELLS: usize = SIZE * SIZE;

// ensure that base-3 position keys fit in a u16
const_assert!(CELLS <= 10);

/// Returns true if no empty cell remains on the board
pub fn is_board_full(board: &Board) -> bool {
    board.is_full()
}
