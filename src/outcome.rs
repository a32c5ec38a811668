//! Win and draw detection

use static_assertions::*;

use crate::board::{Board, Mark, Move};
use crate::SIZE;

/// Three cells forming a row, column or diagonal, in board order
pub type Line = [Move; 3];

/// Every winning line, in scan order: rows, then columns, then the
/// top-left and top-right diagonals
pub const LINES: [Line; 8] = [
    // rows
    [Move::at(0, 0), Move::at(0, 1), Move::at(0, 2)],
    [Move::at(1, 0), Move::at(1, 1), Move::at(1, 2)],
    [Move::at(2, 0), Move::at(2, 1), Move::at(2, 2)],
    // columns
    [Move::at(0, 0), Move::at(1, 0), Move::at(2, 0)],
    [Move::at(0, 1), Move::at(1, 1), Move::at(2, 1)],
    [Move::at(0, 2), Move::at(1, 2), Move::at(2, 2)],
    // diagonals
    [Move::at(0, 0), Move::at(1, 1), Move::at(2, 2)],
    [Move::at(0, 2), Move::at(1, 1), Move::at(2, 0)],
];

const_assert_eq!(LINES.len(), 2 * SIZE + 2);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    InProgress,
    Win { mark: Mark, line: Line },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }
}

/// Returns the first complete line on the board and its mark
///
/// When several lines are complete at once the scan order of [`LINES`]
/// decides which one is reported, so callers always highlight the same line.
pub fn winning_line(board: &Board) -> Option<(Mark, Line)> {
    LINES.iter().find_map(|&line| {
        let mark = board.get(line[0]).mark()?;
        if line[1..].iter().all(|&mv| board.get(mv).mark() == Some(mark)) {
            Some((mark, line))
        } else {
            None
        }
    })
}

/// Returns the mark that has completed a line, if any
pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

/// Classifies a board as won, drawn or still in progress
pub fn detect_outcome(board: &Board) -> Outcome {
    match winning_line(board) {
        Some((mark, line)) => Outcome::Win { mark, line },
        None if board.is_full() => Outcome::Draw,
        None => Outcome::InProgress,
    }
}
