//! One exchange of turns between a human and the automated player
//!
//! A hosting layer (web handler, terminal loop) sends the board after the
//! human's move and gets back the board after the engine's answer, together
//! with the engine's move and the state of the game. Scores across rounds
//! are the host's business.

use crate::board::{Board, Mark, Move};
use crate::outcome::{detect_outcome, Outcome};
use crate::selector::select_move;

/// Who places the first mark of a round
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Starter {
    Human,
    Ai,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Reply {
    /// The board after the engine's move, if it made one
    pub board: Board,
    /// The cell the engine played
    pub ai_move: Option<Move>,
    pub outcome: Outcome,
}

/// Starts a round on an empty board, letting the engine open if it starts
pub fn new_round(first: Starter) -> Reply {
    match first {
        Starter::Human => Reply {
            board: Board::new(),
            ai_move: None,
            outcome: Outcome::InProgress,
        },
        Starter::Ai => respond(&Board::new()),
    }
}

/// Answers the human's move
///
/// Finished games are returned unchanged with their outcome and no move.
pub fn respond(board: &Board) -> Reply {
    let outcome = detect_outcome(board);
    if outcome.is_terminal() {
        return Reply {
            board: *board,
            ai_move: None,
            outcome,
        };
    }

    let mut next = *board;
    let ai_move = select_move(board);
    if let Some(mv) = ai_move {
        next.place(mv, Mark::Ai);
    }

    Reply {
        board: next,
        ai_move,
        outcome: detect_outcome(&next),
    }
}
