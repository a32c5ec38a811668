//! Exhaustive game tree search

use crate::board::{Board, Mark};
use crate::outcome::winner;

/// Score of a position the automated player wins with best play
pub const WIN_SCORE: i32 = 1;
/// Score of a drawn position
pub const DRAW_SCORE: i32 = 0;
/// Score of a position the automated player loses with best play
pub const LOSS_SCORE: i32 = -1;

/// Minimax search over the remaining game tree
///
/// # Notes
/// The searcher owns a working copy of the board. Each branch places a mark,
/// recurses and clears the mark again, so the working copy is back in its
/// starting state whenever a call returns.
///
/// # Position Scoring
/// Scores are always from the automated player's (`O`) perspective:
/// [`WIN_SCORE`] for a forced win, [`LOSS_SCORE`] for a forced loss and
/// [`DRAW_SCORE`] when best play from both sides draws. There is no depth
/// limit, the board has at most 9 empty cells.
#[derive(Clone)]
pub struct Searcher {
    board: Board,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            node_count: 0,
        }
    }

    /// Performs game tree search with alpha-beta pruning
    ///
    /// `maximizing` is true when the automated player is to move. Returns the
    /// score of the position (see [Position Scoring])
    ///
    /// [Position Scoring]: #position-scoring
    pub fn minimax(&mut self, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        self.node_count += 1;

        match winner(&self.board) {
            Some(Mark::Ai) => return WIN_SCORE,
            Some(Mark::Human) => return LOSS_SCORE,
            None => {}
        }
        if self.board.is_full() {
            return DRAW_SCORE;
        }

        let (mark, mut best) = if maximizing {
            (Mark::Ai, i32::MIN)
        } else {
            (Mark::Human, i32::MAX)
        };

        let candidates: Vec<_> = self.board.empty_cells().collect();
        for mv in candidates {
            self.board.place(mv, mark);
            let score = self.minimax(!maximizing, alpha, beta);
            self.board.clear(mv);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            // the opponent already has a better option elsewhere,
            // nothing left at this node can change the parent's choice
            if beta <= alpha {
                break;
            }
        }
        best
    }

    /// Searches the position with a full window
    pub fn evaluate(&mut self, maximizing: bool) -> i32 {
        self.minimax(maximizing, i32::MIN, i32::MAX)
    }
}

impl std::ops::Deref for Searcher {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

/// Scores a board with `maximizing` deciding which side moves next
pub fn evaluate(board: &Board, maximizing: bool) -> i32 {
    Searcher::new(*board).evaluate(maximizing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;

    fn board(notation: &str) -> Board {
        notation.parse().unwrap()
    }

    #[test]
    fn terminal_positions() {
        assert_eq!(evaluate(&board("OOO/XX./X.."), false), WIN_SCORE);
        assert_eq!(evaluate(&board("XXX/OO./O.."), true), LOSS_SCORE);
        assert_eq!(evaluate(&board("XOX/XOO/OXX"), true), DRAW_SCORE);
    }

    #[test]
    fn terminal_checked_before_moves() {
        let mut searcher = Searcher::new(board("OOO/XX./X.."));
        searcher.evaluate(true);
        assert_eq!(searcher.node_count, 1);
    }

    #[test]
    fn empty_board_is_a_draw() {
        assert_eq!(evaluate(&Board::new(), true), DRAW_SCORE);
        assert_eq!(evaluate(&Board::new(), false), DRAW_SCORE);
    }

    #[test]
    fn fork_is_a_forced_win() {
        // no immediate win for O, but (2, 0) threatens (1, 0) and (0, 2) at once
        let b = board("OX./.O./..X");
        assert_eq!(evaluate(&b, true), WIN_SCORE);
    }

    #[test]
    fn edge_reply_to_corner_loses() {
        // X in the corner, O answered on an adjacent edge, X to move
        let b = board("XO./.../...");
        assert_eq!(evaluate(&b, false), LOSS_SCORE);
    }

    #[test]
    fn working_copy_restored() {
        let b = board("X../.O./..X");
        let mut searcher = Searcher::new(b);
        searcher.evaluate(true);
        assert_eq!(*searcher, b);
        assert!(searcher.is_empty(Move::at(0, 1)));
    }

    #[test]
    fn pruning_matches_full_window_scores() {
        // a narrow window must still classify the score correctly
        let b = board("X../.../...");
        let full = evaluate(&b, true);
        let mut searcher = Searcher::new(b);
        let narrow = searcher.minimax(true, -1, 1);
        assert_eq!(full, DRAW_SCORE);
        assert_eq!(narrow, full);
    }
}
