//! Move selection for the automated player

use tracing::{debug, trace};

use crate::board::{Board, Mark, Move};
use crate::outcome::{detect_outcome, winner};
use crate::search::{Searcher, WIN_SCORE};
use crate::CELLS;

/// Order in which the search fallback tries cells: the center, then the
/// corners, then the edges. Ties between equally scored cells go to the
/// earliest entry.
pub const PREFERENCE_ORDER: [Move; CELLS] = [
    Move::at(1, 1),
    Move::at(0, 0),
    Move::at(0, 2),
    Move::at(2, 0),
    Move::at(2, 2),
    Move::at(0, 1),
    Move::at(1, 0),
    Move::at(1, 2),
    Move::at(2, 1),
];

/// Which rule produced a move
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Tactic {
    /// Completes a line for the automated player
    Win,
    /// Fills the cell the human needs to complete a line
    Block,
    /// Chosen by game tree search, with the minimax score of the move
    Search { score: i32 },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Decision {
    pub mv: Move,
    pub tactic: Tactic,
    /// Search nodes visited while deciding (zero for tactical moves)
    pub node_count: usize,
}

/// Picks the automated player's move for a single position
///
/// # Notes
/// Moves are chosen in strict priority order:
/// 1. the first cell (row-major) that wins immediately
/// 2. the first cell (row-major) that blocks an immediate human win
/// 3. the best scoring cell of a full search, trying cells in
///    [`PREFERENCE_ORDER`]
pub struct Selector {
    board: Board,
    /// The number of nodes searched by this `Selector` so far (for diagnostics only)
    pub node_count: usize,
}

impl Selector {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            node_count: 0,
        }
    }

    /// Returns the first empty cell that completes a line for `mark`
    fn completing_move(&mut self, mark: Mark) -> Option<Move> {
        let candidates: Vec<_> = self.board.empty_cells().collect();
        for mv in candidates {
            self.board.place(mv, mark);
            let completes = winner(&self.board) == Some(mark);
            self.board.clear(mv);
            if completes {
                return Some(mv);
            }
        }
        None
    }

    /// Searches the candidates in preference order, returning the best move and its score
    fn search_move(&mut self, stop_at_win: bool) -> Option<(Move, i32)> {
        let mut best: Option<(Move, i32)> = None;

        for &mv in PREFERENCE_ORDER.iter() {
            if !self.board.is_empty(mv) {
                continue;
            }
            self.board.place(mv, Mark::Ai);
            let mut searcher = Searcher::new(self.board);
            let score = searcher.evaluate(false);
            self.node_count += searcher.node_count;
            self.board.clear(mv);

            trace!(%mv, score, "searched candidate");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
                // nothing later in the order can improve on a forced win
                if stop_at_win && score == WIN_SCORE {
                    break;
                }
            }
        }
        best
    }

    /// Chooses a move, or `None` if the game is already over
    pub fn select(&mut self) -> Option<Decision> {
        if detect_outcome(&self.board).is_terminal() {
            debug!(board = %self.board, "no move available, game is over");
            return None;
        }

        let decision = if let Some(mv) = self.completing_move(Mark::Ai) {
            Decision {
                mv,
                tactic: Tactic::Win,
                node_count: 0,
            }
        } else if let Some(mv) = self.completing_move(Mark::Human) {
            Decision {
                mv,
                tactic: Tactic::Block,
                node_count: 0,
            }
        } else {
            let (mv, score) = self.search_move(true)?;
            Decision {
                mv,
                tactic: Tactic::Search { score },
                node_count: self.node_count,
            }
        };

        debug!(
            board = %self.board,
            mv = %decision.mv,
            tactic = ?decision.tactic,
            nodes = decision.node_count,
            "selected move"
        );
        Some(decision)
    }

    /// Search fallback without the early exit on a forced win
    #[cfg(test)]
    fn search_exhaustive(&mut self) -> Option<(Move, i32)> {
        self.search_move(false)
    }
}

impl std::ops::Deref for Selector {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

/// Returns the automated player's move, or `None` if the game is over
pub fn select_move(board: &Board) -> Option<Move> {
    Selector::new(*board).select().map(|decision| decision.mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ALL_MOVES;
    use crate::search::DRAW_SCORE;

    fn board(notation: &str) -> Board {
        notation.parse().unwrap()
    }

    #[test]
    fn preference_order_covers_every_cell() {
        for mv in ALL_MOVES.iter() {
            assert_eq!(PREFERENCE_ORDER.iter().filter(|&p| p == mv).count(), 1);
        }
    }

    #[test]
    fn empty_board_takes_center() {
        let decision = Selector::new(Board::new()).select().unwrap();
        assert_eq!(decision.mv, Move::at(1, 1));
        assert_eq!(decision.tactic, Tactic::Search { score: DRAW_SCORE });
        assert!(decision.node_count > 0);
    }

    #[test]
    fn blocks_top_row() {
        let decision = Selector::new(board("XX./.../...")).select().unwrap();
        assert_eq!(decision.mv, Move::at(0, 2));
        assert_eq!(decision.tactic, Tactic::Block);
    }

    #[test]
    fn win_beats_block() {
        // X threatens the top row, O can finish the middle row
        let decision = Selector::new(board("XX./OO./X..")).select().unwrap();
        assert_eq!(decision.mv, Move::at(1, 2));
        assert_eq!(decision.tactic, Tactic::Win);
    }

    #[test]
    fn first_win_in_row_major_order() {
        // both (0, 2) and (2, 0) win for O
        let b = board("OO./O.X/.XX");
        assert_eq!(select_move(&b), Some(Move::at(0, 2)));
    }

    #[test]
    fn first_block_in_row_major_order() {
        // X threatens (0, 2) and (2, 0), only one can be blocked
        let b = board("XX./X../..O");
        let decision = Selector::new(b).select().unwrap();
        assert_eq!(decision.mv, Move::at(0, 2));
        assert_eq!(decision.tactic, Tactic::Block);
    }

    #[test]
    fn corner_opening_answered_with_center() {
        assert_eq!(select_move(&board("X../.../...")), Some(Move::at(1, 1)));
        assert_eq!(select_move(&board(".../.../..X")), Some(Move::at(1, 1)));
    }

    #[test]
    fn center_opening_answered_with_corner() {
        let decision = Selector::new(board(".../.X./...")).select().unwrap();
        assert_eq!(decision.mv, Move::at(0, 0));
        assert_eq!(decision.tactic, Tactic::Search { score: DRAW_SCORE });
    }

    #[test]
    fn terminal_boards_have_no_move() {
        assert_eq!(select_move(&board("XOX/XOO/OXX")), None);
        assert_eq!(select_move(&board("XXX/OO./...")), None);
        assert_eq!(select_move(&board("OOO/XX./X..")), None);
    }

    #[test]
    fn early_exit_matches_exhaustive_search() {
        let positions = [
            ".../.../...",
            "X../.../...",
            ".X./.../...",
            ".../.X./...",
            "X../.O./..X",
            "OX./.../..X",
            "X.X/.O./...",
            "XO./.X./..O",
        ];
        for notation in positions.iter() {
            let b = board(notation);
            let early = Selector::new(b).search_move(true);
            let full = Selector::new(b).search_exhaustive();
            assert_eq!(early, full, "{}", notation);
        }
    }

    #[test]
    fn does_not_mutate_input() {
        let b = board("X../.O./..X");
        let copy = b;
        let mut selector = Selector::new(b);
        selector.select();
        assert_eq!(*selector, copy);
        assert_eq!(b, copy);
    }
}
