#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::board::ALL_MOVES;
    use crate::round::{respond, Starter};
    use crate::search::{evaluate, DRAW_SCORE, WIN_SCORE};
    use crate::selector::{Selector, Tactic};
    use crate::*;

    // the board in all 8 orientations
    fn symmetries(board: Board) -> Vec<Board> {
        let mut boards = Vec::new();
        let mut current = board;
        for _ in 0..4 {
            boards.push(current);
            boards.push(current.mirrored());
            current = current.rotated();
        }
        boards
    }

    #[test]
    pub fn empty_board() -> Result<()> {
        let board = Board::from_rows(&[["", "", ""], ["", "", ""], ["", "", ""]])?;
        assert_eq!(select_move(&board), Some(Move::new(1, 1)?));
        assert_eq!(detect_outcome(&board), Outcome::InProgress);
        assert!(!is_board_full(&board));
        Ok(())
    }

    #[test]
    pub fn block_example() -> Result<()> {
        let board = Board::from_rows(&[["X", "X", ""], ["", "", ""], ["", "", ""]])?;
        assert_eq!(select_move(&board), Some(Move::new(0, 2)?));
        Ok(())
    }

    #[test]
    pub fn immediate_win_over_block() -> Result<()> {
        // O wins at once on (0, 2) and ignores the X threat on (2, 1)
        let board: Board = "OO./..X/X.X".parse()?;
        let decision = Selector::new(board)
            .select()
            .ok_or_else(|| anyhow::anyhow!("no move for {}", board))?;
        assert_eq!(decision.tactic, Tactic::Win);
        assert_eq!(decision.mv, Move::new(0, 2)?);
        Ok(())
    }

    #[test]
    pub fn optimal_play_draws() -> Result<()> {
        let mut board = Board::new();
        let mut mark = Mark::Human;
        // both sides use the engine's policy from the human's side too
        while !detect_outcome(&board).is_terminal() {
            let mv = match mark {
                Mark::Ai => select_move(&board),
                Mark::Human => select_move(&swap_marks(board)),
            }
            .ok_or_else(|| anyhow::anyhow!("no move for {}", board))?;
            board = board.with_move(mv, mark)?;
            mark = mark.opponent();
        }
        assert_eq!(detect_outcome(&board), Outcome::Draw);
        Ok(())
    }

    fn swap_marks(board: Board) -> Board {
        let mut swapped = Board::new();
        for mv in ALL_MOVES.iter() {
            if let Some(mark) = board.get(*mv).mark() {
                swapped.place(*mv, mark.opponent());
            }
        }
        swapped
    }

    #[test]
    pub fn scores_are_symmetric() -> Result<()> {
        let positions = [
            ".../.../...",
            "X../.../...",
            ".X./.../...",
            "XO./.../...",
            "OX./.O./..X",
            "X../.O./..X",
            "XX./.O./...",
        ];
        for notation in positions.iter() {
            let board: Board = notation.parse()?;
            for maximizing in [true, false].iter() {
                let score = evaluate(&board, *maximizing);
                for symmetric in symmetries(board) {
                    assert_eq!(evaluate(&symmetric, *maximizing), score, "{}", symmetric);
                }
            }
        }
        assert_eq!(evaluate(&Board::new(), false), DRAW_SCORE);
        Ok(())
    }

    #[test]
    pub fn forks_are_found_by_search() -> Result<()> {
        let board: Board = "OX./.O./..X".parse()?;
        let decision = Selector::new(board)
            .select()
            .ok_or_else(|| anyhow::anyhow!("no move for {}", board))?;
        assert_eq!(decision.tactic, Tactic::Search { score: WIN_SCORE });
        assert_eq!(decision.mv, Move::new(2, 0)?);

        // X blocks the column, O completes the diagonal
        let board = board
            .with_move(decision.mv, Mark::Ai)?
            .with_move(Move::new(1, 0)?, Mark::Human)?;
        let reply = respond(&board);
        assert_eq!(reply.ai_move, Some(Move::new(0, 2)?));
        assert_eq!(reply.outcome.winner(), Some(Mark::Ai));
        Ok(())
    }

    #[test]
    pub fn caller_board_unchanged() -> Result<()> {
        let positions = ["X../.../...", "X.X/.O./...", "XO./.X./..O", "XOX/.O./.X."];
        for notation in positions.iter() {
            let board: Board = notation.parse()?;
            let before = board;
            let mv = select_move(&board);
            assert_eq!(board, before);

            // applying the move is the only visible difference
            if let Some(mv) = mv {
                let after = board.with_move(mv, Mark::Ai)?;
                let differing = ALL_MOVES
                    .iter()
                    .filter(|&&cell| after.get(cell) != before.get(cell))
                    .count();
                assert_eq!(differing, 1);
            }
        }
        Ok(())
    }

    #[test]
    pub fn ai_first_round() -> Result<()> {
        let reply = round::new_round(Starter::Ai);
        assert_eq!(reply.ai_move, Some(Move::new(1, 1)?));

        // human takes a corner, engine answers with a corner
        let board = reply.board.with_move(Move::new(0, 0)?, Mark::Human)?;
        let reply = respond(&board);
        assert_eq!(reply.ai_move, Some(Move::new(0, 2)?));
        assert_eq!(reply.outcome, Outcome::InProgress);
        Ok(())
    }

    #[test]
    pub fn invalid_input_rejected() -> Result<()> {
        assert!(Board::from_rows(&[["X", "X"], ["", ""]]).is_err());
        assert!("XX./...".parse::<Board>().is_err());
        assert!(Move::new(1, 3).is_err());
        Ok(())
    }
}
