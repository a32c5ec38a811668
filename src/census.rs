//! Exhaustive check of the engine against every human strategy
//!
//! Every game the human could play is played out: at each human turn every
//! empty cell is tried, at each engine turn the engine answers with
//! [`select_move`]. A perfect engine never loses any of them.

use indicatif::*;
use rayon::prelude::*;
use tracing::info;

use std::collections::HashSet;
use std::time::Instant;

use crate::board::{Board, Mark};
use crate::outcome::{detect_outcome, Outcome};
use crate::round::{new_round, Starter};
use crate::selector::select_move;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CensusReport {
    /// Finished games, one per distinct human strategy and starting side
    pub games: usize,
    pub ai_wins: usize,
    pub human_wins: usize,
    pub draws: usize,
    /// Distinct positions reached across all games
    pub positions: usize,
}

impl CensusReport {
    /// True when the engine never lost a game
    pub fn unbeaten(&self) -> bool {
        self.human_wins == 0
    }
}

#[derive(Default)]
struct Tally {
    games: usize,
    ai_wins: usize,
    human_wins: usize,
    draws: usize,
    seen: HashSet<u16>,
}

impl Tally {
    fn merge(mut self, other: Tally) -> Tally {
        self.games += other.games;
        self.ai_wins += other.ai_wins;
        self.human_wins += other.human_wins;
        self.draws += other.draws;
        self.seen.extend(other.seen);
        self
    }

    fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Win {
                mark: Mark::Ai, ..
            } => self.ai_wins += 1,
            Outcome::Win {
                mark: Mark::Human, ..
            } => self.human_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    fn explore(&mut self, board: Board, human_to_move: bool) {
        self.seen.insert(board.key());

        let outcome = detect_outcome(&board);
        if outcome.is_terminal() {
            self.record(outcome);
            return;
        }

        if human_to_move {
            for mv in board.empty_cells() {
                let mut next = board;
                next.place(mv, Mark::Human);
                self.explore(next, false);
            }
        } else if let Some(mv) = select_move(&board) {
            let mut next = board;
            next.place(mv, Mark::Ai);
            self.explore(next, true);
        }
    }
}

/// Plays the engine against every possible human strategy
pub struct Census;

impl Census {
    /// Runs the census, drawing a progress bar on stderr if `progress` is set
    pub fn run(progress: bool) -> CensusReport {
        let start = Instant::now();

        // each root is searched as an independent task
        let mut roots = vec![(new_round(Starter::Ai).board, true)];
        for mv in Board::new().empty_cells() {
            let mut board = Board::new();
            board.place(mv, Mark::Human);
            roots.push((board, false));
        }

        let bar = if progress {
            let bar = ProgressBar::new(roots.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("Playing out games: {bar:40.cyan/blue} {pos}/{len} openings")
                    .progress_chars("█▓▒░  "),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut tally = roots
            .par_iter()
            .map(|&(board, human_to_move)| {
                let mut tally = Tally::default();
                tally.explore(board, human_to_move);
                bar.inc(1);
                tally
            })
            .reduce(Tally::default, Tally::merge);
        bar.finish();

        // the empty board is the root of every human-first game
        tally.seen.insert(Board::new().key());

        let report = CensusReport {
            games: tally.games,
            ai_wins: tally.ai_wins,
            human_wins: tally.human_wins,
            draws: tally.draws,
            positions: tally.seen.len(),
        };
        info!(
            games = report.games,
            ai_wins = report.ai_wins,
            human_wins = report.human_wins,
            draws = report.draws,
            positions = report.positions,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "census complete"
        );
        report
    }
}
