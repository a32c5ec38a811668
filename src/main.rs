use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};

use tictactoe_ai::census::Census;
use tictactoe_ai::round::{new_round, respond, Starter};
use tictactoe_ai::search::{DRAW_SCORE, WIN_SCORE};
use tictactoe_ai::selector::{Selector, Tactic};
use tictactoe_ai::*;

mod cli;
use cli::{Cli, Command};

mod display;
use display::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Play { ai_first, delay_ms } => play(ai_first, delay_ms),
        Command::Move { board } => show_move(&board),
        Command::Verify { quiet } => verify(quiet),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn play(ai_first: bool, delay_ms: u64) -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Tic-Tac-Toe\n");
    println!("You are X, type the number of a cell to place your mark.");

    let first = if ai_first { Starter::Ai } else { Starter::Human };
    let mut reply = new_round(first);
    if let Some(mv) = reply.ai_move {
        println!("AI plays {}", cell_number(mv));
    }

    // game loop
    loop {
        draw(&reply.board, &reply.outcome)?;

        match reply.outcome {
            Outcome::InProgress => {
                print!("Move input > ");
                stdout().flush()?;
                let mut input_str = String::new();
                if stdin.read_line(&mut input_str)? == 0 {
                    // end of input
                    return Ok(());
                }

                let mv = match input_str.trim().parse::<usize>() {
                    Ok(number @ 1..=CELLS) => Move::from_index(number - 1)?,
                    _ => {
                        println!("Invalid cell: {}, cells are numbered 1 to {}", input_str.trim(), CELLS);
                        continue;
                    }
                };
                let board = match reply.board.with_move(mv, Mark::Human) {
                    Ok(board) => board,
                    Err(err) => {
                        println!("{}", err);
                        // try the move again
                        continue;
                    }
                };

                if !detect_outcome(&board).is_terminal() {
                    println!("AI is thinking...");
                    if delay_ms > 0 {
                        std::thread::sleep(std::time::Duration::from_millis(delay_ms));
                    }
                }
                reply = respond(&board);
                if let Some(mv) = reply.ai_move {
                    println!("AI plays {}", cell_number(mv));
                }
            }

            // end states
            Outcome::Win {
                mark: Mark::Human, ..
            } => {
                println!("You win!");
                break;
            }
            Outcome::Win { mark: Mark::Ai, .. } => {
                println!("AI wins!");
                break;
            }
            Outcome::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}

fn show_move(notation: &str) -> Result<()> {
    let board: Board = notation.parse()?;
    draw(&board, &detect_outcome(&board))?;

    match detect_outcome(&board) {
        Outcome::Win { mark, line } => {
            let cells: Vec<String> = line.iter().map(|mv| mv.to_string()).collect();
            println!("{} has won along {}", mark, cells.join(" "));
            return Ok(());
        }
        Outcome::Draw => {
            println!("The game is drawn");
            return Ok(());
        }
        Outcome::InProgress => {}
    }

    let decision = Selector::new(board)
        .select()
        .ok_or_else(|| anyhow!("no move available for {}", board))?;

    match decision.tactic {
        Tactic::Win => println!("Winning move"),
        Tactic::Block => println!("Blocking move"),
        Tactic::Search { score } => {
            let verdict = match score {
                WIN_SCORE => "O can force a win",
                DRAW_SCORE => "best play draws",
                _ => "X can force a win",
            };
            println!(
                "Searched {} positions, {}",
                decision.node_count, verdict
            );
        }
    }
    println!("Best move: {} (cell {})", decision.mv, cell_number(decision.mv));
    Ok(())
}

fn verify(quiet: bool) -> Result<()> {
    let report = Census::run(!quiet);

    println!(
        "Games: {}, AI wins: {}, human wins: {}, draws: {}, positions reached: {}",
        report.games, report.ai_wins, report.human_wins, report.draws, report.positions
    );
    if !report.unbeaten() {
        return Err(anyhow!("the AI lost {} games", report.human_wins));
    }
    println!("The AI never loses");
    Ok(())
}
