use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use tictactoe_ai::{board::ALL_MOVES, Board, Cell, Move, Outcome, SIZE};

/// The 1-9 cell number shown to the player
pub fn cell_number(mv: Move) -> usize {
    mv.index() + 1
}

/// Draws the board, highlighting the winning line if there is one
pub fn draw(board: &Board, outcome: &Outcome) -> Result<()> {
    let mut stdout = stdout();

    let line = match outcome {
        Outcome::Win { line, .. } => Some(line),
        _ => None,
    };

    stdout.queue(PrintStyledContent(style("\n")))?;
    for mv in ALL_MOVES.iter() {
        let highlighted = line.map_or(false, |line| line.contains(mv));
        let cell = board.get(*mv);

        let (symbol, colour) = match cell {
            Cell::Human => ("X".to_string(), Color::Red),
            Cell::Ai => ("O".to_string(), Color::Yellow),
            // empty cells show the number to type
            Cell::Empty => (cell_number(*mv).to_string(), Color::DarkGrey),
        };
        let mut content = style(format!(" {} ", symbol)).with(colour);
        if !cell.is_empty() {
            content = content.attribute(Attribute::Bold);
        }
        if highlighted {
            content = content.on(Color::DarkGreen);
        }
        stdout.queue(PrintStyledContent(content))?;

        if mv.col() < SIZE - 1 {
            stdout.queue(PrintStyledContent(style("|")))?;
        } else if mv.row() < SIZE - 1 {
            stdout.queue(PrintStyledContent(style("\n---+---+---\n")))?;
        }
    }
    stdout.queue(PrintStyledContent(style("\n\n")))?;
    stdout.flush()?;
    Ok(())
}
