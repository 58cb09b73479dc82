//! Terminal rendering of the grid

use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::Write;

use crate::{
    grid::{Cell, Grid, Mark},
    HEIGHT, WIDTH,
};

fn cell_color(cell: Cell) -> Color {
    match cell {
        Cell::Taken(Mark::A) => Color::Red,
        Cell::Taken(Mark::B) => Color::Yellow,
        Cell::Empty => Color::DarkBlue,
    }
}

/// Draws `grid` as coloured discs on a blue board, column labels on top
pub fn draw<W: Write>(out: &mut W, grid: &Grid) -> Result<()> {
    let labels: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    out.queue(PrintStyledContent(style(format!("\n{}\n", labels))))?;

    for row in (0..HEIGHT).rev() {
        for column in 0..WIDTH {
            out.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(cell_color(grid.cell(row, column))),
            ))?;
        }
        out.queue(PrintStyledContent(style("\n")))?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the board either plain or coloured
pub fn show<W: Write>(out: &mut W, grid: &Grid, plain: bool) -> Result<()> {
    if plain {
        write!(out, "{}", grid)?;
        out.flush()?;
        Ok(())
    } else {
        draw(out, grid)
    }
}
