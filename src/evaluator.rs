//! Static scoring of a position from one player's point of view

use crate::{
    grid::{Cell, Grid, Mark},
    CONNECT, HEIGHT, WIDTH,
};

/// Score of a window holding four of the scoring player's pieces
pub const FOUR_SCORE: i32 = 100_000;
pub const OWN_THREE_SCORE: i32 = 500;
pub const OWN_TWO_SCORE: i32 = 50;
// opponent threats must stay slightly cheaper than our own
pub const OPPONENT_THREE_SCORE: i32 = -450;
pub const OPPONENT_TWO_SCORE: i32 = -40;
/// Bonus for each of the scoring player's pieces in the center column
pub const CENTER_PIECE_SCORE: i32 = 7;

/// Scores a single window of four cells
pub fn score_window(window: &[Cell; CONNECT], mark: Mark) -> i32 {
    let mut own = 0;
    let mut opponent = 0;
    let mut empty = 0;
    for cell in window.iter() {
        match cell {
            Cell::Empty => empty += 1,
            Cell::Taken(m) if *m == mark => own += 1,
            Cell::Taken(_) => opponent += 1,
        }
    }

    match (own, opponent, empty) {
        (4, _, _) => FOUR_SCORE,
        (3, _, 1) => OWN_THREE_SCORE,
        (2, _, 2) => OWN_TWO_SCORE,
        (_, 3, 1) => OPPONENT_THREE_SCORE,
        (_, 2, 2) => OPPONENT_TWO_SCORE,
        _ => 0,
    }
}

/// Heuristic value of `grid` for `mark`
///
/// Every horizontal, vertical and diagonal window of four is scored once with
/// [`score_window`], and each of `mark`'s pieces in the center column adds
/// [`CENTER_PIECE_SCORE`]. Higher is better for `mark`.
pub fn score_position(grid: &Grid, mark: Mark) -> i32 {
    let center = WIDTH / 2;
    let center_pieces = (0..HEIGHT)
        .filter(|&row| grid.cell(row, center) == Cell::Taken(mark))
        .count() as i32;
    let mut score = center_pieces * CENTER_PIECE_SCORE;

    // (row step, column step, first row, last row exclusive, first column, last column exclusive)
    let axes = [
        (0, 1, 0, HEIGHT, 0, WIDTH - (CONNECT - 1)),
        (1, 0, 0, HEIGHT - (CONNECT - 1), 0, WIDTH),
        (1, 1, 0, HEIGHT - (CONNECT - 1), 0, WIDTH - (CONNECT - 1)),
        (-1, 1, CONNECT - 1, HEIGHT, 0, WIDTH - (CONNECT - 1)),
    ];

    for &(dr, dc, row_start, row_end, column_start, column_end) in axes.iter() {
        for row in row_start..row_end {
            for column in column_start..column_end {
                let mut window = [Cell::Empty; CONNECT];
                for (k, cell) in window.iter_mut().enumerate() {
                    let r = (row as isize + dr * k as isize) as usize;
                    let c = (column as isize + dc * k as isize) as usize;
                    *cell = grid.cell(r, c);
                }
                score += score_window(&window, mark);
            }
        }
    }

    score
}
