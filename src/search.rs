//! Depth-bounded minimax search with alpha-beta pruning

use crate::{
    evaluator::score_position,
    grid::{Grid, Mark},
    WIDTH,
};

/// Scores at or beyond this magnitude are forced wins or losses
///
/// The remaining search depth is added on top, so a faster win scores higher.
pub const WIN_SCORE: i32 = 1_000_000;

/// Initial lower bound of a fresh search window
pub const ALPHA_INIT: i32 = i32::MIN / 2;
/// Initial upper bound of a fresh search window
pub const BETA_INIT: i32 = i32::MAX / 2;

/// Returns an array ordering the columns from the middle outwards, as
/// the middle columns are often better moves
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        // center, then center - 1, center + 1, center - 2, ...
        move_order[i] = (WIDTH / 2) - (i % 2) * (i / 2 + 1) + (1 - i % 2) * (i / 2);
        i += 1;
    }
    move_order
}

/// Minimax value of `grid` for `own_mark`
///
/// `maximizing` says whose turn it is: `own_mark` when true, the opponent
/// otherwise. `depth` is the number of plies still to be searched and is the
/// only bound on the recursion. A move that wins on the spot ends the branch
/// with `WIN_SCORE + depth` for `own_mark` or `-WIN_SCORE - depth` for the
/// opponent; leaves and full grids fall back to [`score_position`].
pub fn minimax(
    grid: &Grid,
    depth: u32,
    maximizing: bool,
    own_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if depth == 0 || grid.is_full() {
        return score_position(grid, own_mark);
    }

    let mover = if maximizing {
        own_mark
    } else {
        own_mark.opponent()
    };

    let mut best: Option<i32> = None;
    for &column in move_order().iter() {
        let mut next = *grid;
        let row = match next.drop(column, mover) {
            Ok(row) => row,
            Err(_) => continue,
        };

        if next.is_winning_move(row, column, mover) {
            return if maximizing {
                WIN_SCORE + depth as i32
            } else {
                -WIN_SCORE - depth as i32
            };
        }

        let score = minimax(&next, depth - 1, !maximizing, own_mark, alpha, beta);
        if maximizing {
            best = Some(best.map_or(score, |b| b.max(score)));
            alpha = alpha.max(score);
        } else {
            best = Some(best.map_or(score, |b| b.min(score)));
            beta = beta.min(score);
        }
        // the other player will never let the game reach this node
        if beta <= alpha {
            break;
        }
    }

    // no playable column even though the grid is not full
    best.unwrap_or_else(|| score_position(grid, own_mark))
}

/// Whether a score denotes a forced win or loss rather than a heuristic estimate
pub fn is_forced(score: i32) -> bool {
    score.abs() >= WIN_SCORE
}
