//! Parallel evaluation of the candidate moves at the root of the search

use tracing::{debug, warn};

use std::thread;

use crate::{
    grid::{Grid, Mark},
    search::*,
    WIDTH,
};

/// The result of searching one root column
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchOutcome {
    pub column: usize,
    pub score: i32,
    pub legal: bool,
}

/// Searches the move `own_mark` would make in `column`
///
/// An immediate win skips the search. Otherwise the opponent replies in a
/// minimax search of `depth - 1` plies with a fresh window, so no pruning
/// information leaks between root columns.
pub fn evaluate_root(grid: &Grid, column: usize, own_mark: Mark, depth: u32) -> SearchOutcome {
    let mut next = *grid;
    let row = match next.drop(column, own_mark) {
        Ok(row) => row,
        Err(_) => {
            return SearchOutcome {
                column,
                score: ALPHA_INIT,
                legal: false,
            }
        }
    };

    let score = if next.is_winning_move(row, column, own_mark) {
        WIN_SCORE + depth as i32
    } else {
        minimax(
            &next,
            depth.saturating_sub(1),
            false,
            own_mark,
            ALPHA_INIT,
            BETA_INIT,
        )
    };

    SearchOutcome {
        column,
        score,
        legal: true,
    }
}

/// Picks the best column for `own_mark` with a `depth` ply search
///
/// Each legal column is searched on its own scoped worker thread. Once every
/// worker has been joined, columns are scanned from the center outwards and
/// the first one with a strictly higher score wins, so equal scores favour
/// central columns and worker scheduling never changes the result.
///
/// Returns `None` only when the grid is full.
pub fn choose_best_column(grid: &Grid, own_mark: Mark, depth: u32) -> Option<usize> {
    let legal = grid.legal_columns();
    if legal.is_empty() {
        return None;
    }

    let mut joined = Vec::with_capacity(legal.len());
    let mut pending = Vec::new();

    thread::scope(|scope| {
        let mut workers = Vec::with_capacity(legal.len());
        for &column in legal.iter() {
            let spawned = thread::Builder::new()
                .name(format!("search-column-{}", column + 1))
                .spawn_scoped(scope, move || evaluate_root(grid, column, own_mark, depth));
            match spawned {
                Ok(handle) => workers.push((column, handle)),
                Err(err) => {
                    warn!(column, %err, "failed to spawn search worker, evaluating inline");
                    pending.push(column);
                }
            }
        }

        for (column, handle) in workers {
            joined.push((column, handle.join()));
        }
    });

    let outcomes = collect_outcomes(grid, own_mark, depth, joined, &pending);
    let best = pick_column(grid, &outcomes);
    debug!(?best, mark = %own_mark, depth, "root search finished");
    best
}

/// Gathers the joined worker results, searching the columns in `pending`
/// (workers that never started) on the calling thread
///
/// A worker that panicked leaves its column without an outcome.
fn collect_outcomes(
    grid: &Grid,
    own_mark: Mark,
    depth: u32,
    joined: Vec<(usize, thread::Result<SearchOutcome>)>,
    pending: &[usize],
) -> [Option<SearchOutcome>; WIDTH] {
    let mut outcomes = [None; WIDTH];
    for (column, result) in joined {
        match result {
            Ok(outcome) => outcomes[column] = Some(outcome),
            Err(_) => warn!(column, "search worker panicked, column skipped"),
        }
    }
    for &column in pending {
        outcomes[column] = Some(evaluate_root(grid, column, own_mark, depth));
    }

    for outcome in outcomes.iter().flatten() {
        debug!(
            column = outcome.column,
            score = outcome.score,
            forced = is_forced(outcome.score),
            "root column searched"
        );
    }
    outcomes
}

/// The reduced best column, or the most central playable column when no
/// outcome is available, so only a full grid gives `None`
fn pick_column(grid: &Grid, outcomes: &[Option<SearchOutcome>; WIDTH]) -> Option<usize> {
    reduce(outcomes).or_else(|| {
        move_order()
            .iter()
            .copied()
            .find(|&column| grid.playable(column))
    })
}

/// Highest scoring legal column, ties going to the column nearest the center
fn reduce(outcomes: &[Option<SearchOutcome>; WIDTH]) -> Option<usize> {
    let mut best: Option<SearchOutcome> = None;
    for &column in move_order().iter() {
        if let Some(outcome) = outcomes[column].filter(|o| o.legal) {
            if best.map_or(true, |b| outcome.score > b.score) {
                best = Some(outcome);
            }
        }
    }
    best.map(|outcome| outcome.column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(column: usize, score: i32) -> Option<SearchOutcome> {
        Some(SearchOutcome {
            column,
            score,
            legal: true,
        })
    }

    #[test]
    fn ties_go_to_the_center() {
        let mut outcomes = [None; WIDTH];
        for column in 0..WIDTH {
            outcomes[column] = outcome(column, 10);
        }
        assert_eq!(reduce(&outcomes), Some(3));

        outcomes[3] = outcome(3, 5);
        assert_eq!(reduce(&outcomes), Some(2));

        outcomes[2] = None;
        assert_eq!(reduce(&outcomes), Some(4));
    }

    #[test]
    fn highest_score_beats_centrality() {
        let mut outcomes = [None; WIDTH];
        for column in 0..WIDTH {
            outcomes[column] = outcome(column, 0);
        }
        outcomes[6] = outcome(6, 1);
        assert_eq!(reduce(&outcomes), Some(6));
    }

    #[test]
    fn illegal_outcomes_are_ignored() {
        let mut outcomes = [None; WIDTH];
        outcomes[3] = Some(SearchOutcome {
            column: 3,
            score: i32::MAX,
            legal: false,
        });
        outcomes[0] = outcome(0, -5);
        assert_eq!(reduce(&outcomes), Some(0));
        assert_eq!(reduce(&[None; WIDTH]), None);
    }

    #[test]
    fn evaluate_root_flags_full_columns() {
        let grid = Grid::from_moves("121212").unwrap();
        let mut grid = grid;
        for _ in 0..3 {
            grid.drop(0, Mark::B).unwrap();
        }
        let result = evaluate_root(&grid, 0, Mark::A, 3);
        assert!(!result.legal);

        let result = evaluate_root(&grid, 3, Mark::A, 3);
        assert!(result.legal);
        assert_eq!(result.column, 3);
    }

    #[test]
    fn immediate_win_takes_the_sentinel() {
        let mut grid = Grid::new();
        for column in 0..3 {
            grid.drop(column, Mark::B).unwrap();
        }
        let result = evaluate_root(&grid, 3, Mark::B, 6);
        assert_eq!(result.score, WIN_SCORE + 6);
        assert_eq!(choose_best_column(&grid, Mark::B, 6), Some(3));
    }

    #[test]
    fn unstarted_workers_are_searched_inline() {
        let mut grid = Grid::new();
        for column in 0..3 {
            grid.drop(column, Mark::A).unwrap();
        }
        let outcomes = collect_outcomes(&grid, Mark::A, 2, vec![], &[3, 6]);
        assert_eq!(outcomes[3], Some(evaluate_root(&grid, 3, Mark::A, 2)));
        assert!(outcomes[6].is_some());
        assert!(outcomes[0].is_none());
        assert_eq!(pick_column(&grid, &outcomes), Some(3));
    }

    #[test]
    fn panicked_workers_are_skipped() {
        let grid = Grid::new();
        let joined = vec![
            (0, Ok(evaluate_root(&grid, 0, Mark::B, 2))),
            (3, Err(Box::new("worker failed") as Box<dyn std::any::Any + Send>)),
        ];
        let outcomes = collect_outcomes(&grid, Mark::B, 2, joined, &[]);
        assert!(outcomes[3].is_none());
        assert_eq!(pick_column(&grid, &outcomes), Some(0));
    }

    #[test]
    fn no_outcomes_fall_back_to_the_center() {
        let mut grid = Grid::new();
        for _ in 0..crate::HEIGHT {
            grid.drop(3, Mark::A).unwrap();
        }
        // every worker lost, columns are still open
        let lost: Box<dyn std::any::Any + Send> = Box::new(());
        let outcomes = collect_outcomes(&grid, Mark::A, 2, vec![(2, Err(lost))], &[]);
        assert_eq!(pick_column(&grid, &outcomes), Some(2));

        let mut full = grid;
        for column in [0, 1, 2, 4, 5, 6] {
            for _ in 0..crate::HEIGHT {
                full.drop(column, Mark::B).unwrap();
            }
        }
        assert_eq!(pick_column(&full, &[None; WIDTH]), None);
    }
}
