//! Move selection for the three computer difficulty tiers

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::trace;

use crate::{
    dispatch::choose_best_column,
    evaluator::score_position,
    grid::{Grid, Mark},
    WIDTH,
};

/// Search depth used by the hard tier
pub const DEFAULT_DEPTH: u32 = 6;

/// A computer player's move selection strategy
#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum Policy {
    /// Any legal column, uniformly at random
    Random,
    /// One move of lookahead: win, block, avoid handing over a win, then score
    Greedy,
    /// Full minimax search at a fixed depth
    Minimax,
}

impl Policy {
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Random => "random",
            Policy::Greedy => "greedy",
            Policy::Minimax => "minimax",
        }
    }
}

/// Chooses a column for `mark`, drawing randomness from the thread RNG
///
/// `depth` is only used by [`Policy::Minimax`]. Returns `None` when the grid
/// is full.
pub fn choose_move(grid: &Grid, mark: Mark, policy: Policy, depth: u32) -> Option<usize> {
    choose_move_with_rng(grid, mark, policy, depth, &mut rand::rng())
}

/// Same as [`choose_move`] with an explicit random source
pub fn choose_move_with_rng<R: Rng + ?Sized>(
    grid: &Grid,
    mark: Mark,
    policy: Policy,
    depth: u32,
    rng: &mut R,
) -> Option<usize> {
    let column = match policy {
        Policy::Random => random_move(grid, rng),
        Policy::Greedy => greedy_move(grid, mark),
        Policy::Minimax => choose_best_column(grid, mark, depth),
    };
    trace!(policy = policy.name(), %mark, ?column, "move chosen");
    column
}

/// A uniformly random legal column
pub fn random_move<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<usize> {
    let legal = grid.legal_columns();
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.random_range(0..legal.len())])
}

/// Whether `mark` completes a line by dropping into `column`
fn wins_with(grid: &Grid, column: usize, mark: Mark) -> bool {
    let mut next = *grid;
    match next.drop(column, mark) {
        Ok(row) => next.is_winning_move(row, column, mark),
        Err(_) => false,
    }
}

/// Whether the opponent can win straight after `mark` plays `column`
fn hands_over_win(grid: &Grid, column: usize, mark: Mark) -> bool {
    let mut next = *grid;
    if next.drop(column, mark).is_err() {
        return false;
    }
    let opponent = mark.opponent();
    next.legal_columns()
        .into_iter()
        .any(|reply| wins_with(&next, reply, opponent))
}

/// One-ply heuristic move with a safety filter
///
/// In order: play an immediate win, block the opponent's immediate win, then
/// among the columns that don't let the opponent win next turn pick the best
/// [`score_position`] after the move, less one point per column of distance
/// from the center. If every column hands the opponent a win, the safety
/// filter is dropped and all legal columns are scored. Ties keep the leftmost
/// column.
pub fn greedy_move(grid: &Grid, mark: Mark) -> Option<usize> {
    let legal = grid.legal_columns();
    if legal.is_empty() {
        return None;
    }

    if let Some(&column) = legal.iter().find(|&&c| wins_with(grid, c, mark)) {
        return Some(column);
    }

    let opponent = mark.opponent();
    if let Some(&column) = legal.iter().find(|&&c| wins_with(grid, c, opponent)) {
        return Some(column);
    }

    let safe: Vec<usize> = legal
        .iter()
        .copied()
        .filter(|&c| !hands_over_win(grid, c, mark))
        .collect();
    let pool = if safe.is_empty() { &legal } else { &safe };

    let center = WIDTH / 2;
    let mut best_column = pool[0];
    let mut best_score = i32::MIN;
    for &column in pool.iter() {
        let mut next = *grid;
        if next.drop(column, mark).is_err() {
            continue;
        }
        let score = score_position(&next, mark) - (column as i32 - center as i32).abs();
        if score > best_score {
            best_score = score;
            best_column = column;
        }
    }
    Some(best_column)
}

/// A computer player: a policy, its search depth and its own random source
pub struct Bot {
    policy: Policy,
    depth: u32,
    rng: StdRng,
}

impl Bot {
    pub fn new(policy: Policy, depth: u32) -> Self {
        Self {
            policy,
            depth,
            rng: StdRng::from_os_rng(),
        }
    }

    /// A bot whose random choices are reproducible
    pub fn seeded(policy: Policy, depth: u32, seed: u64) -> Self {
        Self {
            policy,
            depth,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn choose_move(&mut self, grid: &Grid, mark: Mark) -> Option<usize> {
        choose_move_with_rng(grid, mark, self.policy, self.depth, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_is_legal_and_reproducible() {
        let mut grid = Grid::new();
        for _ in 0..6 {
            grid.drop(2, Mark::A).unwrap();
        }
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let column = random_move(&grid, &mut first);
            assert_eq!(column, random_move(&grid, &mut second));
            let column = column.unwrap();
            assert!(column < WIDTH && column != 2);
        }
    }

    #[test]
    fn random_covers_every_legal_column() {
        let grid = Grid::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; WIDTH];
        for _ in 0..500 {
            seen[random_move(&grid, &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn greedy_prefers_winning_to_blocking() {
        // A threatens column 4 along the bottom, so B has to block there
        let grid = Grid::from_moves("112233").unwrap();
        assert_eq!(greedy_move(&grid, Mark::A), Some(3));
        assert_eq!(greedy_move(&grid, Mark::B), Some(3));
    }

    #[test]
    fn greedy_avoids_handing_over_a_win() {
        // A: (0,0) (0,2); B: (0,1) (1,0) (1,1) (1,2)
        // A in column 4 would let B complete the second row on top of it
        let mut grid = Grid::new();
        grid.drop(0, Mark::A).unwrap();
        grid.drop(1, Mark::B).unwrap();
        grid.drop(2, Mark::A).unwrap();
        for column in 0..3 {
            grid.drop(column, Mark::B).unwrap();
        }
        assert!(hands_over_win(&grid, 3, Mark::A));
        let column = greedy_move(&grid, Mark::A).unwrap();
        assert_ne!(column, 3);
    }

    #[test]
    fn greedy_ignores_safety_when_nothing_is_safe() {
        // columns 1 and 5 are open and either move lets B win on top of it
        let mut grid = Grid::new();
        let layout = [
            // column, marks from the bottom
            (0, "ABBABA"),
            (1, "BBBA"),
            (2, "AAABAB"),
            (3, "ABBAAB"),
            (4, "BAAABB"),
            (5, "ABBA"),
            (6, "ABABAB"),
        ];
        for (column, marks) in layout.iter() {
            for mark in marks.chars() {
                let mark = if mark == 'A' { Mark::A } else { Mark::B };
                grid.drop(*column, mark).unwrap();
            }
        }
        assert_eq!(grid.legal_columns(), vec![1, 5]);
        assert!(hands_over_win(&grid, 1, Mark::A));
        assert!(hands_over_win(&grid, 5, Mark::A));
        // both score the same, the leftmost is kept
        assert_eq!(greedy_move(&grid, Mark::A), Some(1));
    }

    #[test]
    fn bot_forwards_to_its_policy() {
        let grid = Grid::from_moves("11223").unwrap();
        let mut bot = Bot::seeded(Policy::Greedy, 1, 0);
        assert_eq!(bot.policy(), Policy::Greedy);
        assert_eq!(bot.choose_move(&grid, Mark::A), Some(3));
    }
}
