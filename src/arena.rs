//! Bot-versus-bot matches, played in parallel

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use std::sync::mpsc::channel;
use std::thread;
use std::time::Instant;

use crate::{
    config::ArenaArgs,
    game::{Game, GameState},
    grid::Mark,
    policy::{Bot, Policy},
};

/// Tally of a match between two policies
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct ArenaResult {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
}

impl ArenaResult {
    pub fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.draws
    }

    fn merge(self, other: Self) -> Self {
        Self {
            first_wins: self.first_wins + other.first_wins,
            second_wins: self.second_wins + other.second_wins,
            draws: self.draws + other.draws,
        }
    }
}

/// Plays one game to the end, `a` moving first as player A
pub fn play_game(a: &mut Bot, b: &mut Bot) -> Game {
    let mut game = Game::new();
    while game.state() == GameState::Playing {
        let bot = match game.to_move() {
            Mark::A => &mut *a,
            Mark::B => &mut *b,
        };
        match bot.choose_move(game.grid(), game.to_move()) {
            Some(column) => {
                // bots only ever pick legal columns
                if game.play_checked(column).is_err() {
                    game.concede_draw();
                }
            }
            None => game.concede_draw(),
        }
    }
    game
}

// game `index` is seeded from the base seed and the first bot moves first in even games
fn play_match_game(args: &ArenaArgs, index: usize) -> ArenaResult {
    let seed = args.seed.wrapping_add(2 * index as u64);
    let mut first = Bot::seeded(args.first, args.depth, seed);
    let mut second = Bot::seeded(args.second, args.depth, seed.wrapping_add(1));
    let first_is_a = index % 2 == 0;

    let game = if first_is_a {
        play_game(&mut first, &mut second)
    } else {
        play_game(&mut second, &mut first)
    };

    let mut result = ArenaResult::default();
    match game.state() {
        GameState::Won(mark) if (mark == Mark::A) == first_is_a => result.first_wins += 1,
        GameState::Won(_) => result.second_wins += 1,
        _ => result.draws += 1,
    }
    result
}

/// Plays `args.games` games between `args.first` and `args.second`
pub fn run_arena(args: &ArenaArgs, show_progress: bool) -> ArenaResult {
    let start = Instant::now();
    info!(
        first = args.first.name(),
        second = args.second.name(),
        games = args.games,
        depth = args.depth,
        "arena started"
    );

    let progress = if show_progress {
        ProgressBar::new(args.games as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let (tx, rx) = channel();
    let mut result = ArenaResult::default();
    thread::scope(|scope| {
        scope.spawn(move || {
            (0..args.games)
                .into_par_iter()
                .for_each_with(tx, |tx, index| {
                    // the receiver lives until every game has been reported
                    let _ = tx.send(play_match_game(args, index));
                });
        });

        for game in rx.iter() {
            result = result.merge(game);
            progress.inc(1);
        }
    });

    progress.finish();
    info!(
        first_wins = result.first_wins,
        second_wins = result.second_wins,
        draws = result.draws,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "arena finished"
    );
    result
}

/// One line summary of a finished match
pub fn summary(first: Policy, second: Policy, result: &ArenaResult) -> String {
    format!(
        "{} won {}, {} won {}, {} drawn out of {} games",
        first.name(),
        result.first_wins,
        second.name(),
        result.second_wins,
        result.draws,
        result.games()
    )
}
