use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, BufRead, Write};

use connect_four::{
    arena::{run_arena, summary},
    config::{Cli, Command, Mode, PlayArgs},
    display::show,
    game::{Game, GameState},
    grid::Mark,
    input::{self, parse_column, parse_mode},
    policy::Bot,
    WIDTH,
};

fn main() -> Result<()> {
    // logs go to stderr so they never interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Arena(args)) => {
            args.validate()?;
            let result = run_arena(&args, true);
            println!("{}", summary(args.first, args.second, &result));
            Ok(())
        }
        Some(Command::Play(args)) => play(&args, cli.plain),
        None => play(&PlayArgs::default(), cli.plain),
    }
}

/// Reads one line, `None` on end of input
fn read_line(stdin: &mut impl BufRead) -> Result<Option<String>> {
    let mut buffer = String::new();
    if stdin.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

fn choose_mode(stdin: &mut impl BufRead) -> Result<Option<Mode>> {
    loop {
        println!("Select mode:");
        println!("  1 - Play against Easy Bot (You are Player A)");
        println!("  2 - Play against Medium Bot (You are Player A)");
        println!("  3 - Play against Hard Bot (You are Player A)");
        println!("  4 - Two Player mode (A vs B)");
        print!("Enter 1, 2, 3, or 4: ");
        stdout().flush().expect("failed to flush to stdout!");

        let line = match read_line(stdin)? {
            Some(line) => line,
            None => {
                println!();
                return Ok(None);
            }
        };
        match parse_mode(&line) {
            Some(mode) => return Ok(Some(mode)),
            None => println!("Invalid choice. Please enter 1, 2, 3, or 4.\n"),
        }
    }
}

fn play(args: &PlayArgs, plain: bool) -> Result<()> {
    args.validate()?;
    let stdin = stdin();
    let mut stdin = stdin.lock();

    println!("\n=== Welcome to Connect Four (Console) ===");
    println!(
        "Players: A and B. Enter column 1-{} to drop a checker; 'q' to quit.\n",
        WIDTH
    );

    let mode = match args.mode {
        Some(mode) => mode,
        None => match choose_mode(&mut stdin)? {
            Some(mode) => mode,
            None => {
                println!("\nGoodbye!");
                return Ok(());
            }
        },
    };
    println!();

    let mut bot = mode.bot_policy().map(|policy| match args.seed {
        Some(seed) => Bot::seeded(policy, args.depth, seed),
        None => Bot::new(policy, args.depth),
    });

    let mut game = Game::new();
    let mut out = stdout();

    // game loop
    loop {
        show(&mut out, game.grid(), plain)?;

        match game.state() {
            GameState::Playing => {
                let mark = game.to_move();

                let column = match bot.as_mut().filter(|_| mark == Mark::B) {
                    // bot player
                    Some(bot) => match bot.choose_move(game.grid(), mark) {
                        Some(column) => {
                            println!(
                                "{} (Player {}) chooses column {}",
                                mode.bot_name(),
                                mark,
                                column + 1
                            );
                            column
                        }
                        None => {
                            game.concede_draw();
                            continue;
                        }
                    },

                    // human player
                    None => {
                        print!("Player {} \u{2192} Enter column (1-{}) or 'q' to quit: ", mark, WIDTH);
                        stdout().flush().expect("Failed to flush to stdout!");

                        let line = match read_line(&mut stdin)? {
                            Some(line) => line,
                            None => {
                                println!("\nGoodbye!");
                                return Ok(());
                            }
                        };
                        match parse_column(&line) {
                            Ok(input::Command::Column(column)) => column,
                            Ok(input::Command::Quit) => {
                                println!("\nGoodbye!");
                                return Ok(());
                            }
                            Err(err) => {
                                println!("{}", err);
                                continue;
                            }
                        }
                    }
                };

                if game.play_checked(column).is_err() {
                    println!("That column is full or invalid. Try another.");
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::Won(mark) => {
                println!("Player {} WINS!", mark);
                break;
            }
            GameState::Draw => {
                println!("It's a draw. No more moves!");
                break;
            }
        }
    }
    Ok(())
}
