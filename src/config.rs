//! Command line configuration

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{error::ConfigError, policy::{Policy, DEFAULT_DEPTH}};

/// Which seats are taken by the computer
#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum Mode {
    /// Player A against a bot that plays at random
    Easy,
    /// Player A against the one-move lookahead bot
    Medium,
    /// Player A against the minimax bot
    Hard,
    /// Two humans sharing the keyboard
    TwoPlayer,
}

impl Mode {
    /// The policy playing B, if B is a bot
    pub fn bot_policy(self) -> Option<Policy> {
        match self {
            Mode::Easy => Some(Policy::Random),
            Mode::Medium => Some(Policy::Greedy),
            Mode::Hard => Some(Policy::Minimax),
            Mode::TwoPlayer => None,
        }
    }

    pub fn bot_name(self) -> &'static str {
        match self {
            Mode::Easy => "EasyBot",
            Mode::Medium => "MediumBot",
            Mode::Hard => "HardBot",
            Mode::TwoPlayer => "",
        }
    }
}

/// Play Connect 4 at the console
#[derive(Parser, Debug)]
#[command(name = "connect_four", version, about)]
pub struct Cli {
    /// Print the board as plain text instead of coloured discs
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game (the default)
    Play(PlayArgs),
    /// Pit two bots against each other over many games
    Arena(ArenaArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Game mode, asked for interactively when omitted
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Search depth of the hard bot in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Seed for the random bot, taken from the OS when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            mode: None,
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

impl PlayArgs {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth(self.depth));
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ArenaArgs {
    /// Policy of the first bot
    #[arg(long, value_enum, default_value_t = Policy::Minimax)]
    pub first: Policy,

    /// Policy of the second bot
    #[arg(long, value_enum, default_value_t = Policy::Greedy)]
    pub second: Policy,

    /// Number of games, the bots take turns moving first
    #[arg(long, default_value_t = 100)]
    pub games: usize,

    /// Search depth of minimax bots in plies
    #[arg(long, default_value_t = 4)]
    pub depth: u32,

    /// Base seed, each game derives its own from it
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl ArenaArgs {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth(self.depth));
        }
        if self.games == 0 {
            return Err(ConfigError::NoGames);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_is_the_default() {
        let cli = Cli::try_parse_from(["connect_four"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.plain);
    }

    #[test]
    fn play_flags() {
        let cli = Cli::try_parse_from([
            "connect_four",
            "play",
            "--mode",
            "two-player",
            "--seed",
            "9",
            "--plain",
        ])
        .unwrap();
        assert!(cli.plain);
        match cli.command {
            Some(Command::Play(args)) => {
                assert_eq!(args.mode, Some(Mode::TwoPlayer));
                assert_eq!(args.depth, DEFAULT_DEPTH);
                assert_eq!(args.seed, Some(9));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn arena_defaults_and_validation() {
        let cli = Cli::try_parse_from(["connect_four", "arena", "--first", "random"]).unwrap();
        let args = match cli.command {
            Some(Command::Arena(args)) => args,
            other => panic!("unexpected command {:?}", other),
        };
        assert_eq!(args.first, Policy::Random);
        assert_eq!(args.second, Policy::Greedy);
        assert_eq!(args.games, 100);
        assert!(args.validate().is_ok());

        let zero = ArenaArgs { games: 0, ..args.clone() };
        assert_eq!(zero.validate(), Err(ConfigError::NoGames));
        let shallow = ArenaArgs { depth: 0, ..args };
        assert_eq!(shallow.validate(), Err(ConfigError::ZeroDepth(0)));
    }

    #[test]
    fn zero_depth_is_rejected() {
        let args = PlayArgs { depth: 0, ..PlayArgs::default() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn modes_map_to_bots() {
        assert_eq!(Mode::Hard.bot_policy(), Some(Policy::Minimax));
        assert_eq!(Mode::TwoPlayer.bot_policy(), None);
    }
}
