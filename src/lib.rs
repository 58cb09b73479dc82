//! A Connect 4 engine with three computer difficulty tiers
//!
//! The engine works on a plain [`Grid`](grid::Grid) value and answers one
//! question: which column should the given mark play next? The easy tier
//! picks at random, the medium tier looks one move ahead with a safety
//! filter, and the hard tier runs a depth-bounded minimax search with
//! alpha-beta pruning, one worker thread per candidate column.
//!
//! # Basic Usage
//!
//! ```
//! use connect_four::{grid::{Grid, Mark}, policy::{choose_move, Policy}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player A has three in a row along the bottom
//! let grid = Grid::from_moves("11223")?;
//! let column = choose_move(&grid, Mark::A, Policy::Minimax, 4);
//!
//! assert_eq!(column, Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod grid;

pub mod evaluator;

pub mod search;

pub mod dispatch;

pub mod policy;

pub mod game;

pub mod input;

pub mod display;

pub mod arena;

pub mod config;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of identical marks in a line needed to win
pub const CONNECT: usize = 4;

// a winning window must fit along every axis
const_assert!(WIDTH >= CONNECT && HEIGHT >= CONNECT);
