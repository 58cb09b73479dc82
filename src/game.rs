use anyhow::{anyhow, Result};

use crate::{
    error::MoveError,
    grid::{Grid, Mark},
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Mark),
    Draw,
}

/// A game in progress: the authoritative grid and whose turn it is
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    to_move: Mark,
    // 1-indexed column digits in the order they were played
    moves: String,
    state: GameState,
}

impl Game {
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            to_move: Mark::A,
            moves: String::new(),
            state: GameState::Playing,
        }
    }

    pub fn from_moves(moves: &str) -> Result<Self> {
        let mut game = Self::new();

        for column_char in moves.chars() {
            match column_char.to_digit(10) {
                Some(column) if column >= 1 => {
                    game.play_checked(column as usize - 1)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(game)
    }

    /// Drops the current player's piece into the 0-indexed `column`
    ///
    /// On success the turn passes to the other player and the new state is
    /// returned. A rejected move leaves the game untouched.
    pub fn play_checked(&mut self, column: usize) -> Result<GameState, MoveError> {
        if self.state != GameState::Playing {
            return Err(MoveError::GameOver);
        }

        let row = self.grid.drop(column, self.to_move)?;
        self.moves.push_str(&(column + 1).to_string());

        self.state = if self.grid.is_winning_move(row, column, self.to_move) {
            GameState::Won(self.to_move)
        } else if self.grid.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = self.to_move.opponent();

        Ok(self.state)
    }

    /// Ends the game as a draw when the player to move has no legal column
    pub fn concede_draw(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Draw;
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn moves(&self) -> &str {
        &self.moves
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
