use anyhow::{anyhow, Result};

use std::fmt;

use crate::{error::DropError, CONNECT, HEIGHT, WIDTH};

/// Identifies which of the two players owns a piece
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Mark {
    A,
    B,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::A => Mark::B,
            Mark::B => Mark::A,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::A => 'A',
            Mark::B => 'B',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Taken(Mark),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn symbol(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Taken(mark) => mark.symbol(),
        }
    }
}

// the four axes a line can run along: horizontal, vertical and both diagonals
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// A 6x7 Connect 4 board
///
/// Rows are numbered from the bottom, so row 0 is where the first piece of
/// every column lands and row `HEIGHT - 1` is the top row. Pieces can only be
/// added through [`Grid::drop`], which keeps every column filled bottom-up
/// without gaps.
///
/// A `Grid` is `Copy`; searches explore hypothetical moves on their own copies.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Grid {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
        }
    }

    /// Builds a grid from a string of 1-indexed column digits, player A first
    ///
    /// The last move may win the game, but no move may follow a win.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut grid = Self::new();
        let mut mark = Mark::A;
        let mut won = false;

        for column_char in moves.as_ref().chars() {
            if won {
                return Err(anyhow!("Invalid position, game is over"));
            }
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    let row = grid.drop(column - 1, mark)?;
                    won = grid.is_winning_move(row, column - 1, mark);
                    mark = mark.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(grid)
    }

    /// Places `mark` in the lowest empty cell of `column`, returning its row
    pub fn drop(&mut self, column: usize, mark: Mark) -> Result<usize, DropError> {
        if column >= WIDTH {
            return Err(DropError::OutOfRange { column });
        }
        if !self.playable(column) {
            return Err(DropError::ColumnFull { column });
        }
        let row = self.heights[column];
        self.cells[column + WIDTH * row] = Cell::Taken(mark);
        self.heights[column] += 1;
        Ok(row)
    }

    /// Whether every column has reached the top row
    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.cells[column + WIDTH * (HEIGHT - 1)].is_empty())
    }

    /// Whether the piece at `(row, column)` completes a line of four for `mark`
    ///
    /// Only the windows passing through `(row, column)` are inspected, so this
    /// must be called right after the drop that placed that piece.
    pub fn is_winning_move(&self, row: usize, column: usize, mark: Mark) -> bool {
        let target = Cell::Taken(mark);
        let (row, column) = (row as isize, column as isize);

        DIRECTIONS.iter().any(|&(dr, dc)| {
            // every alignment of a window that still covers (row, column)
            (0..CONNECT as isize).any(|shift| {
                (0..CONNECT as isize).all(|k| {
                    let r = row + dr * (k - shift);
                    let c = column + dc * (k - shift);
                    self.get(r, c) == Some(target)
                })
            })
        })
    }

    /// The cell at `(row, column)`, rows counted from the bottom
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }

    fn get(&self, row: isize, column: isize) -> Option<Cell> {
        if row < 0 || row >= HEIGHT as isize || column < 0 || column >= WIDTH as isize {
            return None;
        }
        Some(self.cell(row as usize, column as usize))
    }

    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    /// Columns that can still take a piece, in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.playable(column)).collect()
    }

    pub fn column_height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn piece_count(&self) -> usize {
        self.heights.iter().sum()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = (1..=WIDTH).map(|x| x.to_string()).collect();
        let labels = labels.join(" ");

        writeln!(f, "\n  CONNECT FOUR (A vs B)\n  Columns: {}", labels)?;
        for row in (0..HEIGHT).rev() {
            write!(f, " |")?;
            for column in 0..WIDTH {
                write!(f, "{}|", self.cell(row, column).symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f, " +{}+", "-".repeat(2 * WIDTH + 1))?;
        writeln!(f, "  {}", labels)
    }
}
