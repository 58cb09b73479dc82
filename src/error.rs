//! Error types surfaced by the engine and the console front end

use crate::WIDTH;

/// A piece could not be dropped. The grid is left unmodified in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DropError {
    #[error("Invalid move, column {} out of range. Columns must be between 1 and {}", .column + 1, WIDTH)]
    OutOfRange { column: usize },

    #[error("Invalid move, column {} full", .column + 1)]
    ColumnFull { column: usize },
}

/// A move was rejected by the turn loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    Drop(#[from] DropError),

    #[error("Invalid move, the game is already over")]
    GameOver,
}

/// A line of console input could not be read as a column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid input. Type a number 1-{} or 'q'.", WIDTH)]
    NotANumber,

    #[error("Column must be between 1 and {}.", WIDTH)]
    OutOfRange(i64),
}

/// Command line settings that parse but make no sense.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("search depth must be at least 1, got {0}")]
    ZeroDepth(u32),

    #[error("arena needs at least one game")]
    NoGames,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_error_reports_one_indexed_columns() {
        assert_eq!(
            DropError::ColumnFull { column: 2 }.to_string(),
            "Invalid move, column 3 full"
        );
        assert_eq!(
            DropError::OutOfRange { column: 9 }.to_string(),
            "Invalid move, column 10 out of range. Columns must be between 1 and 7"
        );
    }

    #[test]
    fn move_error_is_transparent_over_drop_error() {
        let err = MoveError::from(DropError::ColumnFull { column: 0 });
        assert_eq!(err.to_string(), "Invalid move, column 1 full");
    }

    #[test]
    fn input_error_display() {
        assert_eq!(
            InputError::OutOfRange(9).to_string(),
            "Column must be between 1 and 7."
        );
    }
}
