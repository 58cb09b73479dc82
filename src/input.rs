//! Parsing of the lines typed at the console

use crate::{config::Mode, error::InputError, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Command {
    /// A 0-indexed column
    Column(usize),
    Quit,
}

/// Reads a column choice from a line of input
///
/// The first integer on the line is taken as a 1-indexed column, so "3,"
/// and "5 please" are accepted. A line starting with `q` or `Q` quits.
/// Empty lines and a sign without digits right after it are not numbers.
pub fn parse_column(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    if line.starts_with(['q', 'Q']) {
        return Ok(Command::Quit);
    }

    let value = first_integer(line).ok_or(InputError::NotANumber)?;
    if value < 1 || value > WIDTH as i64 {
        return Err(InputError::OutOfRange(value));
    }
    Ok(Command::Column(value as usize - 1))
}

// the optionally signed run of digits starting at the first digit or sign,
// skipping any leading words
fn first_integer(line: &str) -> Option<i64> {
    let start = line.find(|c: char| c.is_ascii_digit() || c == '+' || c == '-')?;
    let rest = &line[start..];
    let sign_len = if rest.starts_with(['+', '-']) { 1 } else { 0 };
    let digits_len = rest[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len() - sign_len);
    if digits_len == 0 {
        return None;
    }
    // very long numbers saturate, they are out of range either way
    Some(
        rest[..sign_len + digits_len]
            .parse()
            .unwrap_or(if rest.starts_with('-') { i64::MIN } else { i64::MAX }),
    )
}

/// Reads a game mode from the menu prompt, `None` if the line is not a choice
pub fn parse_mode(line: &str) -> Option<Mode> {
    match line.trim() {
        "1" => Some(Mode::Easy),
        "2" => Some(Mode::Medium),
        "3" => Some(Mode::Hard),
        "4" => Some(Mode::TwoPlayer),
        _ => None,
    }
}
