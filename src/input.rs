//! The move interpreter: turns a line typed by the player into a [`Command`] the game can take.
//!
//! A move is written as `column,row`, both 1-based, with the columns counted from the left and the rows counted from
//! the bottom. Prefixing it with `F` turns it into a flag toggle, e.g. `F1,2`.

use crate::field::cell::Position;
use thiserror::Error;

/// A single move, already normalized to the field's 0-based indices (rows counted from the top).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Command {
    pub row: u8,
    pub column: u8,
    /// `true` to toggle a flag, `false` to reveal.
    pub is_flag: bool,
}

impl Command {
    pub fn reveal((row, column): Position) -> Self {
        Command {
            row,
            column,
            is_flag: false,
        }
    }

    pub fn flag((row, column): Position) -> Self {
        Command {
            row,
            column,
            is_flag: true,
        }
    }

    pub fn position(&self) -> Position {
        (self.row, self.column)
    }
}

/// The enum represents everything that can be wrong with a typed move. None of it ever reaches the game: the
/// frontend is expected to report the error and ask again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("no move given")]
    Empty,
    /// The value is the offending input.
    #[error("couldn't understand `{0}`, expected `column,row` or `Fcolumn,row`")]
    Malformed(String),
    /// The values are the 1-based coordinates as typed.
    #[error("there's no cell at column {column}, row {row}")]
    OutOfRange { column: u32, row: u32 },
}

/// Parses a move for a field with the given number of rows and columns.
///
/// The returned command is guaranteed to be within the field's bounds.
pub fn parse_command(input: &str, rows_amount: u8, columns_amount: u8) -> Result<Command, InputError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(InputError::Empty);
    }

    let (is_flag, coordinates) = match input.strip_prefix('F').or_else(|| input.strip_prefix('f')) {
        Some(coordinates) => (true, coordinates),
        None => (false, input),
    };

    let malformed = || InputError::Malformed(input.to_string());

    let (column, row) = coordinates.split_once(',').ok_or_else(malformed)?;
    let column: u32 = column.trim().parse().map_err(|_| malformed())?;
    let row: u32 = row.trim().parse().map_err(|_| malformed())?;

    if !(1..=columns_amount as u32).contains(&column) || !(1..=rows_amount as u32).contains(&row) {
        return Err(InputError::OutOfRange { column, row });
    }

    Ok(Command {
        // Row 1 is the bottom one.
        row: (rows_amount as u32 - row) as u8,
        column: (column - 1) as u8,
        is_flag,
    })
}

#[cfg(test)]
mod test {
    use super::{parse_command, Command, InputError};

    #[test]
    fn reveals_are_parsed_with_rows_counted_from_the_bottom() {
        assert_eq!(parse_command("1,1", 9, 9), Ok(Command::reveal((8, 0))));
        assert_eq!(parse_command("9,9", 9, 9), Ok(Command::reveal((0, 8))));
        assert_eq!(parse_command("30,2", 16, 30), Ok(Command::reveal((14, 29))));
    }

    #[test]
    fn flags_are_parsed_with_either_case() {
        assert_eq!(parse_command("F3,9", 9, 9), Ok(Command::flag((0, 2))));
        assert_eq!(parse_command("f3,9", 9, 9), Ok(Command::flag((0, 2))));
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(parse_command("  F 2 , 3 \n", 9, 9), Ok(Command::flag((6, 1))));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_command("   ", 9, 9), Err(InputError::Empty));
    }

    #[test]
    fn malformed_input_is_rejected() {
        for input in ["abc", "1", "1;2", "F", "1,2,3", "-1,2", "x,1"] {
            assert_eq!(
                parse_command(input, 9, 9),
                Err(InputError::Malformed(input.to_string())),
                "input: {input}"
            );
        }
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        assert_eq!(
            parse_command("0,1", 9, 9),
            Err(InputError::OutOfRange { column: 0, row: 1 })
        );
        assert_eq!(
            parse_command("10,1", 9, 9),
            Err(InputError::OutOfRange { column: 10, row: 1 })
        );
        assert_eq!(
            parse_command("F1,17", 16, 30),
            Err(InputError::OutOfRange { column: 1, row: 17 })
        );
    }

    #[test]
    fn command_position_is_row_then_column() {
        assert_eq!(Command::reveal((3, 7)).position(), (3, 7));
        assert!(Command::flag((0, 0)).is_flag);
    }
}
