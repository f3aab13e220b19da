//! The board rendering.

use crossterm::style::{Color, Stylize};
use std::fmt::{Display, Formatter};
use sweeper::{CellView, Snapshot};

/// A printable board.
///
/// Each row ends with its number, counted from the bottom, and the column numbers are printed underneath. Column
/// numbers of two digits get split over two lines: the tens first, then the ones.
pub struct Board<'a> {
    snapshot: &'a Snapshot,
    /// Whether to color the glyphs. Should be off whenever the output isn't a terminal.
    colored: bool,
}

impl<'a> Board<'a> {
    pub fn new(snapshot: &'a Snapshot, colored: bool) -> Self {
        Board { snapshot, colored }
    }

    fn write_cell(&self, f: &mut Formatter<'_>, view: CellView) -> std::fmt::Result {
        let (glyph, color) = glyph(view);

        match color {
            Some(color) if self.colored => write!(f, "{} ", glyph.with(color)),
            _ => write!(f, "{} ", glyph),
        }
    }
}

/// Returns the character standing for the cell and its color, if any.
fn glyph(view: CellView) -> (char, Option<Color>) {
    match view {
        CellView::Hidden => ('?', None),
        CellView::Flagged => ('F', Some(Color::Yellow)),
        CellView::Cleared(0) => ('_', None),
        CellView::Cleared(adjacent_mines_amount) => {
            let color = match adjacent_mines_amount {
                1 => Color::Blue,
                2 => Color::Green,
                3 => Color::Red,
                4 => Color::DarkBlue,
                5 => Color::DarkRed,
                6 => Color::Cyan,
                7 => Color::Magenta,
                _ => Color::Grey,
            };

            (
                char::from_digit(adjacent_mines_amount.into(), 10).unwrap_or('?'),
                Some(color),
            )
        }
        CellView::Detonated => ('*', Some(Color::Red)),
        CellView::Mine => ('*', Some(Color::DarkGrey)),
    }
}

impl Display for Board<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (rows_amount, columns_amount) = self.snapshot.size();

        for (row_index, row) in self.snapshot.rows().enumerate() {
            for &view in row {
                self.write_cell(f, view)?;
            }

            writeln!(f, " < {}", rows_amount as usize - row_index)?;
        }

        writeln!(f)?;

        for _ in 0..columns_amount {
            write!(f, "^ ")?;
        }

        writeln!(f)?;

        // Single-digit columns and the tens of the two-digit ones.
        for column_number in 1..=columns_amount {
            if column_number < 10 {
                write!(f, "{} ", column_number)?;
            } else {
                write!(f, "{} ", column_number / 10)?;
            }
        }

        writeln!(f)?;

        // The ones of the two-digit columns.
        if columns_amount >= 10 {
            for column_number in 1..=columns_amount {
                if column_number < 10 {
                    write!(f, "  ")?;
                } else {
                    write!(f, "{} ", column_number % 10)?;
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Board;
    use sweeper::{Command, Minesweeper};

    #[test]
    fn the_board_is_drawn_with_bottom_up_row_numbers() {
        let mut game = Minesweeper::from_layout(3, 3, &[(2, 2)]).unwrap();
        game.submit_move(Command::reveal((0, 0))).unwrap();

        let board = Board::new(&game.snapshot(), false).to_string();

        assert_eq!(
            board,
            "_ _ _  < 3\n_ 1 1  < 2\n_ 1 ?  < 1\n\n^ ^ ^ \n1 2 3 \n"
        );
    }

    #[test]
    fn flags_and_mines_get_their_own_glyphs() {
        let mut game = Minesweeper::from_layout(1, 3, &[(0, 0), (0, 2)]).unwrap();
        game.submit_move(Command::flag((0, 2))).unwrap();
        game.submit_move(Command::reveal((0, 0))).unwrap();

        let board = Board::new(&game.snapshot(), false).to_string();

        assert!(board.starts_with("* ? F  < 1\n"));
    }

    #[test]
    fn wide_boards_split_the_column_numbers() {
        let game = Minesweeper::from_layout(1, 12, &[]).unwrap();
        let board = Board::new(&game.snapshot(), false).to_string();

        let lines = board.lines().collect::<Vec<_>>();

        assert_eq!(lines[3], "1 2 3 4 5 6 7 8 9 1 1 1 ");
        assert_eq!(lines[4], "                  0 1 2 ");
    }
}
