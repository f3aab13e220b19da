use crate::GameConfig;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// The classic board presets.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Difficulty {
    /// 9x9 with 10 mines.
    Easy,
    /// 16x16 with 40 mines.
    Medium,
    /// 16 rows by 30 columns with 99 mines.
    Hard,
}

impl Difficulty {
    /// Returns the number of rows, the number of columns and the number of mines of the preset.
    pub fn dimensions(self) -> (u8, u8, u16) {
        match self {
            Difficulty::Easy => (9, 9, 10),
            Difficulty::Medium => (16, 16, 40),
            Difficulty::Hard => (16, 30, 99),
        }
    }

    pub fn config(self) -> GameConfig {
        let (rows_amount, columns_amount, mines_amount) = self.dimensions();
        GameConfig::new(rows_amount, columns_amount, mines_amount)
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown difficulty `{0}`, expected easy (e), medium (m) or hard (h)")]
pub struct ParseDifficultyError(String);

/// Accepts both the full names and their first letters, ignoring the case.
impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "easy" => Ok(Difficulty::Easy),
            "m" | "medium" => Ok(Difficulty::Medium),
            "h" | "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Difficulty, ParseDifficultyError};
    use crate::Minesweeper;

    #[test]
    fn presets_have_the_classic_dimensions() {
        assert_eq!(Difficulty::Easy.dimensions(), (9, 9, 10));
        assert_eq!(Difficulty::Medium.dimensions(), (16, 16, 40));
        assert_eq!(Difficulty::Hard.dimensions(), (16, 30, 99));
    }

    #[test]
    fn every_preset_makes_a_valid_game() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert!(Minesweeper::new(difficulty.config()).is_ok());
        }
    }

    #[test]
    fn difficulties_get_parsed_from_names_and_letters() {
        assert_eq!("e".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(" H ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "x".parse::<Difficulty>(),
            Err(ParseDifficultyError("x".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parsing() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
    }
}
