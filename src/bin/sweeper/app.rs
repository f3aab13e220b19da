//! The text application: asks for a board, runs the game move by move and offers a replay.

use crate::render::Board;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::io::{BufRead, Write};
use sweeper::{parse_command, Difficulty, GameConfig, Minesweeper};

/// What the application has been told on the command line.
#[derive(Debug, Default)]
pub struct Settings {
    /// The preset to play. Asked for before every game when neither this nor `custom` is set.
    pub difficulty: Option<Difficulty>,
    /// Custom dimensions, taking precedence over `difficulty`.
    pub custom: Option<GameConfig>,
    pub seed: Option<u64>,
    /// Print the mine layout under the board.
    pub debug: bool,
    pub colored: bool,
}

/// The text application
pub struct App<R, W> {
    input: R,
    output: W,
    settings: Settings,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(input: R, output: W, settings: Settings) -> Self {
        App {
            input,
            output,
            settings,
        }
    }

    /// Plays games until the player declines a replay or the input runs out.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(config) = self.choose_config()? else {
                return Ok(());
            };

            if !self.play(config)? {
                return Ok(());
            }

            if !self.ask_play_again()? {
                return Ok(());
            }
        }
    }

    /// Reads a trimmed line, or returns [`None`] once the input is over.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    fn choose_config(&mut self) -> Result<Option<GameConfig>> {
        let config = if let Some(custom) = self.settings.custom {
            custom
        } else if let Some(difficulty) = self.settings.difficulty {
            difficulty.config()
        } else {
            loop {
                writeln!(self.output, "What size board do you want to play?")?;
                writeln!(self.output, "easy (e), medium (m), or hard (h)?")?;

                let Some(line) = self.read_line()? else {
                    return Ok(None);
                };

                match line.parse::<Difficulty>() {
                    Ok(difficulty) => break difficulty.config(),
                    Err(err) => writeln!(self.output, "I didn't understand... try again. ({})", err)?,
                }
            }
        };

        Ok(Some(config.with_seed(self.settings.seed)))
    }

    /// Plays a single game. Returns `false` if the input ran out before the game ended.
    fn play(&mut self, config: GameConfig) -> Result<bool> {
        let mut game = Minesweeper::new(config).wrap_err("Couldn't create a game. Bad parameters?")?;
        let mut placement_announced = false;

        while !game.is_won() && !game.is_lost() {
            self.show(&game)?;

            if game.placement().is_none() {
                writeln!(
                    self.output,
                    "Tip: Input of \"1,2\" means first column and second row from the bottom."
                )?;
                writeln!(self.output, "Tip: To flag a mine use 'F' - e.g. F1,2")?;
            }

            let Some(line) = self.read_line()? else {
                return Ok(false);
            };

            let command = match parse_command(&line, config.rows_amount, config.columns_amount) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.output, "{}. Try again.", err)?;
                    continue;
                }
            };

            game.submit_move(command)?;

            if let (Some(report), false) = (game.placement(), placement_announced) {
                writeln!(
                    self.output,
                    "NOTE: Every spot has a {}% chance of a mine! Watch out!",
                    report.mine_chance_percentage()
                )?;

                if !report.is_complete() {
                    writeln!(
                        self.output,
                        "NOTE: hmmm... only {} of {} mines were added to the board, but we are continuing anyway!",
                        report.placed(),
                        report.requested()
                    )?;
                }

                placement_announced = true;
            }
        }

        self.show(&game)?;

        if game.is_won() {
            writeln!(self.output, "YOU WON!!!")?;
        } else {
            writeln!(self.output, "You blew up... Sorry.")?;
        }

        Ok(true)
    }

    fn show(&mut self, game: &Minesweeper) -> Result<()> {
        writeln!(self.output, "{}", Board::new(&game.snapshot(), self.settings.colored))?;
        writeln!(
            self.output,
            "Flags: {} / Mines: {}",
            game.flagged_cells_amount(),
            game.mines_amount()
        )?;

        if self.settings.debug && game.get_field().is_populated() {
            writeln!(self.output, "Debug:\n{:?}", game.get_field())?;
        }

        Ok(())
    }

    fn ask_play_again(&mut self) -> Result<bool> {
        loop {
            writeln!(self.output, "Do you want to play again?")?;
            writeln!(self.output, "Yes (y) or No (n)?")?;

            match self.read_line()?.as_deref() {
                Some("y") => return Ok(true),
                Some("n") | None => return Ok(false),
                Some(_) => writeln!(self.output, "I didn't understand... try again.")?,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{App, Settings};
    use std::io::Cursor;
    use sweeper::{Difficulty, GameConfig};

    fn run_scripted(settings: Settings, script: &str) -> String {
        let mut output = Vec::new();
        App::new(Cursor::new(script.to_string()), &mut output, settings)
            .run()
            .unwrap();

        String::from_utf8(output).unwrap()
    }

    fn mine_free_settings() -> Settings {
        Settings {
            custom: Some(GameConfig::new(2, 2, 0)),
            seed: Some(0),
            ..Settings::default()
        }
    }

    #[test]
    fn a_mine_free_board_is_won_with_the_first_move() {
        let output = run_scripted(mine_free_settings(), "1,1\nn\n");

        assert!(output.contains("YOU WON!!!"));
        assert!(output.contains("Do you want to play again?"));
    }

    #[test]
    fn bad_moves_are_reported_and_asked_again() {
        let output = run_scripted(mine_free_settings(), "zz\n3,1\n1,1\nn\n");

        assert!(output.contains("couldn't understand `zz`"));
        assert!(output.contains("there's no cell at column 3, row 1"));
        assert!(output.contains("YOU WON!!!"));
    }

    #[test]
    fn the_replay_starts_a_new_game() {
        let output = run_scripted(mine_free_settings(), "1,1\ny\n2,2\nn\n");

        assert_eq!(output.matches("YOU WON!!!").count(), 2);
    }

    #[test]
    fn the_difficulty_is_asked_for_when_not_given() {
        let output = run_scripted(Settings::default(), "x\ne\n");

        assert!(output.contains("What size board do you want to play?"));
        assert!(output.contains("I didn't understand... try again."));
        // The easy board has 9 rows.
        assert!(output.contains(" < 9\n"));
    }

    #[test]
    fn the_mine_chance_is_announced_after_the_first_move() {
        let settings = Settings {
            difficulty: Some(Difficulty::Easy),
            seed: Some(1),
            ..Settings::default()
        };

        let output = run_scripted(settings, "5,5\n");

        assert!(output.contains("NOTE: Every spot has a 12% chance of a mine! Watch out!"));
    }

    #[test]
    fn a_shortfall_is_announced() {
        let settings = Settings {
            custom: Some(GameConfig::new(3, 3, 8)),
            seed: Some(0),
            ..Settings::default()
        };

        let output = run_scripted(settings, "2,2\nn\n");

        assert!(output.contains("only 0 of 8 mines were added"));
        assert!(output.contains("YOU WON!!!"));
    }

    #[test]
    fn the_debug_mode_prints_the_mine_layout() {
        let settings = Settings {
            custom: Some(GameConfig::new(2, 2, 0)),
            debug: true,
            ..Settings::default()
        };

        let output = run_scripted(settings, "1,1\nn\n");

        assert!(output.contains("Debug:\n_ _ \n_ _ \n"));
    }

    #[test]
    fn the_end_of_input_quits() {
        assert!(run_scripted(Settings::default(), "").contains("easy (e), medium (m), or hard (h)?"));
    }
}
