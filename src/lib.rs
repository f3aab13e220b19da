pub mod difficulty;
pub mod field;
pub mod input;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use field::cell::{CellState, CellView, Position};
pub use field::placement::{PlacementReport, MAX_PLACEMENT_PASSES};
pub use field::{Field, FieldError, RevealResult, Snapshot};
pub use input::{parse_command, Command, InputError};

use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

/// The enum represents the variants of everything that can possibly go wrong during the game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MinesweeperError {
    /// Something's wrong with the field: bad dimensions, a bad position, or an attempt to place the mines twice.
    #[error(transparent)]
    FieldError(#[from] FieldError),
    /// The game has already ended, and therefore the requested action could not be performed.
    #[error("the game has already ended, no more moves are accepted")]
    GameAlreadyEnded,
}

/// The status of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MinesweeperStatus {
    /// After the field has been created, but before it has been populated with mines.
    AwaitingFirstMove,
    /// An ongoing game.
    InProgress,
    Won,
    Lost,
}

/// Everything needed to start a new game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows_amount: u8,
    pub columns_amount: u8,
    pub mines_amount: u16,
    /// Seeds the mine placement. A seeded game always gets the same mines for the same first move. `None` seeds
    /// from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(rows_amount: u8, columns_amount: u8, mines_amount: u16) -> Self {
        GameConfig {
            rows_amount,
            columns_amount,
            mines_amount,
            seed: None,
        }
    }

    pub fn with_seed(self, seed: Option<u64>) -> Self {
        GameConfig { seed, ..self }
    }
}

/// The struct representing a Minesweeper game itself.
///
/// The mines are placed lazily, on the first reveal, so that the first move is always safe.
#[derive(Debug)]
pub struct Minesweeper {
    /// The field used in the game.
    field: Field,
    /// The game status.
    status: MinesweeperStatus,
    /// The source of randomness for the mine placement.
    rng: StdRng,
    /// The outcome of the mine placement, once it has happened.
    placement: Option<PlacementReport>,
}

impl Minesweeper {
    /// Creates a new game.
    ///
    /// Fails with a [`MinesweeperError::FieldError`] in case the configured dimensions or mines amount are invalid:
    /// both dimensions must be at least 1, and at least one cell must stay free of mines.
    pub fn new(config: GameConfig) -> Result<Self, MinesweeperError> {
        let field = Field::new(config.rows_amount, config.columns_amount, config.mines_amount)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        debug!(
            rows = config.rows_amount,
            columns = config.columns_amount,
            mines = config.mines_amount,
            seed = ?config.seed,
            "new game created"
        );

        Ok(Minesweeper {
            field,
            status: MinesweeperStatus::AwaitingFirstMove,
            rng,
            placement: None,
        })
    }

    /// Creates a game with the mines at exactly the given positions. There is no first-move protection in such a
    /// game: it starts right away in the [`MinesweeperStatus::InProgress`] status.
    pub fn from_layout(
        rows_amount: u8,
        columns_amount: u8,
        mine_positions: &[Position],
    ) -> Result<Self, MinesweeperError> {
        let field = Field::with_mines_at(rows_amount, columns_amount, mine_positions)?;

        Ok(Minesweeper {
            field,
            status: MinesweeperStatus::InProgress,
            rng: StdRng::from_entropy(),
            placement: None,
        })
    }

    /// The method performs the requested move, updates the status of the game and returns the move's outcome.
    ///
    /// The very first reveal populates the field with mines, keeping the target cell and its neighbors clear. A
    /// reveal aimed at a flagged cell doesn't count as one: flags lock cells until they are removed.
    ///
    /// Might fail with a [`MinesweeperError`] in case the game has already ended or the position is beyond the
    /// field's bounds.
    pub fn submit_move(&mut self, command: Command) -> Result<RevealResult, MinesweeperError> {
        if let MinesweeperStatus::Won | MinesweeperStatus::Lost = self.status {
            return Err(MinesweeperError::GameAlreadyEnded);
        }

        let position = command.position();

        let result = if command.is_flag {
            self.field.toggle_cell_flag(position)?
        } else {
            let is_locked = self
                .field
                .get_cell(position)
                .is_some_and(|cell| cell.is_flagged());

            if self.status == MinesweeperStatus::AwaitingFirstMove && !is_locked {
                self.populate(position)?;
            }

            self.field.reveal_cell(position)?
        };

        self.update_status();
        Ok(result)
    }

    /// Places the mines around the opening move and starts the game.
    fn populate(&mut self, opening_position: Position) -> Result<(), MinesweeperError> {
        self.field.clear_opening_cell(opening_position)?;
        self.placement = Some(self.field.place_mines(&mut self.rng)?);
        self.status = MinesweeperStatus::InProgress;

        Ok(())
    }

    /// A private helper that updates the game status. Should be called after each move.
    fn update_status(&mut self) {
        if self.field.check_detonated() {
            self.status = MinesweeperStatus::Lost;
            info!("a mine went off, the game is lost");
        } else if self.status == MinesweeperStatus::InProgress
            && self.field.check_win(self.mines_in_play())
        {
            self.status = MinesweeperStatus::Won;
            info!("every empty cell is revealed, the game is won");
        }
    }

    /// The number of mines actually in the field, which is what the win condition counts against.
    fn mines_in_play(&self) -> u16 {
        self.placement
            .map_or(self.field.mines_amount(), |report| report.placed())
    }

    pub fn status(&self) -> MinesweeperStatus {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.status == MinesweeperStatus::Won
    }

    pub fn is_lost(&self) -> bool {
        self.status == MinesweeperStatus::Lost
    }

    pub fn get_field(&self) -> &Field {
        &self.field
    }

    /// Returns the outcome of the mine placement, or [`None`] if the mines haven't been placed yet (or the game was
    /// created from a fixed layout).
    pub fn placement(&self) -> Option<PlacementReport> {
        self.placement
    }

    /// The number of mines the game has been configured with.
    pub fn mines_amount(&self) -> u16 {
        self.field.mines_amount()
    }

    pub fn flagged_cells_amount(&self) -> u16 {
        self.field.flagged_cells_amount()
    }

    /// Takes a read-only snapshot of the field for rendering. Once the game is lost, the mines nobody found show up
    /// as [`CellView::Mine`].
    pub fn snapshot(&self) -> Snapshot {
        self.field.snapshot(self.is_lost())
    }
}
