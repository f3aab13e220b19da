pub mod cell;
pub mod placement;

use cell::{Cell, CellState, CellView, Position};
use std::collections::{HashSet, VecDeque};
use std::fmt::{Debug, Formatter};
use thiserror::Error;
use tracing::trace;

/// The enum represents all the variants of what can possibly go wrong when working with fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Used when the user tries to create a field without rows or without columns.
    #[error("the field must have at least one row and one column")]
    NotEnoughCells,
    /// Used when the required number of mines leaves no cell free of mines.
    ///
    /// The value represents the maximum allowed number of mines for the field with the given dimensions.
    #[error("too many mines, at most {0} fit the field")]
    InvalidMinesAmount(u16),
    /// Used when a position is beyond the field's bounds.
    #[error("the position {0:?} is beyond the field's bounds")]
    InvalidPosition(Position),
    /// Used when trying to populate with mines a field that has already been populated with them.
    #[error("the field has already been populated with mines")]
    MinesAlreadyPlaced,
}

/// The outcome of a single move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RevealResult {
    /// A flag got toggled, or a reveal was refused because the target cell is flagged.
    Flagged,
    /// A mine got revealed.
    Detonated,
    /// An empty cell (and possibly a region around it) got revealed.
    Cleared,
}

/// The field representation.
///
/// The field is a grid (a 2D vector) of cells with a known number of mines. Cells refer to their neighbors by
/// position only, so the field is the sole owner of every cell.
#[derive(PartialEq, Eq)]
pub struct Field {
    /// The grid of cells of the field. The top level represents rows, and the nested vector of each row represents
    /// cells.
    grid: Vec<Vec<Cell>>,
    /// The number of mines the field is meant to hold.
    mines_amount: u16,
    /// Whether the mine placement has already run.
    populated: bool,
}

impl Field {
    /// Creates a new [`Field`] with the provided dimensions and number of mines.
    ///
    /// The mines are not placed here: the placement has to know the player's first move, which only happens later
    /// (see [`Field::place_mines`]). The amount gets validated right away though, so that a bad configuration is
    /// reported before the game starts.
    ///
    /// The method might fail with [`FieldError::NotEnoughCells`] in case either dimension is zero or with
    /// [`FieldError::InvalidMinesAmount`] in case the requested mines amount leaves no empty cell.
    pub fn new(rows_amount: u8, columns_amount: u8, mines_amount: u16) -> Result<Self, FieldError> {
        let cells_amount = rows_amount as u16 * columns_amount as u16;

        if cells_amount == 0 {
            return Err(FieldError::NotEnoughCells);
        }

        if mines_amount >= cells_amount {
            return Err(FieldError::InvalidMinesAmount(cells_amount - 1));
        }

        let grid = (0..rows_amount)
            .map(|row_index| {
                (0..columns_amount)
                    .map(|column_index| Cell::new((row_index, column_index), (rows_amount, columns_amount)))
                    .collect()
            })
            .collect();

        Ok(Field {
            grid,
            mines_amount,
            populated: false,
        })
    }

    /// Creates a field with mines at exactly the given positions. Such a field counts as already populated.
    ///
    /// Repeated positions are only counted once.
    pub fn with_mines_at(
        rows_amount: u8,
        columns_amount: u8,
        mine_positions: &[Position],
    ) -> Result<Self, FieldError> {
        let mut field = Field::new(rows_amount, columns_amount, 0)?;

        for &position in mine_positions {
            field.checked_cell(position)?;
            field.cell_mut(position).mine();
        }

        let placed_mines_amount = field.placed_mines_amount();
        let (_, _, cells_amount) = field.size();

        if placed_mines_amount >= cells_amount {
            return Err(FieldError::InvalidMinesAmount(cells_amount - 1));
        }

        field.mines_amount = placed_mines_amount;
        field.populated = true;

        Ok(field)
    }

    /// Returns the field's height (the number of rows), width (the number of columns) and the two values multiplied,
    /// which is effectively the total number of cells.
    pub fn size(&self) -> (u8, u8, u16) {
        let rows_amount = self.grid.len() as u8;
        let columns_amount = self.grid.first().map(|row| row.len()).unwrap_or(0) as u8;
        let cells_amount = rows_amount as u16 * columns_amount as u16;

        (rows_amount, columns_amount, cells_amount)
    }

    /// The number of mines the field has been configured with.
    pub fn mines_amount(&self) -> u16 {
        self.mines_amount
    }

    /// The number of mines actually present in the field. Falls short of [`Field::mines_amount`] only when the
    /// placement couldn't fit them all.
    pub fn placed_mines_amount(&self) -> u16 {
        self.cells().filter(|cell| cell.is_mined()).count() as u16
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Returns a read-only cell reference by its position or [`None`] if there's no cell at the given position.
    pub fn get_cell(&self, (row_index, column_index): Position) -> Option<&Cell> {
        self.grid
            .get(row_index as usize)
            .and_then(|row| row.get(column_index as usize))
    }

    /// Same as [`Field::get_cell`], but fails with [`FieldError::InvalidPosition`] instead of returning [`None`].
    fn checked_cell(&self, position: Position) -> Result<&Cell, FieldError> {
        self.get_cell(position)
            .ok_or(FieldError::InvalidPosition(position))
    }

    /// Returns a mutable cell reference by its position. The position must have been validated beforehand.
    fn cell_mut(&mut self, (row_index, column_index): Position) -> &mut Cell {
        &mut self.grid[row_index as usize][column_index as usize]
    }

    /// Returns the positions of the cells surrounding the given one, or an empty slice for positions beyond the
    /// field's bounds.
    pub fn neighbors(&self, position: Position) -> &[Position] {
        self.get_cell(position).map(Cell::neighbors).unwrap_or(&[])
    }

    fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    /// Returns the positions of all the mined cells in row-major order.
    pub fn mine_positions(&self) -> Vec<Position> {
        self.cells()
            .filter(|cell| cell.is_mined())
            .map(Cell::position)
            .collect()
    }

    /// The method returns the total number of all the currently flagged cells in the field.
    pub fn flagged_cells_amount(&self) -> u16 {
        self.cells().filter(|cell| cell.is_flagged()).count() as u16
    }

    /// Counts the mines around the cell with the given position.
    pub fn adjacent_mines_amount(&self, position: Position) -> u8 {
        self.neighbors(position)
            .iter()
            .filter_map(|&neighbor_position| self.get_cell(neighbor_position))
            .filter(|neighbor| neighbor.is_mined())
            .count() as u8
    }

    /// Marks the player's opening cell as cleared before the mines exist, so that the placement keeps a safety buffer
    /// around it.
    pub(crate) fn clear_opening_cell(&mut self, position: Position) -> Result<(), FieldError> {
        self.checked_cell(position)?;
        self.cell_mut(position).clear(0);

        Ok(())
    }

    /// Toggles the flag for the cell with the given position.
    ///
    /// Flagging never cascades and never looks at the mines. Revealed cells are left as they are.
    pub fn toggle_cell_flag(&mut self, position: Position) -> Result<RevealResult, FieldError> {
        self.checked_cell(position)?;
        let toggled = self.cell_mut(position).toggle_flag();
        trace!(?position, toggled, "flag toggled");

        Ok(RevealResult::Flagged)
    }

    /// Reveals a cell by its position.
    ///
    /// A flagged cell is locked: it's left untouched and [`RevealResult::Flagged`] is returned. A mined cell gets
    /// detonated. An empty cell gets cleared with the amount of mines around it, and if that amount is zero, the
    /// surrounding region gets cleared as well (see [`Field::cascade`]).
    pub fn reveal_cell(&mut self, position: Position) -> Result<RevealResult, FieldError> {
        let cell = self.checked_cell(position)?;

        if cell.is_flagged() {
            return Ok(RevealResult::Flagged);
        }

        if cell.is_mined() {
            self.cell_mut(position).detonate();
            return Ok(RevealResult::Detonated);
        }

        let adjacent_mines_amount = self.adjacent_mines_amount(position);
        self.cell_mut(position).clear(adjacent_mines_amount);

        if adjacent_mines_amount == 0 {
            self.cascade(position);
        }

        Ok(RevealResult::Cleared)
    }

    /// Breadth-first clears the region of zero-count cells connected to `origin`, along with its border.
    ///
    /// Every neighbor of a zero-count cell is safe to clear. Flagged cells are neither cleared nor walked through, so
    /// flags cut the region. Each cell is enqueued at most once, which bounds the traversal by the field's size.
    ///
    /// Returns the number of cells cleared on top of `origin`.
    fn cascade(&mut self, origin: Position) -> usize {
        let mut queue = VecDeque::from([origin]);
        let mut enqueued = HashSet::from([origin]);
        let mut cleared_amount = 0;

        while let Some(position) = queue.pop_front() {
            let neighbors = self.neighbors(position).to_vec();

            for neighbor_position in neighbors {
                if !self.get_cell(neighbor_position).is_some_and(Cell::is_hidden) {
                    continue;
                }

                let adjacent_mines_amount = self.adjacent_mines_amount(neighbor_position);
                self.cell_mut(neighbor_position).clear(adjacent_mines_amount);
                cleared_amount += 1;

                if adjacent_mines_amount == 0 && enqueued.insert(neighbor_position) {
                    queue.push_back(neighbor_position);
                }
            }
        }

        trace!(?origin, cleared_amount, "cascade finished");

        cleared_amount
    }

    /// Checks that there exists a detonated mine.
    ///
    /// This is effectively the loss-condition for the game.
    pub fn check_detonated(&self) -> bool {
        self.cells().any(|cell| cell.state() == CellState::Detonated)
    }

    /// Checks whether the game on this field is won, given the number of mines in play.
    ///
    /// The game is won when every hidden cell is a mine and the flagged mines plus the hidden mines account for all
    /// of them. Flags don't have to be placed at all: revealing every empty cell is enough. A flagged empty cell
    /// doesn't block the win either, as flagged cells aren't counted as hidden ones.
    pub fn check_win(&self, mines_amount: u16) -> bool {
        let mut hidden_amount = 0u16;
        let mut hidden_mines_amount = 0u16;
        let mut flagged_mines_amount = 0u16;

        for cell in self.cells() {
            match cell.state() {
                CellState::Hidden => {
                    hidden_amount += 1;

                    if cell.is_mined() {
                        hidden_mines_amount += 1;
                    }
                }
                CellState::Flagged if cell.is_mined() => flagged_mines_amount += 1,
                _ => (),
            }
        }

        hidden_amount == hidden_mines_amount && flagged_mines_amount + hidden_mines_amount == mines_amount
    }

    /// Takes a read-only snapshot of the field for rendering.
    ///
    /// With `expose_mines` set, hidden mines show up as [`CellView::Mine`]. Flags are kept as they are.
    pub fn snapshot(&self, expose_mines: bool) -> Snapshot {
        let (rows_amount, columns_amount, _) = self.size();

        let cells = self
            .cells()
            .map(|cell| {
                if expose_mines && cell.is_mined() && cell.is_hidden() {
                    CellView::Mine
                } else {
                    cell.view()
                }
            })
            .collect();

        Snapshot {
            rows_amount,
            columns_amount,
            cells,
        }
    }
}

/// The `Debug` implementation draws the mine layout: `*` for mines and `_` for everything else.
impl Debug for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.grid.iter() {
            for cell in row {
                write!(f, "{} ", if cell.is_mined() { '*' } else { '_' })?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

/// A read-only, row-major view of every cell of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    rows_amount: u8,
    columns_amount: u8,
    cells: Vec<CellView>,
}

impl Snapshot {
    /// Returns the number of rows and columns respectively.
    pub fn size(&self) -> (u8, u8) {
        (self.rows_amount, self.columns_amount)
    }

    pub fn get(&self, (row_index, column_index): Position) -> Option<CellView> {
        if row_index >= self.rows_amount || column_index >= self.columns_amount {
            return None;
        }

        self.cells
            .get(row_index as usize * self.columns_amount as usize + column_index as usize)
            .copied()
    }

    /// Iterates over the rows, top one first.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.columns_amount as usize)
    }
}
