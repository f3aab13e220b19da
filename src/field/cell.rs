/// A cell's position in the field: its row's and column's indices respectively.
pub type Position = (u8, u8);

/// The offsets of the 8 cells surrounding any given one, in row-major order.
const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    /*  current  */
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The cell's state.
///
/// A cell starts hidden. While it's still closed, it can be flagged and un-flagged any number of times. Revealing is
/// irreversible: a revealed cell is either cleared (and knows the amount of mines around it) or detonated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellState {
    /// A closed cell.
    Hidden,
    /// A closed cell marked by the player as a suspected mine. A flagged cell can't be revealed until the flag is
    /// removed.
    Flagged,
    /// A revealed empty cell.
    ///
    /// The value represents the amount of mines around the cell.
    Cleared(u8),
    /// A revealed mined cell.
    Detonated,
}

/// What a renderer is allowed to know about a cell.
///
/// Unlike [`CellState`], this never tells whether a still-closed cell is mined, with the single exception of
/// [`CellView::Mine`], which only shows up in snapshots of lost games.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    Cleared(u8),
    Detonated,
    /// A mine that was never revealed nor flagged, exposed after the game has been lost.
    Mine,
}

impl From<CellState> for CellView {
    fn from(state: CellState) -> Self {
        match state {
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Cleared(adjacent_mines_amount) => CellView::Cleared(adjacent_mines_amount),
            CellState::Detonated => CellView::Detonated,
        }
    }
}

/// The representation of a cell.
///
/// A cell is described with its position in the field, whether it's mined, its state and the positions of its
/// neighbors. The neighbors are computed once, when the cell is created, and are already clipped to the field's
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    mined: bool,
    state: CellState,
    neighbors: Vec<Position>,
}

impl Cell {
    /// Creates a new hidden un-mined `Cell` at the given position of a field with the given dimensions (the number of
    /// rows and columns respectively).
    pub(crate) fn new(position: Position, bounds: (u8, u8)) -> Self {
        Cell {
            position,
            mined: false,
            state: CellState::Hidden,
            neighbors: adjacent_positions(position, bounds),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Checks whether the cell is mined.
    pub fn is_mined(&self) -> bool {
        self.mined
    }

    /// Mines the cell.
    pub(crate) fn mine(&mut self) {
        self.mined = true;
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// Checks whether the cell is closed and un-flagged.
    pub fn is_hidden(&self) -> bool {
        self.state == CellState::Hidden
    }

    /// Checks whether the cell is flagged.
    pub fn is_flagged(&self) -> bool {
        self.state == CellState::Flagged
    }

    /// Checks whether the cell has been revealed, either cleared or detonated.
    pub fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Cleared(_) | CellState::Detonated)
    }

    /// Toggles the flag of the cell. Returns `true` if the state has actually changed.
    ///
    /// Won't produce any effect if the cell has already been revealed.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        match self.state {
            CellState::Hidden => self.state = CellState::Flagged,
            CellState::Flagged => self.state = CellState::Hidden,
            CellState::Cleared(_) | CellState::Detonated => return false,
        };

        true
    }

    /// Reveals the cell as an empty one with the given amount of mines around it.
    pub(crate) fn clear(&mut self, adjacent_mines_amount: u8) {
        self.state = CellState::Cleared(adjacent_mines_amount);
    }

    /// Reveals the cell as a mine.
    pub(crate) fn detonate(&mut self) {
        self.state = CellState::Detonated;
    }

    /// Returns the positions of the cell's neighbors.
    pub fn neighbors(&self) -> &[Position] {
        &self.neighbors
    }

    pub fn view(&self) -> CellView {
        self.state.into()
    }
}

/// Returns the positions of the cells surrounding the given one in a field with the given number of rows and
/// columns. Positions beyond the field's bounds are left out, so corner cells get 3 neighbors and edge cells get 5.
fn adjacent_positions((row_index, column_index): Position, (rows_amount, columns_amount): (u8, u8)) -> Vec<Position> {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(row_offset, column_offset)| {
            let row_index = row_index.checked_add_signed(row_offset)?;
            let column_index = column_index.checked_add_signed(column_offset)?;

            (row_index < rows_amount && column_index < columns_amount).then_some((row_index, column_index))
        })
        .collect()
}
