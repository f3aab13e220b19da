use super::{cell::Position, Field, FieldError};
use rand::Rng;
use tracing::{debug, warn};

/// The maximum number of full passes over the field the mine placement is allowed to take.
///
/// Candidates are mined with a per-cell probability rather than drawn from a shuffled deck, so depending on the
/// field's geometry it may be impossible to place every requested mine. The cap guarantees termination.
pub const MAX_PLACEMENT_PASSES: u8 = 10;

/// The outcome of populating a field with mines.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlacementReport {
    requested: u16,
    placed: u16,
    passes: u8,
    chance_percentage: u8,
}

impl PlacementReport {
    /// The number of mines the field was configured with.
    pub fn requested(&self) -> u16 {
        self.requested
    }

    /// The number of mines actually placed.
    pub fn placed(&self) -> u16 {
        self.placed
    }

    /// The number of full passes over the field the placement took.
    pub fn passes(&self) -> u8 {
        self.passes
    }

    /// The number of requested mines that couldn't be placed.
    pub fn shortfall(&self) -> u16 {
        self.requested - self.placed
    }

    pub fn is_complete(&self) -> bool {
        self.placed == self.requested
    }

    /// The chance of a single cell being mined, in whole percents. Meant for telling the player, not for counting.
    pub fn mine_chance_percentage(&self) -> u8 {
        self.chance_percentage
    }
}

impl Field {
    /// Populates the field with randomly distributed mines, the total amount of which is known from the time when the
    /// field was created.
    ///
    /// The cells are scanned in row-major order, and each eligible one gets mined with the probability of
    /// `mines / cells`. A cell is eligible if it's not mined yet, is hidden (not revealed and not flagged) and has no
    /// revealed neighbors. The last condition keeps a safety buffer around the player's opening move, so the opening
    /// reveal always lands on a zero and cascades.
    ///
    /// The scan is repeated until all the mines are placed or [`MAX_PLACEMENT_PASSES`] passes are done. In the latter
    /// case fewer mines than requested end up in the field, which is reported via [`PlacementReport::shortfall`].
    ///
    /// The method fails with [`FieldError::MinesAlreadyPlaced`] in case the field has already been populated, even if
    /// that earlier placement ended up placing no mines at all.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<PlacementReport, FieldError> {
        if self.populated {
            return Err(FieldError::MinesAlreadyPlaced);
        }

        let (rows_amount, columns_amount, cells_amount) = self.size();
        let probability = f64::from(self.mines_amount) / f64::from(cells_amount);

        let mut remaining = self.mines_amount;
        let mut passes = 0;

        'placement: while remaining > 0 && passes < MAX_PLACEMENT_PASSES {
            passes += 1;

            for row_index in 0..rows_amount {
                for column_index in 0..columns_amount {
                    if remaining == 0 {
                        break 'placement;
                    }

                    let position = (row_index, column_index);

                    if self.is_mine_candidate(position) && rng.gen_bool(probability) {
                        self.grid[row_index as usize][column_index as usize].mine();
                        remaining -= 1;
                    }
                }
            }
        }

        self.populated = true;

        let report = PlacementReport {
            requested: self.mines_amount,
            placed: self.mines_amount - remaining,
            passes,
            chance_percentage: (probability * 100.0).round() as u8,
        };

        if report.is_complete() {
            debug!(placed = report.placed, passes, "mines placed");
        } else {
            warn!(
                requested = report.requested,
                placed = report.placed,
                "not all the mines could be placed, continuing with fewer"
            );
        }

        Ok(report)
    }

    /// Checks whether the cell at the given position may receive a mine.
    fn is_mine_candidate(&self, position: Position) -> bool {
        let Some(cell) = self.get_cell(position) else {
            return false;
        };

        !cell.is_mined()
            && cell.is_hidden()
            && !cell
                .neighbors()
                .iter()
                .filter_map(|&neighbor_position| self.get_cell(neighbor_position))
                .any(|neighbor| neighbor.is_revealed())
    }
}
