use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The 5×5 board: mine flags and revealed flags for every cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        let side = usize::from(GRID_SIDE);
        let cells = Array2::from_shape_fn((side, side), |(row, col)| {
            Cell::new(coords_to_index((row as u8, col as u8)))
        });
        Self { cells }
    }

    /// Clears every cell back to hidden and mine-free.
    pub fn create_grid(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.is_mine = false;
            cell.revealed = false;
        }
    }

    /// Lays out `count` mines derived from `seed`, hiding every cell.
    ///
    /// On failure the board is left exactly as it was.
    pub fn generate_mines(&mut self, seed: &str, count: CellCount) -> Result<()> {
        self.apply_layout(&SeededLayoutGenerator::new(seed), count)
    }

    /// Lays out `count` mines taken from `generator`, hiding every cell.
    pub fn apply_layout<G: LayoutGenerator + ?Sized>(
        &mut self,
        generator: &G,
        count: CellCount,
    ) -> Result<()> {
        let mines = generator.select(count, TOTAL_CELLS)?;
        for cell in self.cells.iter_mut() {
            cell.is_mine = mines.contains(&cell.index);
            cell.revealed = false;
        }
        Ok(())
    }

    /// Uncovers one cell. This is the only way a cell's state changes after layout.
    pub fn reveal_cell(&mut self, index: CellIndex) -> Result<CellReveal> {
        let index = validate_index(index)?;
        let cell = &mut self.cells[index.to_nd_index()];

        if cell.revealed {
            return Ok(CellReveal::AlreadyRevealed);
        }
        cell.revealed = true;

        Ok(if cell.is_mine {
            CellReveal::Mine
        } else {
            CellReveal::Safe
        })
    }

    /// Checked lookup; out-of-range indices are a range error.
    pub fn cell(&self, index: CellIndex) -> Result<&Cell> {
        let index = validate_index(index)?;
        Ok(&self.cells[index.to_nd_index()])
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Cells in ascending index order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn as_array(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn total_mines(&self) -> CellCount {
        self.count(|cell| cell.is_mine)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.count(|cell| cell.is_revealed_safe())
    }

    pub fn hidden_count(&self) -> CellCount {
        self.count(|cell| cell.is_hidden())
    }

    pub fn hidden_mine_count(&self) -> CellCount {
        self.count(|cell| cell.is_hidden() && cell.is_mine)
    }

    pub fn hidden_safe_count(&self) -> CellCount {
        self.count(|cell| cell.is_hidden() && !cell.is_mine)
    }

    pub fn mine_positions(&self) -> Vec<CellIndex> {
        self.cells()
            .filter(|cell| cell.is_mine)
            .map(|cell| cell.index)
            .collect()
    }

    /// Lowest-indexed cell that is still hidden.
    pub fn next_hidden(&self) -> Option<CellIndex> {
        self.cells().find(|cell| cell.is_hidden()).map(|cell| cell.index)
    }

    fn count(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        // at most 25 cells, always fits
        self.cells.iter().filter(|cell| predicate(cell)).count() as CellCount
    }
}

/// Unchecked access by cell index.
///
/// # Panics
///
/// Panics if `index` is not below [`TOTAL_CELLS`]; use [`Grid::cell`] for a checked lookup.
impl Index<CellIndex> for Grid {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.cells[index.to_nd_index()]
    }
}

fn validate_index(index: CellIndex) -> Result<CellIndex> {
    if is_valid_index(index) {
        Ok(index)
    } else {
        Err(GameError::InvalidIndex(index))
    }
}
