use std::collections::BTreeSet;

use crate::*;
pub use seeded::*;

mod seeded;

/// Produces the set of mine positions for a board.
pub trait LayoutGenerator {
    fn select(&self, count: CellCount, total_cells: CellCount) -> Result<BTreeSet<CellIndex>>;
}

/// Fixed layout, handy for replaying a known board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedLayout(pub BTreeSet<CellIndex>);

impl LayoutGenerator for FixedLayout {
    fn select(&self, count: CellCount, total_cells: CellCount) -> Result<BTreeSet<CellIndex>> {
        check_mine_count(count, total_cells)?;
        if self.0.len() != usize::from(count) {
            return Err(GameError::InvalidMineCount {
                count,
                total: total_cells,
            });
        }
        if let Some(&index) = self.0.iter().find(|&&index| index >= total_cells) {
            return Err(GameError::InvalidIndex(index));
        }
        Ok(self.0.clone())
    }
}

/// Validates `1 <= count <= total_cells - 1`.
pub fn check_mine_count(count: CellCount, total_cells: CellCount) -> Result<()> {
    if count >= 1 && count < total_cells {
        Ok(())
    } else {
        Err(GameError::InvalidMineCount {
            count,
            total: total_cells,
        })
    }
}
