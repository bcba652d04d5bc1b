use serde::{Deserialize, Serialize};

use crate::CellIndex;

/// One square of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub index: CellIndex,
    pub is_mine: bool,
    pub revealed: bool,
}

impl Cell {
    pub const fn new(index: CellIndex) -> Self {
        Self {
            index,
            is_mine: false,
            revealed: false,
        }
    }

    pub const fn is_hidden(self) -> bool {
        !self.revealed
    }

    pub const fn is_revealed_safe(self) -> bool {
        self.revealed && !self.is_mine
    }
}

/// What happened when a single cell was uncovered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellReveal {
    AlreadyRevealed,
    Safe,
    Mine,
}
