use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// How a cell should be drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    /// Nothing predicted yet.
    Hidden,
    PredictedSafe,
    PredictedMine,
    RevealedSafe,
    RevealedMine,
}

impl CellView {
    pub fn from_cell(cell: Cell, state: GameState) -> Self {
        match (state, cell.revealed, cell.is_mine) {
            (GameState::Idle, ..) => Self::Hidden,
            (_, true, true) => Self::RevealedMine,
            (_, true, false) => Self::RevealedSafe,
            (_, false, true) => Self::PredictedMine,
            (_, false, false) => Self::PredictedSafe,
        }
    }

    /// Style class used by the web front end for this cell.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Hidden => "grid-cell",
            Self::PredictedSafe => "predicted-safe",
            Self::PredictedMine => "predicted-mine",
            Self::RevealedSafe => "revealed-safe",
            Self::RevealedMine => "revealed-mine",
        }
    }
}

/// Read-only picture of the board for renderers that poll.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub state: GameState,
    pub cells: Array2<CellView>,
    pub triggered_mine: Option<CellIndex>,
}

impl BoardView {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        let state = engine.state();
        let cells = engine
            .grid()
            .as_array()
            .mapv(|cell| CellView::from_cell(cell, state));
        Self {
            state,
            cells,
            triggered_mine: engine.triggered_mine(),
        }
    }

    pub fn cell(&self, index: CellIndex) -> Option<CellView> {
        self.cells.get(index.to_nd_index()).copied()
    }
}
