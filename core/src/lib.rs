//! Prediction engine for a 5×5 mine field.
//!
//! A [`Seed`] and a mine count fix the mine layout deterministically. A [`PlayEngine`]
//! walks the board through prediction, reveals, and a win or loss, while
//! [`ProbabilitySnapshot`] derives the odds and payout from whatever is still hidden.
//! [`Session`] wraps it all behind one command surface with an auto player that runs
//! on an injected [`Scheduler`].

use serde::{Deserialize, Serialize};

pub use autoplay::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use grid::*;
pub use probability::*;
pub use schedule::*;
pub use seed::*;
pub use session::*;
pub use settings::*;
pub use types::*;
pub use view::*;

mod autoplay;
mod cell;
mod engine;
mod error;
mod event;
mod generator;
mod grid;
mod probability;
mod schedule;
mod seed;
mod session;
mod settings;
mod types;
mod view;

/// What the player chose before predicting: the seed and how many mines to hide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub seed: Seed,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(seed: Seed, mines: CellCount) -> Result<Self> {
        let config = Self { seed, mines };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_mine_count(self.mines, TOTAL_CELLS)
    }

    pub const fn safe_cells(&self) -> CellCount {
        TOTAL_CELLS - self.mines
    }

    pub fn density(&self) -> f64 {
        mine_density(self.mines)
    }

    /// Mine positions this configuration produces, without touching any board.
    pub fn mine_positions(&self) -> Result<Vec<CellIndex>> {
        let mines = SeededLayoutGenerator::from_seed(&self.seed).select(self.mines, TOTAL_CELLS)?;
        Ok(mines.into_iter().collect())
    }
}
