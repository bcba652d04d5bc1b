use serde::{Deserialize, Serialize};

use crate::*;

/// Proportional cut taken from the fair multiplier.
pub const HOUSE_EDGE: f64 = 0.01;

/// Chance that the next reveal is safe, given what is still hidden.
pub fn win_probability(mines_remaining: CellCount, cells_remaining: CellCount) -> f64 {
    f64::from(cells_remaining.saturating_sub(mines_remaining)) / f64::from(cells_remaining)
}

/// Zero-edge payout for the current odds.
pub fn fair_multiplier(win_probability: f64) -> f64 {
    1.0 / win_probability
}

pub fn actual_multiplier(fair_multiplier: f64) -> f64 {
    fair_multiplier * (1.0 - HOUSE_EDGE)
}

/// Share of the board covered by mines.
pub fn mine_density(mine_count: CellCount) -> f64 {
    f64::from(mine_count) / f64::from(TOTAL_CELLS)
}

/// Odds and payout for the board as it currently stands.
///
/// Always derived from the grid counts, never kept alongside them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitySnapshot {
    pub mines_remaining: CellCount,
    pub cells_remaining: CellCount,
    pub win_probability: f64,
    pub fair_multiplier: f64,
    pub actual_multiplier: f64,
}

impl ProbabilitySnapshot {
    /// Returns `None` once no safe cell is left to reveal.
    pub fn compute(cells_remaining: CellCount, mines_remaining: CellCount) -> Option<Self> {
        if cells_remaining == 0 || mines_remaining >= cells_remaining {
            return None;
        }

        let win_probability = win_probability(mines_remaining, cells_remaining);
        let fair_multiplier = fair_multiplier(win_probability);
        Some(Self {
            mines_remaining,
            cells_remaining,
            win_probability,
            fair_multiplier,
            actual_multiplier: actual_multiplier(fair_multiplier),
        })
    }

    pub fn from_grid(grid: &Grid) -> Option<Self> {
        Self::compute(grid.hidden_count(), grid.hidden_mine_count())
    }

    /// Opening odds for a fresh board holding `mine_count` mines.
    pub fn for_mine_count(mine_count: CellCount) -> Result<Self> {
        check_mine_count(mine_count, TOTAL_CELLS)?;
        Self::compute(TOTAL_CELLS, mine_count).ok_or(GameError::InvalidMineCount {
            count: mine_count,
            total: TOTAL_CELLS,
        })
    }

    pub fn safe_remaining(&self) -> CellCount {
        self.cells_remaining - self.mines_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn opening_win_probability_matches_safe_share() {
        for mines in MIN_MINES..=MAX_MINES {
            let snapshot = ProbabilitySnapshot::for_mine_count(mines).unwrap();
            assert_eq!(
                snapshot.win_probability,
                f64::from(25 - mines) / 25.0,
                "mines {mines}"
            );
            assert_eq!(snapshot.cells_remaining, 25);
            assert_eq!(snapshot.mines_remaining, mines);
        }

        let lowest = ProbabilitySnapshot::for_mine_count(1).unwrap();
        let highest = ProbabilitySnapshot::for_mine_count(24).unwrap();
        assert_eq!(lowest.win_probability, 0.96);
        assert_eq!(highest.win_probability, 0.04);
    }

    #[test]
    fn actual_multiplier_applies_house_edge() {
        for mines in MIN_MINES..=MAX_MINES {
            let snapshot = ProbabilitySnapshot::for_mine_count(mines).unwrap();
            assert!(close(snapshot.actual_multiplier, snapshot.fair_multiplier * 0.99));
            assert!(close(snapshot.fair_multiplier, 1.0 / snapshot.win_probability));
        }
    }

    #[test]
    fn five_mines_worked_example() {
        let snapshot = ProbabilitySnapshot::for_mine_count(5).unwrap();

        assert_eq!(snapshot.safe_remaining(), 20);
        assert!(close(snapshot.win_probability, 0.8));
        assert!(close(snapshot.fair_multiplier, 1.25));
        assert!(close(snapshot.actual_multiplier, 1.2375));
    }

    #[test]
    fn multiplier_rises_as_safe_cells_run_out() {
        for mines in MIN_MINES..=MAX_MINES {
            let mut previous = 0.0;
            for cells in ((mines + 1)..=TOTAL_CELLS).rev() {
                let snapshot = ProbabilitySnapshot::compute(cells, mines).unwrap();
                assert!(snapshot.actual_multiplier > previous);
                previous = snapshot.actual_multiplier;
            }
        }
    }

    #[test]
    fn undefined_without_safe_cells() {
        assert_eq!(ProbabilitySnapshot::compute(3, 3), None);
        assert_eq!(ProbabilitySnapshot::compute(0, 0), None);
        assert!(ProbabilitySnapshot::for_mine_count(0).is_err());
        assert!(ProbabilitySnapshot::for_mine_count(25).is_err());
    }

    #[test]
    fn density() {
        assert!(close(mine_density(5), 0.2));
        assert!(close(mine_density(24), 0.96));
    }
}
