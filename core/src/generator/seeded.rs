use super::*;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Layout generator that derives every mine position from a seed string.
///
/// The seed text is hashed with SHA-256 and the digest keys a ChaCha20 stream, so the
/// same seed always yields the same board on every platform. Positions are drawn with a
/// partial Fisher-Yates shuffle over all cell indices, which keeps every index equally
/// likely and never repeats one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededLayoutGenerator {
    digest: [u8; 32],
}

impl SeededLayoutGenerator {
    pub fn new(seed: &str) -> Self {
        Self {
            digest: crate::seed::digest_str(seed),
        }
    }

    pub fn from_seed(seed: &Seed) -> Self {
        Self {
            digest: seed.digest(),
        }
    }
}

impl LayoutGenerator for SeededLayoutGenerator {
    fn select(&self, count: CellCount, total_cells: CellCount) -> Result<BTreeSet<CellIndex>> {
        check_mine_count(count, total_cells)?;

        let mut rng = ChaCha20Rng::from_seed(self.digest);
        let mut indices: Vec<CellIndex> = (0..total_cells).collect();
        let (chosen, _) = indices.partial_shuffle(&mut rng, usize::from(count));
        let mines: BTreeSet<CellIndex> = chosen.iter().copied().collect();

        // double check mine count
        if mines.len() != usize::from(count) {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                mines.len(),
                count
            );
        }
        Ok(mines)
    }
}

/// Picks `count` distinct mine positions out of `total_cells` from `seed`.
pub fn select_mines(
    seed: &str,
    count: CellCount,
    total_cells: CellCount,
) -> Result<BTreeSet<CellIndex>> {
    SeededLayoutGenerator::new(seed).select(count, total_cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_arguments_give_same_layout() {
        for count in MIN_MINES..=MAX_MINES {
            let first = select_mines("provably-fair", count, TOTAL_CELLS).unwrap();
            let _unrelated = select_mines("something else", 12, TOTAL_CELLS).unwrap();
            let second = select_mines("provably-fair", count, TOTAL_CELLS).unwrap();
            assert_eq!(first, second, "count {count}");
        }
    }

    #[test]
    fn layout_has_requested_size_within_bounds() {
        for count in MIN_MINES..=MAX_MINES {
            for seed in ["a", "b", "0123456789abcdef", "🙂 unicode"] {
                let mines = select_mines(seed, count, TOTAL_CELLS).unwrap();
                assert_eq!(mines.len(), usize::from(count));
                assert!(mines.iter().all(|&index| index < TOTAL_CELLS));
            }
        }
    }

    #[test]
    fn different_seeds_usually_differ() {
        let layouts: BTreeSet<BTreeSet<CellIndex>> = (0..20)
            .map(|n| select_mines(&format!("seed-{n}"), 5, TOTAL_CELLS).unwrap())
            .collect();
        assert!(layouts.len() > 1);
    }

    #[test]
    fn rejects_counts_outside_bounds() {
        assert_eq!(
            select_mines("x", 0, TOTAL_CELLS),
            Err(GameError::InvalidMineCount {
                count: 0,
                total: TOTAL_CELLS
            })
        );
        assert_eq!(
            select_mines("x", TOTAL_CELLS, TOTAL_CELLS),
            Err(GameError::InvalidMineCount {
                count: TOTAL_CELLS,
                total: TOTAL_CELLS
            })
        );
        assert!(select_mines("x", 1, TOTAL_CELLS).is_ok());
        assert!(select_mines("x", MAX_MINES, TOTAL_CELLS).is_ok());
    }

    #[test]
    fn seed_type_and_plain_text_agree() {
        let seed = Seed::parse("abc123").unwrap();
        assert_eq!(
            SeededLayoutGenerator::from_seed(&seed).select(7, TOTAL_CELLS),
            select_mines("abc123", 7, TOTAL_CELLS)
        );
    }

    #[test]
    fn padded_text_matches_the_parsed_seed() {
        let raw = " padded ";
        let from_text: Vec<CellIndex> = select_mines(raw, 5, TOTAL_CELLS)
            .unwrap()
            .into_iter()
            .collect();
        let config = GameConfig::new(Seed::parse(raw).unwrap(), 5).unwrap();
        assert_eq!(config.mine_positions().unwrap(), from_text);

        let mut grid = Grid::new();
        grid.generate_mines(raw, 5).unwrap();
        assert_eq!(grid.mine_positions(), from_text);
    }

    #[test]
    fn every_cell_can_hold_a_mine() {
        let mut seen = BTreeSet::new();
        for n in 0..500 {
            seen.extend(select_mines(&n.to_string(), 1, TOTAL_CELLS).unwrap());
        }
        assert_eq!(seen.len(), usize::from(TOTAL_CELLS));
    }

    #[test]
    fn fixed_layout_checks_its_contents() {
        let layout = FixedLayout(BTreeSet::from([0, 24]));
        assert_eq!(layout.select(2, TOTAL_CELLS).unwrap(), BTreeSet::from([0, 24]));
        assert!(layout.select(3, TOTAL_CELLS).is_err());

        let off_board = FixedLayout(BTreeSet::from([30]));
        assert_eq!(
            off_board.select(1, TOTAL_CELLS),
            Err(GameError::InvalidIndex(30))
        );
    }
}
