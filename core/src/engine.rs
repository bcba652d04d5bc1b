use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Idle,
    Predicted,
    Revealing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether reveals are currently accepted.
    pub const fn is_playable(self) -> bool {
        matches!(self, Self::Predicted | Self::Revealing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Predicted => "predicted",
            Self::Revealing => "revealing",
            Self::Won => "won",
            Self::Lost => "lost",
        })
    }
}

/// Commands that can be refused because of the current [`GameState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Predict,
    Reveal,
    StartAuto,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Predict => "predict",
            Self::Reveal => "reveal a cell",
            Self::StartAuto => "start auto play",
        })
    }
}

/// Result of a reveal the engine accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Safe,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn ends_game(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

/// The reveal state machine. Owns the grid and is its only writer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    grid: Grid,
    config: Option<GameConfig>,
    state: GameState,
    triggered_mine: Option<CellIndex>,
}

impl Default for PlayEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayEngine {
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            config: None,
            state: GameState::Idle,
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    /// Current odds, only while the board is still being played.
    pub fn snapshot(&self) -> Option<ProbabilitySnapshot> {
        if self.state.is_playable() {
            ProbabilitySnapshot::from_grid(&self.grid)
        } else {
            None
        }
    }

    /// Next cell the auto player would pick: the lowest hidden index.
    pub fn next_hidden_cell(&self) -> Option<CellIndex> {
        self.grid.next_hidden()
    }

    /// Commits `config` and lays out its mines.
    pub fn predict(&mut self, config: GameConfig) -> Result<()> {
        let generator = SeededLayoutGenerator::from_seed(&config.seed);
        self.predict_with(config, &generator)
    }

    /// Like [`predict`](Self::predict), with mine positions taken from `generator`.
    pub fn predict_with<G: LayoutGenerator + ?Sized>(
        &mut self,
        config: GameConfig,
        generator: &G,
    ) -> Result<()> {
        self.check_can_predict()?;
        config.validate()?;
        self.grid.apply_layout(generator, config.mines)?;

        log::debug!(
            "predicted {} mines from seed {:?}",
            config.mines,
            config.seed.as_str()
        );
        self.config = Some(config);
        self.triggered_mine = None;
        self.state = GameState::Predicted;
        Ok(())
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        if !is_valid_index(index) {
            return Err(GameError::InvalidIndex(index));
        }
        self.check_playable(Command::Reveal)?;

        let outcome = match self.grid.reveal_cell(index)? {
            CellReveal::AlreadyRevealed => return Err(GameError::AlreadyRevealed(index)),
            CellReveal::Mine => {
                self.triggered_mine = Some(index);
                self.state = GameState::Lost;
                RevealOutcome::HitMine
            }
            CellReveal::Safe if self.grid.hidden_safe_count() == 0 => {
                self.state = GameState::Won;
                RevealOutcome::Won
            }
            CellReveal::Safe => {
                self.state = GameState::Revealing;
                RevealOutcome::Safe
            }
        };

        log::debug!("reveal {index}: {outcome:?}, now {}", self.state);
        Ok(outcome)
    }

    /// Drops the grid and configuration. Valid from any state.
    pub fn reset(&mut self) {
        self.grid.create_grid();
        self.config = None;
        self.triggered_mine = None;
        self.state = GameState::Idle;
    }

    pub(crate) fn check_playable(&self, command: Command) -> Result<()> {
        if self.state.is_playable() {
            Ok(())
        } else {
            Err(GameError::InvalidState {
                command,
                state: self.state,
            })
        }
    }

    pub(crate) fn check_can_predict(&self) -> Result<()> {
        if self.state.is_idle() || self.state.is_finished() {
            Ok(())
        } else {
            Err(GameError::InvalidState {
                command: Command::Predict,
                state: self.state,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn config(mines: CellCount) -> GameConfig {
        let seed = Seed::parse("engine-tests").unwrap();
        GameConfig::new(seed, mines).unwrap()
    }

    fn engine_with(mines: &[CellIndex]) -> PlayEngine {
        let mut engine = PlayEngine::new();
        let layout = FixedLayout(mines.iter().copied().collect::<BTreeSet<_>>());
        engine
            .predict_with(config(mines.len() as CellCount), &layout)
            .unwrap();
        engine
    }

    #[test]
    fn starts_idle_without_snapshot() {
        let engine = PlayEngine::new();

        assert_eq!(engine.state(), GameState::Idle);
        assert_eq!(engine.snapshot(), None);
        assert_eq!(engine.config(), None);
    }

    #[test]
    fn predict_commits_layout() {
        let mut engine = PlayEngine::new();
        engine.predict(config(5)).unwrap();

        assert_eq!(engine.state(), GameState::Predicted);
        assert_eq!(engine.grid().total_mines(), 5);
        assert_eq!(engine.config().unwrap().mines, 5);
        let expected = select_mines("engine-tests", 5, TOTAL_CELLS).unwrap();
        assert_eq!(
            engine
                .grid()
                .mine_positions()
                .into_iter()
                .collect::<BTreeSet<_>>(),
            expected
        );
    }

    #[test]
    fn predict_rejects_bad_mine_counts_without_change() {
        let mut engine = PlayEngine::new();
        let seed = Seed::parse("x").unwrap();

        for mines in [0, 25, 200] {
            let bad = GameConfig {
                seed: seed.clone(),
                mines,
            };
            let err = engine.predict(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(engine, PlayEngine::new());
        }

        let lowest = GameConfig {
            seed: seed.clone(),
            mines: 1,
        };
        engine.predict(lowest).unwrap();
        engine.reset();
        engine.predict(GameConfig { seed, mines: 24 }).unwrap();
        assert_eq!(engine.grid().total_mines(), 24);
    }

    #[test]
    fn predict_mid_game_is_refused() {
        let mut engine = engine_with(&[0]);
        assert_eq!(
            engine.predict(config(3)),
            Err(GameError::InvalidState {
                command: Command::Predict,
                state: GameState::Predicted
            })
        );

        engine.reveal(1).unwrap();
        let before = engine.clone();
        assert!(engine.predict(config(3)).is_err());
        assert_eq!(engine, before);
    }

    #[test]
    fn predict_again_after_game_over() {
        let mut engine = engine_with(&[0]);
        engine.reveal(0).unwrap();
        assert_eq!(engine.state(), GameState::Lost);

        engine.predict(config(4)).unwrap();
        assert_eq!(engine.state(), GameState::Predicted);
        assert_eq!(engine.grid().hidden_count(), 25);
        assert_eq!(engine.triggered_mine(), None);
    }

    #[test]
    fn reveal_hits_mine_and_locks_board() {
        let mut engine = engine_with(&[6]);
        engine.reveal(0).unwrap();

        assert_eq!(engine.reveal(6).unwrap(), RevealOutcome::HitMine);
        assert_eq!(engine.state(), GameState::Lost);
        assert_eq!(engine.triggered_mine(), Some(6));
        assert_eq!(engine.snapshot(), None);

        let before = engine.clone();
        let err = engine.reveal(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(engine, before);
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let mines = [3, 17];
        let mut engine = engine_with(&mines);

        let safe: Vec<CellIndex> = all_indices().filter(|i| !mines.contains(i)).collect();
        let (last, rest) = safe.split_last().unwrap();
        for &index in rest {
            assert_eq!(engine.reveal(index).unwrap(), RevealOutcome::Safe);
            assert_eq!(engine.state(), GameState::Revealing);
        }
        assert_eq!(engine.reveal(*last).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.state(), GameState::Won);
        assert!(engine.is_finished());
        assert!(engine.reveal(3).is_err());
    }

    #[test]
    fn single_safe_cell_wins_on_first_reveal() {
        let mines: Vec<CellIndex> = (0..24).collect();
        let mut engine = engine_with(&mines);

        let snapshot = engine.snapshot().unwrap();
        assert_eq!(snapshot.win_probability, 0.04);
        assert_eq!(engine.reveal(24).unwrap(), RevealOutcome::Won);
    }

    #[test]
    fn repeated_reveal_is_a_state_error() {
        let mut engine = engine_with(&[9]);
        engine.reveal(2).unwrap();
        let before = engine.clone();

        assert_eq!(engine.reveal(2), Err(GameError::AlreadyRevealed(2)));
        assert_eq!(engine, before);
    }

    #[test]
    fn reveal_checks_range_then_state() {
        let mut idle = PlayEngine::new();
        assert_eq!(idle.reveal(25), Err(GameError::InvalidIndex(25)));
        assert_eq!(
            idle.reveal(0),
            Err(GameError::InvalidState {
                command: Command::Reveal,
                state: GameState::Idle
            })
        );
    }

    #[test]
    fn multiplier_strictly_increases_with_each_safe_reveal() {
        for mines in MIN_MINES..=MAX_MINES {
            let mut engine = PlayEngine::new();
            engine.predict(config(mines)).unwrap();
            let safe: Vec<CellIndex> = engine
                .grid()
                .cells()
                .filter(|cell| !cell.is_mine)
                .map(|cell| cell.index)
                .collect();

            let mut previous = engine.snapshot().unwrap().actual_multiplier;
            for &index in &safe[..safe.len() - 1] {
                engine.reveal(index).unwrap();
                let current = engine.snapshot().unwrap();
                assert_eq!(current.mines_remaining, mines);
                assert!(current.actual_multiplier > previous, "mines {mines}");
                previous = current.actual_multiplier;
            }
        }
    }

    #[test]
    fn reset_returns_to_idle_from_anywhere() {
        let mut engine = engine_with(&[0]);
        engine.reveal(0).unwrap();
        engine.reset();

        assert_eq!(engine, PlayEngine::new());
        engine.reset();
        assert_eq!(engine.state(), GameState::Idle);
    }
}
