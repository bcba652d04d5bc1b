use thiserror::Error;

use crate::{CellCount, CellIndex, Command, GameState};

/// Broad classification of a [`GameError`], used by front ends to pick feedback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration input was out of bounds.
    Validation,
    /// A cell index fell outside the board.
    Range,
    /// The command is not valid in the current game state.
    State,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Mine count {count} must be between 1 and {max}", max = .total.saturating_sub(1))]
    InvalidMineCount { count: CellCount, total: CellCount },
    #[error("Cell index {0} is outside the board")]
    InvalidIndex(CellIndex),
    #[error("Cell {0} is already revealed")]
    AlreadyRevealed(CellIndex),
    #[error("Cannot {command} while the game is {state}")]
    InvalidState { command: Command, state: GameState },
    #[error("Invalid settings: {0}")]
    InvalidSettings(&'static str),
}

impl GameError {
    pub const fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            InvalidMineCount { .. } | InvalidSettings(_) => ErrorKind::Validation,
            InvalidIndex(_) => ErrorKind::Range,
            AlreadyRevealed(_) | InvalidState { .. } => ErrorKind::State,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
