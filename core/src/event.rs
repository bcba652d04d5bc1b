use serde::{Deserialize, Serialize};

use crate::*;

/// State-change notification emitted by a [`Session`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Predicted {
        seed: Seed,
        origin: SeedOrigin,
        mines: CellCount,
    },
    Revealed {
        index: CellIndex,
        outcome: RevealOutcome,
        auto: bool,
    },
    StateChanged {
        from: GameState,
        to: GameState,
    },
    AutoStarted,
    AutoStopped {
        reason: StopReason,
    },
    Reset,
}

/// Receives [`SessionEvent`]s, e.g. to redraw a board or play a sound.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F: FnMut(&SessionEvent)> SessionObserver for F {
    fn on_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}
