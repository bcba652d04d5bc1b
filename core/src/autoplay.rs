use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Why the auto player stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Stopped on request.
    Manual,
    /// The session was reset.
    Reset,
    /// The game reached a won or lost state.
    Finished,
    /// No hidden cell was left to pick.
    Exhausted,
}

/// What a single scheduler tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutoTick {
    /// The tick was not the driver's pending task and changed nothing.
    Stale,
    /// A cell was revealed. `stopped` is set when the driver ended itself afterwards.
    Revealed {
        index: CellIndex,
        outcome: RevealOutcome,
        stopped: Option<StopReason>,
    },
    /// The driver found nothing to do and stopped without revealing.
    Stopped(StopReason),
}

/// Reveals hidden cells one at a time, in ascending index order, on a fixed interval.
///
/// The driver is running exactly while it holds a pending task. A tick is honoured only
/// if it carries that task, so anything fired after a stop is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoPlayDriver {
    interval: Duration,
    pending: Option<TaskId>,
}

impl AutoPlayDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_task(&self) -> Option<TaskId> {
        self.pending
    }

    /// Returns `Ok(false)` if the driver was already running.
    pub fn start<S: Scheduler + ?Sized>(
        &mut self,
        engine: &PlayEngine,
        scheduler: &mut S,
    ) -> Result<bool> {
        engine.check_playable(Command::StartAuto)?;
        if self.is_running() {
            return Ok(false);
        }

        self.pending = Some(scheduler.schedule(self.interval));
        log::debug!("auto play started, every {:?}", self.interval);
        Ok(true)
    }

    /// Cancels the pending tick. Returns whether the driver was running.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.pending.take() {
            Some(task) => {
                scheduler.cancel(task);
                log::debug!("auto play stopped");
                true
            }
            None => false,
        }
    }

    pub fn on_tick<S: Scheduler + ?Sized>(
        &mut self,
        task: TaskId,
        engine: &mut PlayEngine,
        scheduler: &mut S,
    ) -> AutoTick {
        if self.pending != Some(task) {
            log::trace!("dropping stale auto tick {task:?}");
            return AutoTick::Stale;
        }
        self.pending = None;

        if !engine.state().is_playable() {
            return AutoTick::Stopped(StopReason::Finished);
        }
        let Some(index) = engine.next_hidden_cell() else {
            return AutoTick::Stopped(StopReason::Exhausted);
        };

        let outcome = match engine.reveal(index) {
            Ok(outcome) => outcome,
            Err(err) => {
                // the engine guards every transition, treat a refusal as the end of play
                log::warn!("auto reveal of cell {index} refused: {err}");
                return AutoTick::Stopped(StopReason::Finished);
            }
        };
        log::trace!("auto revealed cell {index}: {outcome:?}");

        let stopped = if outcome.ends_game() {
            Some(StopReason::Finished)
        } else if engine.next_hidden_cell().is_none() {
            Some(StopReason::Exhausted)
        } else {
            self.pending = Some(scheduler.schedule(self.interval));
            None
        };

        AutoTick::Revealed {
            index,
            outcome,
            stopped,
        }
    }
}
