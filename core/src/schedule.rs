use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use web_time::Instant;

/// Handle for a task handed to a [`Scheduler`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

/// Delayed, cancellable one-shot tasks.
///
/// The scheduler only keeps time; whoever owns it hands each fired [`TaskId`] back to
/// the session for dispatch.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TaskId;

    /// Removes a pending task. Unknown or already fired tasks are ignored.
    fn cancel(&mut self, task: TaskId);

    /// Pops the earliest task whose deadline has passed.
    fn poll_due(&mut self) -> Option<TaskId>;

    fn has_pending(&self) -> bool;
}

/// Scheduler driven by a simulated clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    queue: BTreeSet<(Duration, TaskId)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the simulated clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Pops the earliest task due no later than `limit`, moving the clock to its deadline.
    pub fn pop_until(&mut self, limit: Duration) -> Option<TaskId> {
        let &(due, task) = self.queue.first()?;
        if due > limit {
            return None;
        }
        self.queue.remove(&(due, task));
        self.now = self.now.max(due);
        Some(task)
    }

    /// Moves the clock forward to `time` without firing anything.
    pub fn set_now(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TaskId {
        let task = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.insert((self.now + delay, task));
        task
    }

    fn cancel(&mut self, task: TaskId) {
        self.queue.retain(|&(_, pending)| pending != task);
    }

    fn poll_due(&mut self) -> Option<TaskId> {
        self.pop_until(self.now)
    }

    fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }
}

/// Scheduler backed by the real clock.
#[derive(Clone, Debug, Default)]
pub struct WallClockScheduler {
    next_id: u64,
    queue: BTreeSet<(Instant, TaskId)>,
}

impl WallClockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.first().map(|&(deadline, _)| deadline)
    }
}

impl Scheduler for WallClockScheduler {
    fn schedule(&mut self, delay: Duration) -> TaskId {
        let task = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.insert((Instant::now() + delay, task));
        task
    }

    fn cancel(&mut self, task: TaskId) {
        self.queue.retain(|&(_, pending)| pending != task);
    }

    fn poll_due(&mut self) -> Option<TaskId> {
        let &(deadline, task) = self.queue.first()?;
        if deadline > Instant::now() {
            return None;
        }
        self.queue.remove(&(deadline, task));
        Some(task)
    }

    fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }
}
