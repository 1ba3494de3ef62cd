//! Deferred actions: schedule now, run later, cancel in between.
//!
//! Time is a monotonic [`Duration`] measured from session start. The queue
//! never reads a clock itself; whoever drives the session advances time,
//! either from a real timer or by hand in tests.

use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Work the session performs after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Let the computer take its turn.
    ComputerMove,
    /// Answer a chat message.
    AssistantReply {
        /// The user's message, answered against the game as it is when the
        /// reply is delivered.
        message: String,
    },
}

/// Identifies a scheduled action so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Schedule-then-callback contract for deferred actions.
pub trait Scheduler {
    /// Queues `action` to run once time reaches `at`.
    fn schedule(&mut self, at: Duration, action: Deferred) -> TaskHandle;

    /// Drops a queued action. Returns false if it already ran or was cancelled.
    fn cancel(&mut self, handle: TaskHandle) -> bool;

    /// Earliest deadline still queued.
    fn next_deadline(&self) -> Option<Duration>;

    /// Removes and returns the next action due at or before `now`.
    fn pop_due(&mut self, now: Duration) -> Option<(TaskHandle, Deferred)>;

    /// Number of queued actions.
    fn pending(&self) -> usize;
}

/// Cooperative [`Scheduler`]: actions run in deadline order, ties in the
/// order they were scheduled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    tasks: BTreeMap<(Duration, u64), Deferred>,
}

impl TimerQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for TimerQueue {
    #[instrument(skip(self))]
    fn schedule(&mut self, at: Duration, action: Deferred) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.insert((at, id), action);
        debug!(id, queued = self.tasks.len(), "Scheduled deferred action");
        TaskHandle(id)
    }

    #[instrument(skip(self))]
    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let key = self.tasks.keys().find(|(_, id)| *id == handle.0).copied();
        match key {
            Some(key) => {
                self.tasks.remove(&key);
                debug!("Cancelled deferred action");
                true
            }
            None => false,
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.tasks.keys().next().map(|(at, _)| *at)
    }

    fn pop_due(&mut self, now: Duration) -> Option<(TaskHandle, Deferred)> {
        let (&(at, id), _) = self.tasks.first_key_value()?;
        if at > now {
            return None;
        }
        self.tasks
            .remove(&(at, id))
            .map(|action| (TaskHandle(id), action))
    }

    fn pending(&self) -> usize {
        self.tasks.len()
    }
}
