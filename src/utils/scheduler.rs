//! Deferred task queue
//!
//! A [`Scheduler`] holds tasks keyed by the clock time they become due.
//! Nothing runs on its own: the owner polls [`Scheduler::pop_due`] once per
//! frame and handles whatever has come due. Tasks due at the same instant
//! come out in the order they were scheduled.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled task, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Time-ordered queue of pending tasks
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    queue: BTreeMap<(Duration, u64), T>,
    due_by_id: HashMap<u64, Duration>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            queue: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }

    /// Schedule `task` to become due at the absolute time `due`
    pub fn schedule_at(&mut self, due: Duration, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.insert((due, id), task);
        self.due_by_id.insert(id, due);
        TimerId(id)
    }

    /// Schedule `task` to become due `delay` after `now`
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, task: T) -> TimerId {
        self.schedule_at(now + delay, task)
    }

    /// Cancel a pending task, returning it if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let due = self.due_by_id.remove(&id.0)?;
        self.queue.remove(&(due, id.0))
    }

    /// Remove and return the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, T)> {
        let (&(due, id), _) = self.queue.first_key_value()?;
        if due > now {
            return None;
        }
        self.due_by_id.remove(&id);
        self.queue.remove(&(due, id)).map(|task| (due, task))
    }

    /// Time the earliest pending task becomes due
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.queue.clear();
        self.due_by_id.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
