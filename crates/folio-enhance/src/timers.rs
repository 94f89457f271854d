//! Timer queue
//!
//! Virtual-time `setTimeout`/`clearTimeout`. The owner keeps the clock and
//! asks for due tasks after advancing it, which keeps every delay testable
//! without sleeping.

use std::collections::HashMap;
use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<T> {
    due: Duration,
    task: T,
}

/// One-shot timers carrying a task payload
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    timers: HashMap<TimerId, Timer<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            timers: HashMap::new(),
        }
    }

    /// Schedule `task` to run `delay` after `now`
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, Timer { due: now + delay, task });
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Remove and return every task due at `now`, earliest first.
    /// Timers due at the same instant run in scheduling order.
    pub fn take_due(&mut self, now: Duration) -> Vec<T> {
        let mut due: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(id, t)| (t.due, *id))
            .collect();
        due.sort();

        due.into_iter()
            .filter_map(|(_, id)| self.timers.remove(&id).map(|t| t.task))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
