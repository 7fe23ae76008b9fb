//! Single-threaded queue of delayed, one-shot actions.
//!
//! The scheduler keeps its own clock. The event loop moves it forward with the time that passed,
//! tests move it forward by hand. Nothing runs by itself: the owner pops due actions and runs them
//! on its own turn.
//!
//! There is no way to cancel a scheduled action. Whoever runs an action must check that it still
//! makes sense.
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: Duration,
    action: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    // Sorted by due time. Actions due at the same time keep the order they were scheduled in.
    queue: VecDeque<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            queue: VecDeque::new(),
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, action: T) {
        let due = self.now + delay;
        let position = self.queue.partition_point(|s| s.due <= due);
        self.queue.insert(position, Scheduled { due, action });
    }

    /// Move the clock forward.
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    /// Move the clock to `now`. The clock never goes backwards.
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// The clock time at which the next action becomes due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.front().map(|s| s.due)
    }

    /// Take the next action whose delay has elapsed.
    pub fn pop_due(&mut self) -> Option<T> {
        if self.queue.front()?.due > self.now {
            return None;
        }
        self.queue.pop_front().map(|s| s.action)
    }

    /// Every action still waiting, to be updated in place. Due times stay as they are.
    pub fn pending_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.queue.iter_mut().map(|s| &mut s.action)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
