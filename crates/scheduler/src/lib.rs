//! # Scheduler Crate
//!
//! Single-threaded event loop for the demo page: a macro-task queue and
//! one-shot timers on a virtual millisecond clock. Time only moves when the
//! owner advances it, so timer-driven behavior is reproducible in tests.

#![forbid(unsafe_code)]

use std::collections::VecDeque;

use tracing::debug;

// ─────────────────────────────────────────────────────────────────────────────
// TimerId
// ─────────────────────────────────────────────────────────────────────────────

/// Handle returned by [`EventLoop::set_timeout`], usable for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

// ─────────────────────────────────────────────────────────────────────────────
// TimerEntry
// ─────────────────────────────────────────────────────────────────────────────

struct TimerEntry<T> {
    id: TimerId,
    /// Absolute virtual time (ms) at which the timer fires.
    fire_at: u64,
    task: T,
}

// ─────────────────────────────────────────────────────────────────────────────
// EventLoop
// ─────────────────────────────────────────────────────────────────────────────

/// A cooperative event loop over tasks of type `T`.
///
/// The owner pulls work with [`next_due`](EventLoop::next_due), runs it
/// (possibly scheduling more work), and repeats. Posted tasks run before
/// timers; timers run in deadline order, ties broken by scheduling order.
pub struct EventLoop<T> {
    macro_queue: VecDeque<T>,
    timers: Vec<TimerEntry<T>>,
    now: u64,
    next_timer_id: u64,
}

impl<T> EventLoop<T> {
    pub fn new() -> Self {
        Self {
            macro_queue: VecDeque::new(),
            timers: Vec::new(),
            now: 0,
            next_timer_id: 1,
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Enqueue a task to run on the next pull, without advancing time.
    pub fn post_task(&mut self, task: T) {
        self.macro_queue.push_back(task);
    }

    /// Schedule `task` to run `delay_ms` after the current time.
    pub fn set_timeout(&mut self, task: T, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        let fire_at = self.now.saturating_add(delay_ms);
        debug!(?id, delay_ms, fire_at, "set_timeout");
        self.timers.push(TimerEntry { id, fire_at, task });
        id
    }

    /// Cancel a pending timer. Returns the task if it had not fired yet.
    pub fn clear_timer(&mut self, id: TimerId) -> Option<T> {
        let pos = self.timers.iter().position(|t| t.id == id)?;
        debug!(?id, "clear_timer");
        Some(self.timers.remove(pos).task)
    }

    /// Pop the next unit of work due at or before `until`.
    ///
    /// Posted tasks are returned first. Otherwise the earliest timer with a
    /// deadline `<= until` is removed and the clock moves to its deadline.
    /// Returns `None` once nothing more is due.
    pub fn next_due(&mut self, until: u64) -> Option<T> {
        if let Some(task) = self.macro_queue.pop_front() {
            return Some(task);
        }
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.fire_at <= until)
            .min_by_key(|(_, t)| (t.fire_at, t.id))
            .map(|(i, _)| i)?;
        let entry = self.timers.remove(pos);
        self.now = self.now.max(entry.fire_at);
        debug!(id = ?entry.id, now = self.now, "timer fired");
        Some(entry.task)
    }

    /// Move the clock forward to `time`. Moving backwards is ignored.
    ///
    /// Call after draining [`next_due`](EventLoop::next_due) for the same
    /// bound, otherwise overdue timers are left behind.
    pub fn advance_clock(&mut self, time: u64) {
        self.now = self.now.max(time);
    }

    /// Earliest timer deadline, if any timers are active.
    pub fn next_timer_deadline(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.fire_at).min()
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }
}

impl<T> Default for EventLoop<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
