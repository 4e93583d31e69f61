//! Virtual time clock for deterministic testing.
//!
//! The browser schedules highlight removal with a real timer. Headless hosts
//! (tests, the CLI) use `TestClock` instead: timers are queued with their due
//! time and fire only when virtual time is advanced explicitly.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Entry for a pending one-shot timer.
#[derive(Debug, Clone)]
struct TimerEntry<T> {
    /// When the timer should fire (virtual time in ms)
    fire_at_ms: u64,
    /// Registration order, keeps equal deadlines FIFO
    sequence: u64,
    payload: T,
}

impl<T> PartialEq for TimerEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at_ms == other.fire_at_ms && self.sequence == other.sequence
    }
}

impl<T> Eq for TimerEntry<T> {}

impl<T> PartialOrd for TimerEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TimerEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earliest deadline first, then earliest registration
        other
            .fire_at_ms
            .cmp(&self.fire_at_ms)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Virtual time clock with one-shot timers carrying a payload.
pub struct TestClock<T> {
    current_time_ms: u64,
    next_sequence: u64,
    pending_timers: BinaryHeap<TimerEntry<T>>,
}

impl<T> TestClock<T> {
    /// Create a new TestClock starting at time 0.
    pub fn new() -> Self {
        Self {
            current_time_ms: 0,
            next_sequence: 0,
            pending_timers: BinaryHeap::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.current_time_ms
    }

    /// Queue `payload` to fire `delay_ms` after the current virtual time.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending_timers.push(TimerEntry {
            fire_at_ms: self.current_time_ms + delay_ms,
            sequence,
            payload,
        });
    }

    /// Advance virtual time by `ms`, returning every payload that came due in
    /// deadline order.
    pub fn advance_by(&mut self, ms: u64) -> Vec<T> {
        let target_time = self.current_time_ms + ms;
        let mut fired = Vec::new();
        while self
            .pending_timers
            .peek()
            .is_some_and(|entry| entry.fire_at_ms <= target_time)
        {
            if let Some(entry) = self.pending_timers.pop() {
                fired.push(entry.payload);
            }
        }
        self.current_time_ms = target_time;
        fired
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.pending_timers.is_empty()
    }

    /// Time until the next timer fires (if any).
    pub fn time_to_next_timer(&self) -> Option<u64> {
        self.pending_timers
            .peek()
            .map(|entry| entry.fire_at_ms.saturating_sub(self.current_time_ms))
    }
}

impl<T> Default for TestClock<T> {
    fn default() -> Self {
        Self::new()
    }
}
