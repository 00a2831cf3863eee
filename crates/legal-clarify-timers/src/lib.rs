#![warn(missing_docs)]
//! # legal-clarify-timers
//!
//! ## Purpose
//! Provides cancellable one-shot and interval timers driven by a logical
//! millisecond clock.
//!
//! ## Responsibilities
//! - Arm timers relative to a caller-supplied `now_ms`.
//! - Group timers under an owner key so an owner's pending work can be
//!   cancelled in one call.
//! - Release due timers one at a time in due order so handlers may arm or
//!   cancel other timers between fires.
//!
//! ## Data flow
//! The UI event loop reports the current time -> owner calls
//! [`TimerQueue::pop_due`] until it returns `None` -> each [`Fired`] value is
//! dispatched to the owner's handler at its own `due_ms`.
//!
//! ## Ownership and lifetimes
//! The queue owns keys and payloads. Interval payloads are cloned on each
//! fire; one-shot payloads are moved out.
//!
//! ## Error model
//! A zero-length interval would fire forever at one instant and is rejected
//! with [`TimerError::ZeroInterval`].

use thiserror::Error;

/// Handle of one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<K, E> {
    /// Handle of the timer that fired.
    pub id: TimerId,
    /// Owner key the timer was armed under.
    pub key: K,
    /// Logical time at which the timer was due.
    pub due_ms: u64,
    /// Payload supplied at arm time.
    pub event: E,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug, Clone)]
struct Entry<K, E> {
    id: TimerId,
    key: K,
    due_ms: u64,
    // Arm order; breaks ties between timers due at the same instant.
    seq: u64,
    repeat: Repeat,
    event: E,
}

/// Pending timers ordered by due time.
#[derive(Debug, Clone)]
pub struct TimerQueue<K, E> {
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry<K, E>>,
}

impl<K, E> TimerQueue<K, E>
where
    K: Clone + PartialEq,
    E: Clone,
{
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Arms a timer that fires once, `delay_ms` after `now_ms`.
    pub fn schedule_once(&mut self, key: K, now_ms: u64, delay_ms: u64, event: E) -> TimerId {
        self.arm(key, now_ms.saturating_add(delay_ms), Repeat::Once, event)
    }

    /// Arms a timer that fires every `interval_ms`, first at
    /// `now_ms + interval_ms`.
    ///
    /// # Errors
    /// Returns [`TimerError::ZeroInterval`] when `interval_ms == 0`.
    pub fn schedule_interval(
        &mut self,
        key: K,
        now_ms: u64,
        interval_ms: u64,
        event: E,
    ) -> Result<TimerId, TimerError> {
        if interval_ms == 0 {
            return Err(TimerError::ZeroInterval);
        }
        Ok(self.arm(
            key,
            now_ms.saturating_add(interval_ms),
            Repeat::Every(interval_ms),
            event,
        ))
    }

    /// Cancels one timer. Returns `true` when it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Cancels every timer armed under `key`. Returns how many were removed.
    pub fn cancel_key(&mut self, key: &K) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.key != key);
        before - self.entries.len()
    }

    /// Cancels every pending timer. Returns how many were removed.
    pub fn cancel_all(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Removes and returns the earliest timer due at or before `until_ms`.
    ///
    /// # Semantics
    /// - Timers are released in ascending `due_ms`; equal due times release in
    ///   arm order.
    /// - Interval timers are re-armed at `due_ms + interval` before returning,
    ///   so a caller looping until `None` observes every missed period.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<K, E>> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= until_ms)
            .min_by_key(|(_, entry)| (entry.due_ms, entry.seq))
            .map(|(index, _)| index)?;

        match self.entries[index].repeat {
            Repeat::Once => {
                let entry = self.entries.swap_remove(index);
                Some(Fired {
                    id: entry.id,
                    key: entry.key,
                    due_ms: entry.due_ms,
                    event: entry.event,
                })
            }
            Repeat::Every(interval_ms) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[index];
                let fired = Fired {
                    id: entry.id,
                    key: entry.key.clone(),
                    due_ms: entry.due_ms,
                    event: entry.event.clone(),
                };
                entry.due_ms = entry.due_ms.saturating_add(interval_ms);
                entry.seq = seq;
                Some(fired)
            }
        }
    }

    /// Earliest pending due time, if any.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.due_ms).min()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pending timers armed under `key`.
    pub fn pending_for(&self, key: &K) -> usize {
        self.entries.iter().filter(|entry| &entry.key == key).count()
    }

    fn arm(&mut self, key: K, due_ms: u64, repeat: Repeat, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            key,
            due_ms,
            seq,
            repeat,
            event,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<K, E> Default for TimerQueue<K, E>
where
    K: Clone + PartialEq,
    E: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Timer arming errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// Interval length must be positive.
    #[error("timer interval must be greater than zero")]
    ZeroInterval,
}

#[cfg(test)]
mod tests {
    //! Unit tests for due ordering and cancellation.

    use super::*;

    fn drain(
        queue: &mut TimerQueue<&'static str, &'static str>,
        until_ms: u64,
    ) -> Vec<(u64, &'static str)> {
        let mut fired = Vec::new();
        while let Some(timer) = queue.pop_due(until_ms) {
            fired.push((timer.due_ms, timer.event));
        }
        fired
    }

    #[test]
    fn releases_timers_in_due_order_with_interval_rearm() {
        let mut queue = TimerQueue::new();
        queue
            .schedule_interval("a", 0, 200, "tick")
            .expect("interval should arm");
        queue.schedule_once("a", 0, 500, "done");

        assert_eq!(
            drain(&mut queue, 650),
            vec![(200, "tick"), (400, "tick"), (500, "done"), (600, "tick")]
        );
        assert_eq!(queue.next_due_ms(), Some(800));
    }

    #[test]
    fn equal_due_times_release_in_arm_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_once("a", 0, 100, "first");
        queue.schedule_once("b", 50, 50, "second");
        assert_eq!(drain(&mut queue, 100), vec![(100, "first"), (100, "second")]);
    }

    #[test]
    fn cancel_by_key_removes_only_that_owner() {
        let mut queue = TimerQueue::new();
        queue.schedule_once("a", 0, 10, "a1");
        queue
            .schedule_interval("a", 0, 10, "a2")
            .expect("interval should arm");
        let keep = queue.schedule_once("b", 0, 10, "b1");

        assert_eq!(queue.cancel_key(&"a"), 2);
        assert_eq!(queue.pending_for(&"a"), 0);
        assert!(queue.cancel(keep));
        assert!(!queue.cancel(keep));
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut queue: TimerQueue<u8, ()> = TimerQueue::new();
        assert_eq!(
            queue.schedule_interval(1, 0, 0, ()),
            Err(TimerError::ZeroInterval)
        );
    }
}
