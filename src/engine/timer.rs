// Deferred single-shot timers
//
// Timers are keyed by whatever the owner wants to identify them with
// (typically an actor id plus a tag). Setting a key that is already pending
// restarts it; there is never more than one pending timer per key.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

/// Negative and NaN delays fire at once, overly long ones never
fn seconds(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs.max(0.0)).unwrap_or(Duration::MAX)
}

/// A pending timer
#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    /// Time left until the timer fires
    remaining: Duration,
    /// Ordering key so timers firing in the same tick keep scheduling order
    sequence: u64,
}

/// Single-threaded timer facility drained once per simulation tick
#[derive(Debug)]
pub struct TimerManager<K> {
    timers: HashMap<K, PendingTimer>,
    next_sequence: u64,
}

impl<K: Copy + Eq + Hash> TimerManager<K> {
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Schedule `key` to fire after `delay` seconds, replacing any pending
    /// timer with the same key
    pub fn set_timer(&mut self, key: K, delay: f32) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.timers.insert(
            key,
            PendingTimer {
                remaining: seconds(delay),
                sequence,
            },
        );
    }

    /// Cancel a pending timer. Returns true if one was pending.
    pub fn clear_timer(&mut self, key: K) -> bool {
        self.timers.remove(&key).is_some()
    }

    /// Check whether a timer is pending for `key`
    pub fn is_timer_active(&self, key: K) -> bool {
        self.timers.contains_key(&key)
    }

    /// Seconds left before `key` fires
    pub fn remaining(&self, key: K) -> Option<f32> {
        self.timers.get(&key).map(|t| t.remaining.as_secs_f32())
    }

    /// Number of pending timers
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Advance all timers by `dt` and return the keys that fired, in the
    /// order they expired. Fired timers are removed.
    pub fn tick(&mut self, dt: f32) -> Vec<K> {
        let dt = seconds(dt);
        let mut fired: Vec<(Duration, u64, K)> = Vec::new();

        for (key, timer) in self.timers.iter_mut() {
            if timer.remaining <= dt {
                fired.push((dt - timer.remaining, timer.sequence, *key));
            } else {
                timer.remaining -= dt;
            }
        }

        for (_, _, key) in &fired {
            self.timers.remove(key);
        }

        // Most overdue first, then scheduling order
        fired.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, key)| key).collect()
    }
}

impl<K: Copy + Eq + Hash> Default for TimerManager<K> {
    fn default() -> Self {
        Self::new()
    }
}
