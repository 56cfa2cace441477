/*!
 * Lock-Guarded Global Best
 * Check, lock, re-check updates of the longest chain seen so far
 */

use crate::core::types::{ChainLength, ChainRecord, Seed};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Longest chain reported by any worker
///
/// # Performance
/// - Cache-line aligned so the hot atomic does not share a line with memo data
/// - Non-record offers cost one relaxed load and never touch the lock
#[repr(C, align(64))]
pub struct MaxTracker {
    /// Relaxed mirror of `best.length` for the unlocked fast path
    best_length: AtomicU32,
    best: Mutex<ChainRecord>,
}

impl MaxTracker {
    /// Tracker starting at seed 1 / length 0
    pub fn new() -> Self {
        let record = ChainRecord::default();
        Self {
            best_length: AtomicU32::new(record.length),
            best: Mutex::new(record),
        }
    }

    /// Offer a terminated walk; returns true if it became the new record
    ///
    /// # Performance
    /// Hot path - called once per terminated seed
    #[inline]
    pub fn offer(&self, seed: Seed, length: ChainLength) -> bool {
        if length <= self.best_length.load(Ordering::Relaxed) {
            return false;
        }

        let mut best = self.best.lock();
        // Another worker may have raised the record since the unlocked check
        if length <= best.length {
            return false;
        }

        *best = ChainRecord::new(seed, length);
        self.best_length.store(length, Ordering::Relaxed);
        true
    }

    /// Current record
    pub fn snapshot(&self) -> ChainRecord {
        *self.best.lock()
    }
}

impl Default for MaxTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MaxTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaxTracker")
            .field("best", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_at_seed_one() {
        let tracker = MaxTracker::new();
        assert_eq!(tracker.snapshot(), ChainRecord::new(1, 0));
    }

    #[test]
    fn test_only_strictly_longer_offers_win() {
        let tracker = MaxTracker::new();
        assert!(tracker.offer(3, 7));
        assert!(!tracker.offer(6, 7));
        assert!(!tracker.offer(5, 5));
        assert!(tracker.offer(9, 19));
        assert_eq!(tracker.snapshot(), ChainRecord::new(9, 19));
    }

    #[test]
    fn test_concurrent_offers_keep_the_maximum() {
        let tracker = Arc::new(MaxTracker::new());
        let mut handles = vec![];

        for worker in 0..8u64 {
            let tracker = Arc::clone(&tracker);
            handles.push(thread::spawn(move || {
                for i in 0..1000u64 {
                    let seed = worker * 1000 + i + 1;
                    tracker.offer(seed, (seed % 997) as ChainLength);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let best = tracker.snapshot();
        assert_eq!(best.length, 996);
        assert_eq!(best.seed % 997, 996);
    }
}
