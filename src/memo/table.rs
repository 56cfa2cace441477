/*!
 * Shared Memo Table
 *
 * Fixed-capacity array of relaxed atomics shared by every worker of a run.
 *
 * # Race Tolerance
 *
 * `try_update` is a plain load, compare, store sequence. It is not a
 * compare-and-swap: two workers can both read a slot, both decide to write,
 * and the last physical store wins whichever candidate was better. Nothing
 * in the engine depends on a slot holding the best candidate:
 *
 * - Seed-marker: every seed is still walked to termination by exactly one
 *   worker, so a lost claim only means some later walk does not prune where
 *   it could have.
 * - Length: every stored value was written by a walk that went on past that
 *   value. A lost update leaves a slot lower than the truth, which only
 *   weakens pruning. Pruning against any stored value stays sound.
 *
 * The only ordering the engine needs is the join barrier at the end of the
 * run, which synchronizes all workers anyway.
 */

use super::encoding::MemoEncoding;
use std::sync::atomic::{AtomicU64, Ordering};

/// Result of offering a candidate to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUpdate {
    /// The candidate won and was stored
    Claimed,
    /// The existing value won and was left in place
    Held { current: u64 },
    /// The value lies outside the table and is walked unmemoized
    Uncovered,
}

/// Shared memo table indexed by chain value
pub struct MemoTable {
    slots: Box<[AtomicU64]>,
}

impl MemoTable {
    /// Create a zeroed table covering values `0..capacity`
    ///
    /// A capacity of 0 disables memoization entirely.
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| AtomicU64::new(0)).collect();
        Self { slots }
    }

    /// Table with no slots
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Number of slots (values `0..capacity` are memoized)
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether `value` has a slot
    #[inline(always)]
    pub fn covers(&self, value: u64) -> bool {
        value < self.slots.len() as u64
    }

    #[inline(always)]
    fn slot(&self, value: u64) -> Option<&AtomicU64> {
        usize::try_from(value)
            .ok()
            .and_then(|index| self.slots.get(index))
    }

    /// Current slot value, 0 if never written or not covered
    #[inline(always)]
    pub fn read(&self, value: u64) -> u64 {
        self.slot(value)
            .map(|slot| slot.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Offer `candidate` for the slot of `value` under `encoding`'s merge rule
    ///
    /// # Performance
    /// Hot path - one relaxed load and at most one relaxed store, no RMW
    #[inline(always)]
    pub fn try_update(&self, value: u64, candidate: u64, encoding: MemoEncoding) -> SlotUpdate {
        let Some(slot) = self.slot(value) else {
            return SlotUpdate::Uncovered;
        };

        let current = slot.load(Ordering::Relaxed);
        if encoding.wins(candidate, current) {
            slot.store(candidate, Ordering::Relaxed);
            SlotUpdate::Claimed
        } else {
            SlotUpdate::Held { current }
        }
    }

    /// Raw store, bypassing merge rules
    ///
    /// Returns false if `value` is not covered. Used to seed or corrupt
    /// table state before a run.
    pub fn store(&self, value: u64, slot_value: u64) -> bool {
        match self.slot(value) {
            Some(slot) => {
                slot.store(slot_value, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Count of non-zero slots
    ///
    /// Linear scan, only meant for end-of-run diagnostics.
    pub fn occupied(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.load(Ordering::Relaxed) != 0)
            .count()
    }
}

impl std::fmt::Debug for MemoTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoTable")
            .field("capacity", &self.capacity())
            .finish()
    }
}
