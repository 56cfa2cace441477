/*!
 * Seed-Marker Walker
 *
 * Each memoized value records the lowest seed seen passing through it.
 *
 * - Own marker on a value about to be claimed: the seed is looping
 *   (`CycleInvariantViolation`).
 * - Unset or higher marker: claim the value and keep going.
 * - Lower marker: that seed already owns the rest of the chain. Without
 *   length tracking the walk is pruned. With tracking the walk keeps
 *   stepping unmemoized, since a marker says nothing about chain length.
 */

use super::traits::ChainWalker;
use super::types::{WalkOutcome, WalkResult};
use crate::collatz::{checked_step, is_power_of_two, power_of_two_exponent};
use crate::core::errors::WalkFailure;
use crate::core::hints::{likely, unlikely};
use crate::core::types::{ChainLength, Seed};
use crate::memo::{MemoEncoding, MemoTable, SlotUpdate};

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedMarkerWalker;

impl ChainWalker for SeedMarkerWalker {
    #[inline]
    fn encoding(&self) -> MemoEncoding {
        MemoEncoding::SeedMarker
    }

    fn walk(&self, seed: Seed, memo: &MemoTable, track_length: bool) -> WalkResult {
        debug_assert!(seed > 0, "seeds are positive");

        let mut itr = seed;
        let mut steps: ChainLength = 0;
        let mut claiming = true;

        while !is_power_of_two(itr) {
            if likely(claiming) {
                match memo.try_update(itr, seed, MemoEncoding::SeedMarker) {
                    SlotUpdate::Claimed | SlotUpdate::Uncovered => {}
                    SlotUpdate::Held { current } if unlikely(current == seed) => {
                        return Err(WalkFailure::cycle(seed, itr));
                    }
                    SlotUpdate::Held { .. } => {
                        if !track_length {
                            return Ok(WalkOutcome::Pruned { steps });
                        }
                        claiming = false;
                    }
                }
            }

            itr = match checked_step(itr) {
                Some(next) => next,
                None => return Err(WalkFailure::overflow(seed, itr)),
            };
            steps += 1;
        }

        Ok(WalkOutcome::Terminated {
            length: steps + power_of_two_exponent(itr),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::FailureKind;

    fn walk(seed: Seed, memo: &MemoTable) -> WalkResult {
        SeedMarkerWalker.walk(seed, memo, true)
    }

    #[test]
    fn test_known_lengths_without_memo() {
        let memo = MemoTable::disabled();
        assert_eq!(walk(1, &memo), Ok(WalkOutcome::Terminated { length: 0 }));
        assert_eq!(walk(9, &memo), Ok(WalkOutcome::Terminated { length: 19 }));
        assert_eq!(walk(27, &memo), Ok(WalkOutcome::Terminated { length: 111 }));
        assert_eq!(walk(1 << 20, &memo), Ok(WalkOutcome::Terminated { length: 20 }));
    }

    #[test]
    fn test_claims_values_along_the_chain() {
        let memo = MemoTable::new(64);
        walk(9, &memo).unwrap();

        // 9, 28, 14, 7, 22, 11, 34, 17, 52, 26, 13, 40, 20, 10, 5 (then 16)
        for value in [9, 28, 14, 7, 22, 11, 34, 17, 52, 26, 13, 40, 20, 10, 5] {
            assert_eq!(memo.read(value), 9, "value {}", value);
        }
        assert_eq!(memo.read(16), 0);
    }

    #[test]
    fn test_lower_marker_keeps_length_when_tracking() {
        let memo = MemoTable::new(64);
        walk(7, &memo).unwrap();

        // 14 -> 7 is owned by seed 7, but 14 still needs its exact length
        assert_eq!(walk(14, &memo), Ok(WalkOutcome::Terminated { length: 17 }));
        assert_eq!(memo.read(14), 14);
    }

    #[test]
    fn test_lower_marker_prunes_without_tracking() {
        let memo = MemoTable::new(64);
        SeedMarkerWalker.walk(7, &memo, false).unwrap();

        assert_eq!(
            SeedMarkerWalker.walk(14, &memo, false),
            Ok(WalkOutcome::Pruned { steps: 1 })
        );
    }

    #[test]
    fn test_own_marker_is_a_cycle() {
        let memo = MemoTable::new(64);
        // 11 is on the chain of 7: 7, 22, 11, ...
        memo.store(11, 7);

        let failure = walk(7, &memo).unwrap_err();
        assert_eq!(failure.seed, 7);
        assert_eq!(failure.value, 11);
        assert_eq!(failure.kind, FailureKind::CycleInvariantViolation);
    }

    #[test]
    fn test_overflow_is_reported() {
        let memo = MemoTable::disabled();
        let seed = u64::MAX - 2; // odd, 3n+1 overflows immediately
        let failure = walk(seed, &memo).unwrap_err();
        assert_eq!(failure.kind, FailureKind::StepOverflow);
        assert_eq!(failure.seed, seed);
    }
}
