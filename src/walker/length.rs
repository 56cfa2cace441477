/*!
 * Length Walker
 *
 * Each memoized value records 1 + the largest step count at which a walk
 * that went on past it arrived there (0 = unvisited).
 *
 * Arriving at a value with `steps + 1 <= slot` means some other walk got
 * there with at least as many steps and continued, so its chain is at least
 * as long as this one. That walk either reports its length or is itself
 * dominated further down, so this seed can be pruned without losing the
 * maximum.
 */

use super::traits::ChainWalker;
use super::types::{WalkOutcome, WalkResult};
use crate::collatz::{checked_step, is_power_of_two, power_of_two_exponent};
use crate::core::errors::WalkFailure;
use crate::core::types::{ChainLength, Seed};
use crate::memo::{MemoEncoding, MemoTable, SlotUpdate};

#[derive(Debug, Clone, Copy, Default)]
pub struct LengthWalker;

impl ChainWalker for LengthWalker {
    #[inline]
    fn encoding(&self) -> MemoEncoding {
        MemoEncoding::Length
    }

    /// Pruning here certifies non-maximality, so `track_length` does not
    /// change the walk itself.
    fn walk(&self, seed: Seed, memo: &MemoTable, _track_length: bool) -> WalkResult {
        debug_assert!(seed > 0, "seeds are positive");

        let mut itr = seed;
        let mut steps: ChainLength = 0;

        while !is_power_of_two(itr) {
            let depth = u64::from(steps) + 1;
            if let SlotUpdate::Held { .. } = memo.try_update(itr, depth, MemoEncoding::Length) {
                return Ok(WalkOutcome::Pruned { steps });
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
