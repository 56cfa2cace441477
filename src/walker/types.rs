/*!
 * Walker Types
 */

use crate::core::errors::WalkFailure;
use crate::core::types::ChainLength;

/// Terminal state of a walk that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Reached a power of two; `length` is the exact chain length
    Terminated { length: ChainLength },
    /// Stopped early after `steps` steps; the seed cannot set a new record
    Pruned { steps: ChainLength },
}

/// Outcome of a walk, or the reason it failed
pub type WalkResult = Result<WalkOutcome, WalkFailure>;
