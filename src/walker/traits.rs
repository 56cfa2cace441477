/*!
 * Walker Traits
 * Interface shared by the memo encodings
 */

use super::types::WalkResult;
use crate::core::types::Seed;
use crate::memo::{MemoEncoding, MemoTable};

/// Walks a single seed to a terminal state
///
/// Implementations must walk every seed they are given to `Terminated`
/// whenever `track_length` is set and their encoding cannot prove the seed
/// is not a record.
pub trait ChainWalker: Send + Sync {
    /// Memo encoding this walker reads and writes
    fn encoding(&self) -> MemoEncoding;

    /// Walk `seed` (which must be positive)
    fn walk(&self, seed: Seed, memo: &MemoTable, track_length: bool) -> WalkResult;
}
