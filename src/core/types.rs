/*!
 * Core Types
 * Common types used across the engine
 */

use serde::{Deserialize, Serialize};

/// Seed value (a positive integer in the range under test)
pub type Seed = u64;

/// Number of Collatz map applications needed to reach 1
pub type ChainLength = u32;

/// Index of a worker thread within a run
pub type WorkerId = usize;

/// A seed together with its chain length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRecord {
    pub seed: Seed,
    pub length: ChainLength,
}

impl ChainRecord {
    #[inline]
    pub const fn new(seed: Seed, length: ChainLength) -> Self {
        Self { seed, length }
    }
}

impl Default for ChainRecord {
    /// Seed 1 is part of every valid range and has chain length 0
    fn default() -> Self {
        Self::new(1, 0)
    }
}
