/*!
 * Run Outcome
 * Per-unit reports and the assembled result of a run
 */

use crate::core::errors::{EngineError, FailingSeeds, WalkFailure};
use crate::core::types::{ChainLength, ChainRecord, Seed, WorkerId};
use crate::scheduler::SeedRange;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What one worker did with one unit of work
#[derive(Debug, Clone)]
pub struct UnitReport {
    pub worker: WorkerId,
    pub unit: SeedRange,
    pub walked: u64,
    pub terminated: u64,
    pub pruned: u64,
    /// At most one entry: a failure aborts the rest of the unit
    pub failures: Vec<WalkFailure>,
}

impl UnitReport {
    pub fn new(worker: WorkerId, unit: SeedRange) -> Self {
        Self {
            worker,
            unit,
            walked: 0,
            terminated: 0,
            pruned: 0,
            failures: Vec::new(),
        }
    }

    /// Seeds in the unit that were never walked because of a failure
    pub fn abandoned(&self) -> u64 {
        self.unit.len().saturating_sub(self.walked)
    }
}

/// Counters summed over every unit of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub units: u64,
    pub seeds_walked: u64,
    pub terminated: u64,
    pub pruned: u64,
    pub failed: u64,
    pub abandoned: u64,
    pub memo_capacity: u64,
    pub memo_occupied: u64,
}

impl RunStats {
    pub fn absorb(&mut self, report: &UnitReport) {
        self.units += 1;
        self.seeds_walked += report.walked;
        self.terminated += report.terminated;
        self.pruned += report.pruned;
        self.failed += report.failures.len() as u64;
        self.abandoned += report.abandoned();
    }
}

/// Result of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Correlates the outcome with the run's log span
    pub run_id: String,
    /// Longest chain; `None` when tracking is off or the run failed
    pub longest: Option<ChainRecord>,
    /// Every walk failure, ordered by seed
    pub failures: Vec<WalkFailure>,
    pub elapsed: Duration,
    pub stats: RunStats,
}

impl RunOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn longest_seed(&self) -> Option<Seed> {
        self.longest.map(|record| record.seed)
    }

    pub fn longest_length(&self) -> Option<ChainLength> {
        self.longest.map(|record| record.length)
    }

    /// Seeds whose walks failed, ascending and without duplicates
    pub fn failing_seeds(&self) -> Vec<Seed> {
        let mut seeds: Vec<Seed> = self.failures.iter().map(|f| f.seed).collect();
        seeds.sort_unstable();
        seeds.dedup();
        seeds
    }

    /// `Ok(self)` on success, `EngineError::RunFailed` otherwise
    pub fn into_result(self) -> Result<Self, EngineError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(EngineError::RunFailed {
                failing_seeds: FailingSeeds(self.failing_seeds()),
            })
        }
    }
}
