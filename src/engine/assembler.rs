/*!
 * Result Assembler
 * Folds per-unit reports and the global best into one outcome
 */

use super::context::RunContext;
use super::outcome::{RunOutcome, RunStats, UnitReport};
use std::time::Duration;
use tracing::warn;

pub struct ResultAssembler<'a> {
    context: &'a RunContext,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(context: &'a RunContext) -> Self {
        Self { context }
    }

    /// Build the outcome once every worker has joined
    pub fn assemble(&self, run_id: &str, reports: Vec<UnitReport>, elapsed: Duration) -> RunOutcome {
        let memo = self.context.memo();
        let mut stats = RunStats {
            memo_capacity: memo.capacity() as u64,
            memo_occupied: memo.occupied() as u64,
            ..Default::default()
        };

        let mut failures = Vec::new();
        for mut report in reports {
            stats.absorb(&report);
            failures.append(&mut report.failures);
        }
        failures.sort_by_key(|failure| failure.seed);

        let longest = if !failures.is_empty() {
            warn!(
                run_id,
                failures = failures.len(),
                abandoned = stats.abandoned,
                "run failed; longest chain is not reported"
            );
            None
        } else if self.context.config().track_longest_chain {
            Some(self.context.tracker().snapshot())
        } else {
            None
        };

        RunOutcome {
            run_id: run_id.to_string(),
            longest,
            failures,
            elapsed,
            stats,
        }
    }
}
