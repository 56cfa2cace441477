/*!
 * Engine
 * Partitions the seed range, walks it on the worker pool and assembles
 * the outcome
 */

use super::assembler::ResultAssembler;
use super::config::EngineConfig;
use super::context::RunContext;
use super::outcome::{RunOutcome, UnitReport};
use crate::core::errors::EngineError;
use crate::core::types::WorkerId;
use crate::memo::{MemoEncoding, MemoTable};
use crate::monitoring::RunSpan;
use crate::scheduler::{SeedRange, WorkPlan, WorkerPool};
use crate::walker::{ChainWalker, LengthWalker, SeedMarkerWalker, WalkOutcome};
use std::time::Instant;
use tracing::{debug, debug_span, info, warn, Span};

/// A single, not yet started run
///
/// `run` consumes the engine, so its memo table is never reused.
#[derive(Debug)]
pub struct Engine {
    context: RunContext,
}

impl Engine {
    /// Validate `config` and allocate the run context
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            context: RunContext::new(config)?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        self.context.config()
    }

    /// Memo table of this run, writable before the run starts
    pub fn memo(&self) -> &MemoTable {
        self.context.memo()
    }

    /// Units of work for the configured policy
    ///
    /// Dynamic plans hand out chunks lazily, so this is cheap for any range.
    pub fn plan(&self) -> WorkPlan {
        let config = self.context.config();
        WorkPlan::new(
            config.schedule,
            config.number_to_test,
            config.block_count,
            config.chunk_size,
        )
    }

    /// Walk every seed and assemble the outcome
    ///
    /// Walk failures produce a failed `RunOutcome`; `Err` is reserved for
    /// pool defects (spawn failure, worker panic).
    pub fn run(self) -> Result<RunOutcome, EngineError> {
        let run_span = RunSpan::new(self.context.config());
        let _entered = run_span.enter();

        let config = self.context.config();
        info!(
            number_to_test = config.number_to_test,
            history_size = config.history_size,
            block_count = config.block_count,
            encoding = %config.encoding,
            schedule = %config.schedule,
            "starting run"
        );

        let start = Instant::now();
        let reports = match config.encoding {
            MemoEncoding::SeedMarker => self.execute(&SeedMarkerWalker, run_span.span()),
            MemoEncoding::Length => self.execute(&LengthWalker, run_span.span()),
        };
        let reports = match reports {
            Ok(reports) => reports,
            Err(e) => {
                run_span.record_error(&e.to_string());
                return Err(e);
            }
        };
        let elapsed = start.elapsed();

        let outcome =
            ResultAssembler::new(&self.context).assemble(run_span.run_id(), reports, elapsed);
        run_span.record_outcome(&outcome);

        info!(
            success = outcome.is_success(),
            longest_seed = outcome.longest_seed(),
            longest_length = outcome.longest_length(),
            elapsed_ms = elapsed.as_millis() as u64,
            "run finished"
        );

        Ok(outcome)
    }

    fn execute<W: ChainWalker>(
        &self,
        walker: &W,
        parent: &Span,
    ) -> Result<Vec<UnitReport>, EngineError> {
        let config = self.context.config();
        let pool = WorkerPool::new(config.block_count);
        let context = &self.context;

        pool.execute(self.plan(), |worker, unit| {
            let _unit_span = debug_span!(
                parent: parent,
                "unit",
                worker,
                start = unit.start,
                end = unit.end
            )
            .entered();
            walk_unit(context, walker, worker, unit)
        })
    }
}

/// Walk every seed of `unit` in order
///
/// A failed walk aborts the rest of the unit; sibling units are unaffected.
fn walk_unit<W: ChainWalker>(
    context: &RunContext,
    walker: &W,
    worker: WorkerId,
    unit: SeedRange,
) -> UnitReport {
    let memo = context.memo();
    let tracker = context.tracker();
    let track = context.config().track_longest_chain;
    let mut report = UnitReport::new(worker, unit);

    for seed in unit.seeds() {
        report.walked += 1;
        match walker.walk(seed, memo, track) {
            Ok(WalkOutcome::Terminated { length }) => {
                report.terminated += 1;
                if track {
                    tracker.offer(seed, length);
                }
            }
            Ok(WalkOutcome::Pruned { .. }) => report.pruned += 1,
            Err(failure) => {
                warn!(
                    seed = failure.seed,
                    value = failure.value,
                    kind = %failure.kind,
                    abandoned = unit.end - seed - 1,
                    "walk failed; abandoning unit"
                );
                report.failures.push(failure);
                break;
            }
        }
    }

    debug!(
        walked = report.walked,
        terminated = report.terminated,
        pruned = report.pruned,
        "unit done"
    );
    report
}

/// Validate `config`, run the engine once and return the outcome
pub fn run(config: EngineConfig) -> Result<RunOutcome, EngineError> {
    Engine::new(config)?.run()
}
