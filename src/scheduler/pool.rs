/*!
 * Worker Pool
 *
 * Runs units of work on named scoped threads and joins every one of them
 * before returning. Workers borrow the caller's state directly; nothing is
 * reference counted.
 *
 * - Blocks: one worker per block.
 * - Chunks: a fixed number of workers pull from a shared chunk cursor.
 *
 * The join barrier never short-circuits: a panicked or failing worker does
 * not stop its siblings, and all results are collected first.
 */

use super::partition::{ChunkCursor, WorkPlan};
use super::types::SeedRange;
use crate::core::errors::EngineError;
use crate::core::types::WorkerId;
use std::thread::{self, Scope, ScopedJoinHandle};
use tracing::{debug, error};

/// Fixed-size pool of worker threads for a single run
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    /// Worker count for chunked plans; block plans use one per block
    workers: usize,
}

impl WorkerPool {
    /// Pool of `workers` threads (at least one)
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Run `work` over every unit of `plan` and return one result per unit
    ///
    /// Results come back grouped by worker, in the order each worker
    /// finished its units; callers must not rely on unit order.
    pub fn execute<R, F>(&self, plan: WorkPlan, work: F) -> Result<Vec<R>, EngineError>
    where
        R: Send,
        F: Fn(WorkerId, SeedRange) -> R + Sync,
    {
        match plan {
            WorkPlan::Blocks(blocks) => self.run_blocks(blocks, &work),
            WorkPlan::Chunks(cursor) => self.run_chunks(&cursor, &work),
        }
    }

    fn run_blocks<R, F>(&self, blocks: Vec<SeedRange>, work: &F) -> Result<Vec<R>, EngineError>
    where
        R: Send,
        F: Fn(WorkerId, SeedRange) -> R + Sync,
    {
        if blocks.is_empty() {
            return Ok(Vec::new());
        }

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(blocks.len());
            let mut spawn_error = None;

            for (worker, unit) in blocks.into_iter().enumerate() {
                match spawn_worker(scope, worker, move || vec![work(worker, unit)]) {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(err) => {
                        spawn_error = Some(err);
                        break;
                    }
                }
            }

            finish(handles, spawn_error)
        })
    }

    /// The cursor lives outside the scope so every worker can borrow it
    fn run_chunks<R, F>(&self, cursor: &ChunkCursor, work: &F) -> Result<Vec<R>, EngineError>
    where
        R: Send,
        F: Fn(WorkerId, SeedRange) -> R + Sync,
    {
        let units = usize::try_from(cursor.remaining()).unwrap_or(usize::MAX);
        let workers = self.workers.min(units);
        if workers == 0 {
            return Ok(Vec::new());
        }

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;

            for worker in 0..workers {
                let drain = move || {
                    let mut results = Vec::new();
                    while let Some(unit) = cursor.next_chunk() {
                        results.push(work(worker, unit));
                    }
                    results
                };
                match spawn_worker(scope, worker, drain) {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(err) => {
                        spawn_error = Some(err);
                        break;
                    }
                }
            }

            finish(handles, spawn_error)
        })
    }
}

fn spawn_worker<'scope, 'env, R, F>(
    scope: &'scope Scope<'scope, 'env>,
    worker: WorkerId,
    body: F,
) -> Result<ScopedJoinHandle<'scope, Vec<R>>, EngineError>
where
    R: Send + 'scope,
    F: FnOnce() -> Vec<R> + Send + 'scope,
{
    debug!(worker, "spawning worker");
    thread::Builder::new()
        .name(format!("collatz-worker-{}", worker))
        .spawn_scoped(scope, body)
        .map_err(|e| EngineError::WorkerSpawn {
            worker,
            reason: e.to_string(),
        })
}

/// Join barrier: waits for every spawned worker, then reports the first
/// spawn failure or panic, if any
fn finish<R>(
    handles: Vec<(WorkerId, ScopedJoinHandle<'_, Vec<R>>)>,
    spawn_error: Option<EngineError>,
) -> Result<Vec<R>, EngineError> {
    let mut results = Vec::new();
    let mut panicked = None;

    for (worker, handle) in handles {
        match handle.join() {
            Ok(mut worker_results) => results.append(&mut worker_results),
            Err(_) => {
                error!(worker, "worker panicked");
                panicked.get_or_insert(worker);
            }
        }
    }

    if let Some(err) = spawn_error {
        return Err(err);
    }
    if let Some(worker) = panicked {
        return Err(EngineError::WorkerPanicked { worker });
    }
    Ok(results)
}
