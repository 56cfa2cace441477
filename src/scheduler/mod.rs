/*!
 * Scheduler Module
 * Partitioning of the seed space and the worker pool that runs it
 */

pub mod partition;
pub mod pool;
pub mod types;

// Re-export public API
pub use partition::{partition_blocks, partition_chunks, ChunkCursor, WorkPlan};
pub use pool::WorkerPool;
pub use types::{SchedulePolicy, SeedRange};
