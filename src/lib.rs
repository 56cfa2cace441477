/*!
 * Collatz Engine Library
 * Parallel longest-chain search over [1, N] with a shared memo table
 */

#![cfg_attr(feature = "nightly", feature(core_intrinsics))]

pub mod collatz;
pub mod core;
pub mod engine;
pub mod harness;
pub mod memo;
pub mod monitoring;
pub mod scheduler;
pub mod tracker;
pub mod walker;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::types::{ChainLength, ChainRecord, Seed, WorkerId};
pub use engine::{run, Engine, EngineConfig, RunOutcome, RunStats};
pub use memo::{MemoEncoding, MemoTable};
pub use monitoring::init_tracing;
pub use scheduler::SchedulePolicy;
pub use tracker::MaxTracker;
pub use walker::{ChainWalker, LengthWalker, SeedMarkerWalker, WalkOutcome};
