/*!
 * Engine Module
 * Run configuration, per-run context, orchestration and outcome assembly
 */

pub mod assembler;
pub mod config;
pub mod context;
pub mod outcome;
mod runner;

// Re-export public API
pub use assembler::ResultAssembler;
pub use config::{parse_count, parse_flag, EngineConfig};
pub use context::RunContext;
pub use outcome::{RunOutcome, RunStats, UnitReport};
pub use runner::{run, Engine};
