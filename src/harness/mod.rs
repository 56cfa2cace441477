/*!
 * Harness
 * Command line surface, report rendering and capacity sweeps
 */

pub mod cli;
pub mod report;
pub mod sweep;

pub use cli::{Cli, Command, EngineArgs, RunArgs, SweepArgs};
pub use report::{format_run_time, RunReport};
pub use sweep::{sweep_history, SweepEntry, SweepReport};
