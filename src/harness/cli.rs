/*!
 * Command Line Interface
 * clap definitions for the `collatz` binary
 */

use crate::engine::{parse_count, EngineConfig};
use crate::memo::MemoEncoding;
use crate::scheduler::SchedulePolicy;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "collatz",
    version,
    about = "Find the seed with the longest Collatz chain in [1, N] using parallel workers",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk every seed in [1, N] and report the longest chain
    Run(RunArgs),

    /// Run once per memo table capacity and report the fastest
    Sweep(SweepArgs),
}

/// Options shared by every subcommand
///
/// Unset options keep the value from `COLLATZ_*` environment variables or
/// the engine defaults.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Upper bound of the seed range (accepts 1_000, 250k, 100m)
    #[arg(short = 'n', long, value_parser = parse_count)]
    pub number: Option<u64>,

    /// Number of blocks (static) or workers (dynamic)
    #[arg(short = 'b', long)]
    pub blocks: Option<usize>,

    /// Do not track the longest chain (pure convergence check)
    #[arg(long)]
    pub no_chain: bool,

    /// Memo encoding: seed-marker or length
    #[arg(short = 'e', long)]
    pub encoding: Option<MemoEncoding>,

    /// Scheduling policy: static or dynamic
    #[arg(short = 's', long)]
    pub schedule: Option<SchedulePolicy>,

    /// Seeds per work unit under the dynamic policy
    #[arg(long, value_parser = parse_count)]
    pub chunk_size: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl EngineArgs {
    /// Overlay the options that were given on `config`
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(number) = self.number {
            config.number_to_test = number;
        }
        if let Some(blocks) = self.blocks {
            config.block_count = blocks;
        }
        if self.no_chain {
            config.track_longest_chain = false;
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if let Some(schedule) = self.schedule {
            config.schedule = schedule;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        config
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Memo table capacity; 0 disables memoization (accepts 100m etc.)
    #[arg(short = 'H', long, value_parser = parse_count)]
    pub history: Option<u64>,
}

impl RunArgs {
    pub fn config(&self, base: EngineConfig) -> EngineConfig {
        let config = self.engine.apply(base);
        match self.history {
            Some(history) => config.with_history_size(history),
            None => config,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Comma-separated memo capacities to try, e.g. 0,1m,10m,100m
    #[arg(
        short = 'H',
        long,
        value_delimiter = ',',
        value_parser = parse_count,
        required = true
    )]
    pub history: Vec<u64>,
}
