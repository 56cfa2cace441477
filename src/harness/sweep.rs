/*!
 * History Sweep
 * Runs the engine once per memo capacity and compares the results
 */

use super::report::format_run_time;
use crate::core::errors::EngineError;
use crate::core::types::ChainRecord;
use crate::engine::{self, EngineConfig};
use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;
use tracing::{info, warn};

/// One run of the sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepEntry {
    pub history_size: u64,
    pub elapsed: Duration,
    pub success: bool,
    pub longest: Option<ChainRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub entries: Vec<SweepEntry>,
    /// Capacity of the fastest successful run
    pub fastest: Option<u64>,
    /// Every successful run reported the same longest chain length
    pub consistent: bool,
}

/// Run `base` once for every capacity in `sizes`, in order
///
/// Walk failures are recorded in the entry; pool defects and configuration
/// errors stop the sweep.
pub fn sweep_history(base: &EngineConfig, sizes: &[u64]) -> Result<SweepReport, EngineError> {
    let mut entries = Vec::with_capacity(sizes.len());

    for &history_size in sizes {
        let config = base.clone().with_history_size(history_size);
        let outcome = engine::run(config)?;
        info!(
            history_size,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            success = outcome.is_success(),
            "sweep step finished"
        );
        entries.push(SweepEntry {
            history_size,
            elapsed: outcome.elapsed,
            success: outcome.is_success(),
            longest: outcome.longest,
        });
    }

    let fastest = entries
        .iter()
        .filter(|entry| entry.success)
        .min_by_key(|entry| entry.elapsed)
        .map(|entry| entry.history_size);

    let consistent = lengths_agree(&entries);
    if !consistent {
        warn!("sweep runs disagree on the longest chain length");
    }

    Ok(SweepReport {
        entries,
        fastest,
        consistent,
    })
}

/// Every successful entry found the same longest length
///
/// Seeds are not compared: which of several tied seeds wins depends on
/// worker timing.
fn lengths_agree(entries: &[SweepEntry]) -> bool {
    let mut lengths = entries
        .iter()
        .filter(|entry| entry.success)
        .map(|entry| entry.longest.map(|record| record.length));
    match lengths.next() {
        Some(first) => lengths.all(|length| length == first),
        None => true,
    }
}

impl SweepReport {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>14}  {:>12}  {:>8}  {:>12}  {:>6}",
            "History Size", "Run Time", "Result", "Seed", "Length"
        );

        for entry in &self.entries {
            let (seed, length) = match entry.longest {
                Some(best) => (best.seed.to_string(), best.length.to_string()),
                None => ("-".to_string(), "-".to_string()),
            };
            let marker = if Some(entry.history_size) == self.fastest { " *" } else { "" };
            let _ = writeln!(
                out,
                "{:>14}  {:>12}  {:>8}  {:>12}  {:>6}{}",
                entry.history_size,
                format_run_time(entry.elapsed),
                if entry.success { "SUCCESS" } else { "FAILURE" },
                seed,
                length,
                marker
            );
        }

        match self.fastest {
            Some(size) => {
                let _ = writeln!(out, "Fastest History Size: {}", size);
            }
            None => out.push_str("Fastest History Size: none succeeded\n"),
        }
        if !self.consistent {
            out.push_str("WARNING: runs disagree on the longest chain length\n");
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
