/*!
 * Run Reports
 * Human-readable and JSON rendering of a run outcome
 */

use crate::engine::{EngineConfig, RunOutcome};
use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;

const LABEL_WIDTH: usize = 25;

/// Configuration and outcome of one run, as serialized by `--json`
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub success: bool,
    pub config: &'a EngineConfig,
    pub outcome: &'a RunOutcome,
    pub run_time: String,
}

impl<'a> RunReport<'a> {
    pub fn new(config: &'a EngineConfig, outcome: &'a RunOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            config,
            outcome,
            run_time: format_run_time(outcome.elapsed),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let config = self.config;
        let outcome = self.outcome;
        let mut out = String::new();

        out.push_str(if self.success { "SUCCESS\n" } else { "FAILURE\n" });
        line(&mut out, "Number Under Test:", config.number_to_test);
        line(&mut out, "Run Time:", &self.run_time);
        line(&mut out, "Encoding:", config.encoding);
        line(&mut out, "Schedule:", config.schedule);
        line(&mut out, "History Size:", config.history_size);
        line(&mut out, "Block Count:", config.block_count);

        match outcome.longest {
            Some(best) => {
                line(&mut out, "Longest Chain Seed:", best.seed);
                line(&mut out, "Longest Chain Length:", best.length);
            }
            None if !config.track_longest_chain => {
                line(&mut out, "Longest Chain:", "not tracked");
            }
            None => {
                line(&mut out, "Longest Chain:", "unavailable");
            }
        }

        let stats = &outcome.stats;
        line(&mut out, "Seeds Walked:", stats.seeds_walked);
        line(&mut out, "Terminated / Pruned:", format!("{} / {}", stats.terminated, stats.pruned));
        line(
            &mut out,
            "Memo Occupancy:",
            format!("{} / {}", stats.memo_occupied, stats.memo_capacity),
        );

        if !outcome.is_success() {
            let seeds: Vec<String> = outcome
                .failing_seeds()
                .iter()
                .map(|seed| seed.to_string())
                .collect();
            line(&mut out, "Failing Seeds:", seeds.join(", "));
            for failure in &outcome.failures {
                let _ = writeln!(out, "  {}", failure);
            }
        }

        line(&mut out, "Run ID:", &outcome.run_id);
        out
    }
}

fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "{:<width$} {}", label, value, width = LABEL_WIDTH);
}

/// Format as `HH:MM:SS.cc` (hundredths of a second)
pub fn format_run_time(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:02}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60,
        elapsed.subsec_millis() / 10
    )
}
