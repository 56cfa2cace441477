/*!
 * Run Tracing
 * Structured tracing for engine runs using the tracing crate
 *
 * Features:
 * - Per-run trace ID for correlating logs with the reported outcome
 * - JSON-formatted logs for structured parsing
 * - Worker unit spans parented to the run span across threads
 */

use crate::core::limits::{SLOW_RUN_THRESHOLD_MS, TRACE_JSON_ENV};
use crate::engine::{EngineConfig, RunOutcome};
use std::time::Instant;
use tracing::{debug, info, span, warn, Level, Span};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - COLLATZ_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_names(true)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
        debug!("Structured tracing initialized");
    }
}

/// Generate a unique run ID
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one engine run
pub struct RunSpan {
    span: Span,
    start: Instant,
    run_id: String,
}

impl RunSpan {
    pub fn new(config: &EngineConfig) -> Self {
        let run_id = generate_run_id();

        let span = span!(
            Level::INFO,
            "run",
            run_id = %run_id,
            number_to_test = config.number_to_test,
            history_size = config.history_size,
            block_count = config.block_count,
            encoding = config.encoding.as_str(),
            schedule = config.schedule.as_str(),
            track = config.track_longest_chain,
            result = tracing::field::Empty,
            longest_seed = tracing::field::Empty,
            longest_length = tracing::field::Empty,
            failures = tracing::field::Empty,
            error = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            run_id,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// The underlying span, used as parent for worker spans
    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    /// Record the assembled outcome
    pub fn record_outcome(&self, outcome: &RunOutcome) {
        self.span
            .record("result", if outcome.is_success() { "success" } else { "failure" });
        self.span.record("failures", outcome.failures.len());
        if let Some(best) = outcome.longest {
            self.span.record("longest_seed", best.seed);
            self.span.record("longest_length", best.length);
        }
    }

    /// Record a run-level error (configuration or pool defect)
    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_ms", duration.as_millis() as u64);

        if duration.as_millis() > SLOW_RUN_THRESHOLD_MS {
            warn!(
                run_id = %self.run_id,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow run"
            );
        } else {
            debug!(
                run_id = %self.run_id,
                duration_us = duration.as_micros() as u64,
                "run span closed"
            );
        }
    }
}
