/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Seed, WorkerId};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a single chain walk was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The walker found its own seed marker on a value it was about to claim
    CycleInvariantViolation,
    /// 3n+1 does not fit in the step width
    StepOverflow,
}

impl FailureKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CycleInvariantViolation => "cycle invariant violation",
            Self::StepOverflow => "step overflow",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A walk that ended in the `Failed` state
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[error("{kind} while walking seed {seed} (at value {value})")]
#[diagnostic(
    code(walker::failed),
    help("This never happens for real inputs. Suspect a corrupted memo table or an arithmetic defect.")
)]
pub struct WalkFailure {
    pub seed: Seed,
    /// Value the walker was at when the failure was detected
    pub value: u64,
    pub kind: FailureKind,
}

impl WalkFailure {
    #[inline]
    pub const fn cycle(seed: Seed, value: u64) -> Self {
        Self {
            seed,
            value,
            kind: FailureKind::CycleInvariantViolation,
        }
    }

    #[inline]
    pub const fn overflow(seed: Seed, value: u64) -> Self {
        Self {
            seed,
            value,
            kind: FailureKind::StepOverflow,
        }
    }
}

/// Configuration errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Check the run configuration against the documented limits.")
    )]
    InvalidValue { field: String, reason: String },

    #[error("Cannot parse {key}={value:?}: {reason}")]
    #[diagnostic(
        code(config::parse_failed),
        help("Counts accept digits with optional '_' separators and a k/m suffix.")
    )]
    Parse {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(key: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Unified engine error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to spawn worker {worker}: {reason}")]
    #[diagnostic(
        code(engine::worker_spawn),
        help("The OS refused a new thread. Lower the block count or raise thread limits.")
    )]
    WorkerSpawn { worker: WorkerId, reason: String },

    #[error("Worker {worker} panicked")]
    #[diagnostic(
        code(engine::worker_panicked),
        help("A worker thread panicked. This is a defect; check the logs for the panic message.")
    )]
    WorkerPanicked { worker: WorkerId },

    #[error("Run failed: invariant violated by {failing_seeds}")]
    #[diagnostic(
        code(engine::run_failed),
        help("Every failing seed is listed. Re-run with RUST_LOG=debug for per-unit detail.")
    )]
    RunFailed { failing_seeds: FailingSeeds },
}

/// Seeds whose walks failed, in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailingSeeds(pub Vec<Seed>);

impl FailingSeeds {
    pub fn as_slice(&self) -> &[Seed] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FailingSeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} seed(s): ", self.0.len())?;
        for (i, seed) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", seed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_failure_display() {
        let failure = WalkFailure::cycle(7, 7);
        assert_eq!(
            failure.to_string(),
            "cycle invariant violation while walking seed 7 (at value 7)"
        );
    }

    #[test]
    fn test_run_failed_lists_every_seed() {
        let err = EngineError::RunFailed {
            failing_seeds: FailingSeeds(vec![7, 27]),
        };
        assert_eq!(
            err.to_string(),
            "Run failed: invariant violated by 2 seed(s): 7, 27"
        );
    }

    #[test]
    fn test_config_error_serialization() {
        let err = ConfigError::invalid("block_count", "must be at least 1");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"error_type\":\"invalid_value\""));
        let back: ConfigError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
