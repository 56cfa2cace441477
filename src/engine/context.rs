/*!
 * Run Context
 * Per-run shared state, borrowed by every worker
 */

use super::config::EngineConfig;
use crate::core::errors::ConfigError;
use crate::memo::MemoTable;
use crate::tracker::MaxTracker;

/// Shared state for exactly one run
///
/// Built fresh for every run: a memo table left over from an earlier run
/// would hold stale seed markers that read as cycles.
#[derive(Debug)]
pub struct RunContext {
    config: EngineConfig,
    memo: MemoTable,
    tracker: MaxTracker,
}

impl RunContext {
    /// Validate `config` and allocate the memo table
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let memo = MemoTable::new(config.memo_capacity()?);

        Ok(Self {
            config,
            memo,
            tracker: MaxTracker::new(),
        })
    }

    #[inline(always)]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline(always)]
    pub fn memo(&self) -> &MemoTable {
        &self.memo
    }

    #[inline(always)]
    pub fn tracker(&self) -> &MaxTracker {
        &self.tracker
    }
}
