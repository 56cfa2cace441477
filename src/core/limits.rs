/*!
 * Engine Limits and Defaults
 *
 * Centralized location for defaults and hard limits used by configuration
 * validation and the harness.
 *
 * - Performance-critical constants are marked with [PERF]
 */

// =============================================================================
// RUN DEFAULTS
// =============================================================================

/// Default upper bound of the seed range (100 million)
pub const DEFAULT_NUMBER_TO_TEST: u64 = 100_000_000;

/// Default memo table capacity (100 million slots, 800MB)
/// [PERF] Covering the whole seed range keeps most walks memoized
pub const DEFAULT_HISTORY_SIZE: u64 = 100_000_000;

/// Default number of blocks / workers
pub const DEFAULT_BLOCK_COUNT: usize = 40;

/// Default chunk size for dynamic scheduling
/// [PERF] Large enough to amortize queue pops, small enough to balance load
pub const DEFAULT_CHUNK_SIZE: u64 = 1024;

// =============================================================================
// HARD LIMITS
// =============================================================================

/// Maximum upper bound of the seed range (2^48)
/// Keeps `N + 1` range ends and unit arithmetic far from `u64::MAX`
pub const MAX_NUMBER_TO_TEST: u64 = 1 << 48;

/// Maximum memo table capacity (2^31 slots, 16GB)
pub const MAX_HISTORY_SIZE: u64 = 1 << 31;

/// Maximum number of worker threads in one run
pub const MAX_WORKERS: usize = 4096;

// =============================================================================
// OBSERVABILITY
// =============================================================================

/// Runs slower than this are logged at warn level
pub const SLOW_RUN_THRESHOLD_MS: u128 = 10_000;

/// Environment variable enabling JSON log output
pub const TRACE_JSON_ENV: &str = "COLLATZ_TRACE_JSON";
