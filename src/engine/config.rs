/*!
 * Engine Configuration
 *
 * Everything a run needs from its caller. Defaults mirror the classic
 * harness (100M seeds, 100M memo slots, 40 blocks, chain tracking on).
 *
 * Environment overrides:
 * - COLLATZ_NUMBER_TO_TEST: upper bound of the seed range
 * - COLLATZ_HISTORY_SIZE: memo table capacity (0 disables memoization)
 * - COLLATZ_BLOCK_COUNT: block / worker count
 * - COLLATZ_TRACK_CHAIN: track the longest chain (true/false)
 * - COLLATZ_ENCODING: seed-marker | length
 * - COLLATZ_SCHEDULE: static | dynamic
 * - COLLATZ_CHUNK_SIZE: seeds per dynamic work unit
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{
    DEFAULT_BLOCK_COUNT, DEFAULT_CHUNK_SIZE, DEFAULT_HISTORY_SIZE, DEFAULT_NUMBER_TO_TEST,
    MAX_HISTORY_SIZE, MAX_NUMBER_TO_TEST, MAX_WORKERS,
};
use crate::memo::MemoEncoding;
use crate::scheduler::SchedulePolicy;
use serde::{Deserialize, Serialize};

pub const ENV_NUMBER_TO_TEST: &str = "COLLATZ_NUMBER_TO_TEST";
pub const ENV_HISTORY_SIZE: &str = "COLLATZ_HISTORY_SIZE";
pub const ENV_BLOCK_COUNT: &str = "COLLATZ_BLOCK_COUNT";
pub const ENV_TRACK_CHAIN: &str = "COLLATZ_TRACK_CHAIN";
pub const ENV_ENCODING: &str = "COLLATZ_ENCODING";
pub const ENV_SCHEDULE: &str = "COLLATZ_SCHEDULE";
pub const ENV_CHUNK_SIZE: &str = "COLLATZ_CHUNK_SIZE";

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seeds `1..=number_to_test` are walked
    pub number_to_test: u64,
    /// Memo table capacity; values at or above it are walked unmemoized
    pub history_size: u64,
    /// Static: number of blocks. Dynamic: number of workers.
    pub block_count: usize,
    /// Whether terminated walks report their length to the max tracker
    pub track_longest_chain: bool,
    pub encoding: MemoEncoding,
    pub schedule: SchedulePolicy,
    /// Seeds per unit under the dynamic policy
    pub chunk_size: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            number_to_test: DEFAULT_NUMBER_TO_TEST,
            history_size: DEFAULT_HISTORY_SIZE,
            block_count: DEFAULT_BLOCK_COUNT,
            track_longest_chain: true,
            encoding: MemoEncoding::SeedMarker,
            schedule: SchedulePolicy::Static,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EngineConfig {
    /// Default configuration for the range `[1, number_to_test]`
    pub fn new(number_to_test: u64) -> Self {
        Self {
            number_to_test,
            ..Default::default()
        }
    }

    pub fn with_history_size(mut self, history_size: u64) -> Self {
        self.history_size = history_size;
        self
    }

    pub fn with_block_count(mut self, block_count: usize) -> Self {
        self.block_count = block_count;
        self
    }

    pub fn with_tracking(mut self, track_longest_chain: bool) -> Self {
        self.track_longest_chain = track_longest_chain;
        self
    }

    pub fn with_encoding(mut self, encoding: MemoEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_schedule(mut self, schedule: SchedulePolicy) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Defaults overridden by `COLLATZ_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_NUMBER_TO_TEST) {
            config.number_to_test = parse_count(&value)
                .map_err(|reason| ConfigError::parse(ENV_NUMBER_TO_TEST, &value, reason))?;
        }
        if let Some(value) = lookup(ENV_HISTORY_SIZE) {
            config.history_size = parse_count(&value)
                .map_err(|reason| ConfigError::parse(ENV_HISTORY_SIZE, &value, reason))?;
        }
        if let Some(value) = lookup(ENV_BLOCK_COUNT) {
            let count = parse_count(&value)
                .map_err(|reason| ConfigError::parse(ENV_BLOCK_COUNT, &value, reason))?;
            config.block_count = usize::try_from(count)
                .map_err(|e| ConfigError::parse(ENV_BLOCK_COUNT, &value, e.to_string()))?;
        }
        if let Some(value) = lookup(ENV_TRACK_CHAIN) {
            config.track_longest_chain = parse_flag(&value)
                .map_err(|reason| ConfigError::parse(ENV_TRACK_CHAIN, &value, reason))?;
        }
        if let Some(value) = lookup(ENV_ENCODING) {
            config.encoding = value
                .parse()
                .map_err(|reason: String| ConfigError::parse(ENV_ENCODING, &value, reason))?;
        }
        if let Some(value) = lookup(ENV_SCHEDULE) {
            config.schedule = value
                .parse()
                .map_err(|reason: String| ConfigError::parse(ENV_SCHEDULE, &value, reason))?;
        }
        if let Some(value) = lookup(ENV_CHUNK_SIZE) {
            config.chunk_size = parse_count(&value)
                .map_err(|reason| ConfigError::parse(ENV_CHUNK_SIZE, &value, reason))?;
        }

        Ok(config)
    }

    /// Check the configuration against engine limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_to_test == 0 || self.number_to_test > MAX_NUMBER_TO_TEST {
            return Err(ConfigError::invalid(
                "number_to_test",
                format!("must be between 1 and {}", MAX_NUMBER_TO_TEST),
            ));
        }
        if self.block_count == 0 || self.block_count > MAX_WORKERS {
            return Err(ConfigError::invalid(
                "block_count",
                format!("must be between 1 and {}", MAX_WORKERS),
            ));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::invalid("chunk_size", "must be at least 1"));
        }
        if self.history_size > MAX_HISTORY_SIZE {
            return Err(ConfigError::invalid(
                "history_size",
                format!("must not exceed {}", MAX_HISTORY_SIZE),
            ));
        }
        if usize::try_from(self.history_size).is_err() {
            return Err(ConfigError::invalid(
                "history_size",
                "does not fit in this platform's address space",
            ));
        }
        Ok(())
    }

    /// Memo table capacity as a slot count
    pub fn memo_capacity(&self) -> Result<usize, ConfigError> {
        usize::try_from(self.history_size).map_err(|_| {
            ConfigError::invalid("history_size", "does not fit in this platform's address space")
        })
    }
}

/// Parse a count such as `1000`, `1_000_000`, `250k` or `100m`
pub fn parse_count(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    let (digits, multiplier) = match trimmed.char_indices().last() {
        Some((i, 'k' | 'K')) => (&trimmed[..i], 1_000),
        Some((i, 'm' | 'M')) => (&trimmed[..i], 1_000_000),
        _ => (trimmed, 1),
    };

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() {
        return Err("expected a number".to_string());
    }

    digits
        .parse::<u64>()
        .map_err(|e| e.to_string())?
        .checked_mul(multiplier)
        .ok_or_else(|| "value is too large".to_string())
}

/// Parse a boolean flag (`1/0`, `true/false`, `yes/no`, `on/off`)
pub fn parse_flag(input: &str) -> Result<bool, String> {
    match input.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected true or false, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.number_to_test, 100_000_000);
        assert_eq!(config.history_size, 100_000_000);
        assert_eq!(config.block_count, 40);
        assert!(config.track_longest_chain);
        assert_eq!(config.encoding, MemoEncoding::SeedMarker);
        assert_eq!(config.schedule, SchedulePolicy::Static);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new(1000)
            .with_history_size(0)
            .with_block_count(3)
            .with_tracking(false)
            .with_encoding(MemoEncoding::Length)
            .with_schedule(SchedulePolicy::Dynamic)
            .with_chunk_size(16);

        assert_eq!(config.number_to_test, 1000);
        assert_eq!(config.history_size, 0);
        assert_eq!(config.block_count, 3);
        assert!(!config.track_longest_chain);
        assert_eq!(config.encoding, MemoEncoding::Length);
        assert_eq!(config.schedule, SchedulePolicy::Dynamic);
        assert_eq!(config.chunk_size, 16);
    }

    #[test]
    fn test_validation() {
        assert!(EngineConfig::new(0).validate().is_err());
        assert!(EngineConfig::new(10).with_block_count(0).validate().is_err());
        assert!(EngineConfig::new(10)
            .with_block_count(MAX_WORKERS + 1)
            .validate()
            .is_err());
        assert!(EngineConfig::new(10).with_chunk_size(0).validate().is_err());
        assert!(EngineConfig::new(10)
            .with_history_size(MAX_HISTORY_SIZE + 1)
            .validate()
            .is_err());
        assert!(EngineConfig::new(1).with_history_size(0).validate().is_ok());
    }

    #[test]
    fn test_number_to_test_upper_bound() {
        let at_limit = EngineConfig::new(MAX_NUMBER_TO_TEST).with_history_size(0);
        assert!(at_limit.validate().is_ok());

        for n in [MAX_NUMBER_TO_TEST + 1, u64::MAX] {
            match EngineConfig::new(n).validate() {
                Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "number_to_test"),
                other => panic!("expected {} to be rejected, got {:?}", n, other),
            }
        }
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            (ENV_NUMBER_TO_TEST, "10k"),
            (ENV_HISTORY_SIZE, "1_000"),
            (ENV_BLOCK_COUNT, "8"),
            (ENV_TRACK_CHAIN, "off"),
            (ENV_ENCODING, "length"),
            (ENV_SCHEDULE, "dynamic"),
            (ENV_CHUNK_SIZE, "64"),
        ]))
        .unwrap();

        assert_eq!(config.number_to_test, 10_000);
        assert_eq!(config.history_size, 1_000);
        assert_eq!(config.block_count, 8);
        assert!(!config.track_longest_chain);
        assert_eq!(config.encoding, MemoEncoding::Length);
        assert_eq!(config.schedule, SchedulePolicy::Dynamic);
        assert_eq!(config.chunk_size, 64);
    }

    #[test]
    fn test_from_lookup_reports_bad_values() {
        let err = EngineConfig::from_lookup(lookup(&[(ENV_BLOCK_COUNT, "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref key, .. } if key == ENV_BLOCK_COUNT));

        let err = EngineConfig::from_lookup(lookup(&[(ENV_ENCODING, "suffix")])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref key, .. } if key == ENV_ENCODING));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1000"), Ok(1000));
        assert_eq!(parse_count("1_000_000"), Ok(1_000_000));
        assert_eq!(parse_count("250k"), Ok(250_000));
        assert_eq!(parse_count("100M"), Ok(100_000_000));
        assert!(parse_count("").is_err());
        assert!(parse_count("m").is_err());
        assert!(parse_count("12x").is_err());
        assert!(parse_count("99999999999999999999m").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Ok(true));
        assert_eq!(parse_flag("0"), Ok(false));
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_serde_roundtrip_with_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"number_to_test": 500, "encoding": "length"}"#).unwrap();
        assert_eq!(config.number_to_test, 500);
        assert_eq!(config.encoding, MemoEncoding::Length);
        assert_eq!(config.block_count, DEFAULT_BLOCK_COUNT);
    }
}
