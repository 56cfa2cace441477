/*!
 * Engine Tests
 * End-to-end runs across encodings, schedules, block counts and memo sizes
 */

use collatz_engine::{
    run, ChainRecord, ConfigError, Engine, EngineConfig, EngineError, FailureKind, MemoEncoding,
    SchedulePolicy,
};
use pretty_assertions::assert_eq;

/// Plain, unmemoized chain length
fn oracle_length(seed: u64) -> u32 {
    let mut n = seed;
    let mut steps = 0;
    while n != 1 {
        n = if n % 2 == 0 { n / 2 } else { 3 * n + 1 };
        steps += 1;
    }
    steps
}

fn oracle_max(n: u64) -> u32 {
    (1..=n).map(oracle_length).max().unwrap_or(0)
}

fn longest(config: EngineConfig) -> ChainRecord {
    let outcome = run(config).unwrap();
    assert!(outcome.is_success(), "unexpected failures: {:?}", outcome.failures);
    outcome.longest.expect("tracking is on")
}

#[test]
fn test_ten_seeds_two_blocks() {
    let config = EngineConfig::new(10).with_history_size(10).with_block_count(2);
    assert_eq!(longest(config), ChainRecord::new(9, 19));
}

#[test]
fn test_single_seed() {
    let config = EngineConfig::new(1).with_history_size(1).with_block_count(1);
    assert_eq!(longest(config), ChainRecord::new(1, 0));
}

#[test]
fn test_more_blocks_than_seeds() {
    let config = EngineConfig::new(3).with_history_size(4).with_block_count(40);
    let outcome = run(config).unwrap();
    assert_eq!(outcome.longest, Some(ChainRecord::new(3, 7)));
    assert_eq!(outcome.stats.units, 3);
}

#[test]
fn test_memo_size_does_not_change_result() {
    for history in [0, 1, 100, 1_000, 5_000] {
        let config = EngineConfig::new(1_000).with_history_size(history).with_block_count(4);
        assert_eq!(longest(config), ChainRecord::new(871, 178), "history {}", history);
    }
}

#[test]
fn test_disabled_memo_records_nothing() {
    let outcome = run(EngineConfig::new(1_000).with_history_size(0).with_block_count(4)).unwrap();
    assert_eq!(outcome.stats.memo_capacity, 0);
    assert_eq!(outcome.stats.memo_occupied, 0);
    assert_eq!(outcome.stats.seeds_walked, 1_000);
}

#[test]
fn test_encodings_agree() {
    for encoding in [MemoEncoding::SeedMarker, MemoEncoding::Length] {
        let config = EngineConfig::new(10_000)
            .with_history_size(10_000)
            .with_block_count(8)
            .with_encoding(encoding);
        assert_eq!(longest(config), ChainRecord::new(6171, 261), "{}", encoding);
    }
}

#[test]
fn test_block_counts_agree() {
    for blocks in [1, 3, 7, 40] {
        let config = EngineConfig::new(1_000).with_history_size(1_000).with_block_count(blocks);
        assert_eq!(longest(config), ChainRecord::new(871, 178), "blocks {}", blocks);
    }
}

#[test]
fn test_dynamic_schedule_matches_static() {
    for encoding in [MemoEncoding::SeedMarker, MemoEncoding::Length] {
        let config = EngineConfig::new(10_000)
            .with_history_size(10_000)
            .with_block_count(6)
            .with_schedule(SchedulePolicy::Dynamic)
            .with_chunk_size(97)
            .with_encoding(encoding);
        let outcome = run(config).unwrap();
        assert_eq!(outcome.longest, Some(ChainRecord::new(6171, 261)));
        assert_eq!(outcome.stats.units, 104);
        assert_eq!(outcome.stats.seeds_walked, 10_000);
    }
}

#[test]
fn test_matches_oracle() {
    let n = 3_000;
    let expected = oracle_max(n);
    for encoding in [MemoEncoding::SeedMarker, MemoEncoding::Length] {
        let config = EngineConfig::new(n)
            .with_history_size(n / 2)
            .with_block_count(5)
            .with_encoding(encoding);
        let best = longest(config);
        assert_eq!(best.length, expected);
        assert_eq!(oracle_length(best.seed), expected);
    }
}

#[test]
fn test_convergence_only_run() {
    for encoding in [MemoEncoding::SeedMarker, MemoEncoding::Length] {
        let config = EngineConfig::new(10_000)
            .with_history_size(10_000)
            .with_block_count(4)
            .with_tracking(false)
            .with_encoding(encoding);
        let outcome = run(config).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.longest, None);
        assert_eq!(outcome.stats.seeds_walked, 10_000);
        assert!(outcome.stats.pruned > 0);
    }
}

#[test]
fn test_corrupted_slot_fails_one_seed() {
    let engine = Engine::new(EngineConfig::new(20).with_history_size(20).with_block_count(1)).unwrap();
    // A slot already holding the seed itself looks like a loop back to the seed
    assert!(engine.memo().store(7, 7));

    let outcome = engine.run().unwrap();
    assert!(!outcome.is_success());
    assert_eq!(outcome.longest, None);
    assert_eq!(outcome.failing_seeds(), vec![7]);
    assert_eq!(outcome.failures[0].value, 7);
    assert_eq!(outcome.failures[0].kind, FailureKind::CycleInvariantViolation);
    // The rest of the single block is abandoned
    assert_eq!(outcome.stats.seeds_walked, 7);
    assert_eq!(outcome.stats.abandoned, 13);
}

#[test]
fn test_failures_in_several_blocks_are_all_reported() {
    let engine = Engine::new(EngineConfig::new(40).with_history_size(40).with_block_count(2)).unwrap();
    engine.memo().store(7, 7);
    engine.memo().store(27, 27);

    let outcome = engine.run().unwrap();
    assert_eq!(outcome.failing_seeds(), vec![7, 27]);
    assert_eq!(outcome.stats.failed, 2);

    match outcome.into_result() {
        Err(EngineError::RunFailed { failing_seeds }) => {
            assert_eq!(failing_seeds.as_slice(), &[7, 27]);
        }
        other => panic!("expected RunFailed, got {:?}", other),
    }
}

#[test]
fn test_invalid_configs_are_rejected() {
    let cases = [
        (EngineConfig::new(0), "number_to_test"),
        (EngineConfig::new(u64::MAX), "number_to_test"),
        (EngineConfig::new(10).with_block_count(0), "block_count"),
        (EngineConfig::new(10).with_block_count(1_000_000), "block_count"),
        (
            EngineConfig::new(10).with_schedule(SchedulePolicy::Dynamic).with_chunk_size(0),
            "chunk_size",
        ),
        (EngineConfig::new(10).with_history_size(u64::MAX), "history_size"),
    ];

    for (config, expected_field) in cases {
        match Engine::new(config) {
            Err(EngineError::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, expected_field);
            }
            other => panic!("expected {} to be rejected, got {:?}", expected_field, other),
        }
    }
}

#[test]
fn test_per_seed_dispatch_plan_is_lazy() {
    let config = EngineConfig::default()
        .with_history_size(0)
        .with_schedule(SchedulePolicy::Dynamic)
        .with_chunk_size(1);
    let engine = Engine::new(config).unwrap();

    let plan = engine.plan();
    assert_eq!(plan.policy(), SchedulePolicy::Dynamic);
    assert_eq!(plan.unit_count(), 100_000_000);
}

#[test]
fn test_per_seed_dispatch_run() {
    let config = EngineConfig::new(2_000)
        .with_history_size(2_000)
        .with_block_count(4)
        .with_schedule(SchedulePolicy::Dynamic)
        .with_chunk_size(1);
    let outcome = run(config).unwrap();
    assert_eq!(outcome.stats.units, 2_000);
    assert_eq!(outcome.longest.map(|best| best.length), Some(181));
}

#[test]
fn test_runs_are_independent() {
    let config = EngineConfig::new(1_000).with_history_size(1_000).with_block_count(4);
    let first = run(config.clone()).unwrap();
    let second = run(config).unwrap();
    assert_eq!(first.longest, second.longest);
    assert_ne!(first.run_id, second.run_id);
}
