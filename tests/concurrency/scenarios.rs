//! Scenario Tests
//!
//! Fixed scenarios every implementation of the workload must satisfy,
//! independent of timing.

use crate::common;
use tally::{run_bench, CounterStore, MemoryStore, Strategy};

#[test]
fn reset_then_immediate_read() {
    let store = MemoryStore::new();
    store.reset(common::ID).unwrap();

    let record = store.read_record(common::ID).unwrap();
    assert_eq!(record.value, 0);
    assert_eq!(record.version, 0);
}

#[test]
fn single_worker_single_iteration_is_exact_for_every_strategy() {
    // Without contention even the naive strategy must be correct.
    for strategy in Strategy::ALL {
        let store = MemoryStore::new();
        let report = run_bench(&store, strategy, &common::options(1, 1)).unwrap();
        assert_eq!(
            report.final_value, 1,
            "{strategy} must count a single uncontended increment"
        );
    }
}

#[test]
fn sequential_benchmarks_share_one_store() {
    // The CLI reuses one store across the fixed benchmark order; each run
    // must start from a fresh row regardless of what ran before.
    let store = MemoryStore::new();
    let options = common::options(4, 250);

    for strategy in Strategy::ALL {
        let report = run_bench(&store, strategy, &options).unwrap();
        assert!(report.final_value <= 1_000);
        if strategy.is_exact() {
            assert_eq!(report.final_value, 1_000, "{strategy} must be exact");
        }
    }
}
