//! Exactness Tests
//!
//! The in-place, row-lock and optimistic strategies must land on exactly
//! workers * iterations, every run, for any worker/iteration mix.

use crate::common;
use tally::{run_bench, MemoryStore, Strategy};

const GRID: [(usize, u64); 4] = [(1, 1), (2, 500), (4, 1_000), (8, 500)];

fn assert_exact(strategy: Strategy) {
    for (workers, iterations) in GRID {
        let store = MemoryStore::new();
        let report = run_bench(&store, strategy, &common::options(workers, iterations)).unwrap();

        assert!(
            report.is_exact(),
            "{strategy} with {workers} workers x {iterations} iterations: got {} expected {}",
            report.final_value,
            report.expected_value
        );
        assert!(!report.has_errors());
    }
}

#[test]
fn in_place_is_exact() {
    assert_exact(Strategy::InPlace);
}

#[test]
fn row_lock_is_exact() {
    assert_exact(Strategy::RowLock);
}

#[test]
fn optimistic_is_exact() {
    assert_exact(Strategy::Optimistic);
}

#[test]
fn in_place_is_deterministic_across_runs() {
    let store = MemoryStore::new();
    for _ in 0..3 {
        let report = run_bench(&store, Strategy::InPlace, &common::options(4, 1_000)).unwrap();
        assert_eq!(report.final_value, 4_000);
    }
}
