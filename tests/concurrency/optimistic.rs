//! Optimistic Versioning Tests
//!
//! The optimistic strategy is only as good as the version stamping it
//! leans on: a successful conditional write bumps the version by exactly
//! 1, a stale write affects zero rows, and the retry loop terminates.

use crate::common;
use tally::{run_bench, Connection, CounterStore, MemoryStore, RetryPolicy, Strategy, Transaction};

// ============================================================================
// Version Stamping
// ============================================================================

#[test]
fn version_advances_once_per_successful_write() {
    let store = MemoryStore::new();
    let report = run_bench(&store, Strategy::Optimistic, &common::options(4, 500)).unwrap();

    assert!(report.is_exact());
    // Every committed increment was one successful conditional write, and
    // nothing else touches the version.
    let record = store.read_record(common::ID).unwrap();
    assert_eq!(record.version, 2_000);
}

#[test]
fn stale_write_never_succeeds() {
    let store = common::store_with_row();
    let mut writer = store.connect().unwrap();
    let mut rival = store.connect().unwrap();

    // The writer reads version 0, then the rival commits first.
    let stale = writer
        .transaction(|txn| txn.select(common::ID))
        .unwrap();
    let affected = rival
        .transaction(|txn| txn.update_if_version(common::ID, 100, stale.version))
        .unwrap();
    assert_eq!(affected, 1);

    // The writer's conditional write is now stale and must not apply.
    let affected = writer
        .transaction(|txn| txn.update_if_version(common::ID, 999, stale.version))
        .unwrap();
    assert_eq!(affected, 0);

    let record = store.read_record(common::ID).unwrap();
    assert_eq!(record.value, 100);
    assert_eq!(record.version, 1);
}

// ============================================================================
// Retry Loop
// ============================================================================

#[test]
fn uncontended_iteration_takes_one_attempt() {
    let store = common::store_with_row();
    let mut conn = store.connect().unwrap();

    let attempts = Strategy::Optimistic
        .execute(&mut conn, common::ID, &RetryPolicy::unbounded())
        .unwrap();
    assert_eq!(attempts, 1);
    assert_eq!(store.read_value(common::ID).unwrap(), 1);
}

#[test]
fn bounded_policy_still_converges_under_contention() {
    let store = MemoryStore::new();
    let options = common::options(4, 500).retry(RetryPolicy::bounded(1_000_000));
    let report = run_bench(&store, Strategy::Optimistic, &options).unwrap();

    assert!(report.is_exact());
    assert!(!report.has_errors());
}

#[test]
fn retries_are_attempts_beyond_the_first() {
    let store = MemoryStore::new();
    let report = run_bench(&store, Strategy::Optimistic, &common::options(1, 200)).unwrap();

    // A lone worker never loses a conditional write.
    assert_eq!(report.total_retries, 0);
    assert!(report.is_exact());
}
