//! Shared test utilities for the integration test suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]

use tally::{BenchOptions, CounterId, CounterStore, MemoryStore};

/// Row used by most tests
pub const ID: CounterId = CounterId::DEFAULT;

/// A store with the benchmark row already reset
pub fn store_with_row() -> MemoryStore {
    let store = MemoryStore::new();
    store.reset(ID).unwrap();
    store
}

/// Bench options scaled down for test runtime
pub fn options(workers: usize, iterations: u64) -> BenchOptions {
    BenchOptions::new().workers(workers).iterations(iterations)
}
