//! Tally - concurrency-control benchmark for a contended counter row
//!
//! Tally measures the throughput and correctness trade-offs of four update
//! strategies when parallel workers increment one shared counter row:
//! naive read-modify-write, engine-side atomic increment, pessimistic row
//! locking, and optimistic versioning.
//!
//! # Quick Start
//!
//! ```
//! use tally::{run_bench, BenchOptions, MemoryStore, Strategy};
//!
//! let store = MemoryStore::new();
//! let options = BenchOptions::new().workers(4).iterations(100);
//! let report = run_bench(&store, Strategy::InPlace, &options)?;
//! assert_eq!(report.final_value, report.expected_value);
//! # tally::Result::Ok(())
//! ```
//!
//! # Architecture
//!
//! Strategies and the harness live in `tally-harness` and are written
//! against the store traits in `tally-core`; the embedded transactional
//! engine in `tally-store` implements those traits. The `tally` binary in
//! `crates/cli` runs the four benchmarks in fixed order.

pub use tally_core::{
    Connection, CounterId, CounterRecord, CounterStore, Error, Result, RunId, Transaction,
};
pub use tally_harness::{
    run_bench, BenchOptions, BenchReport, RetryPolicy, Strategy, WorkerSummary,
};
pub use tally_store::{MemoryConnection, MemoryStore};
