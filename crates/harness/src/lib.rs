//! Benchmark harness for the counter update strategies
//!
//! This crate holds the core of the benchmark:
//! - [`Strategy`]: the four per-iteration transaction shapes (naive
//!   read-modify-write, engine-side increment, pessimistic row lock,
//!   optimistic versioning)
//! - [`RetryPolicy`]: the optimistic strategy's retry behavior, an
//!   unbounded spin by default
//! - [`run_bench`]: reset the store, fan out workers, join, measure, and
//!   report
//!
//! Workers coordinate through the shared counter row only. The harness adds
//! no in-process locking around the store, so the lost-update anomaly of
//! the naive strategy stays observable.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod harness;
mod report;
mod retry;
mod strategy;
mod worker;

pub use harness::{run_bench, BenchOptions};
pub use report::BenchReport;
pub use retry::RetryPolicy;
pub use strategy::Strategy;
pub use worker::WorkerSummary;
