//! Core types for the tally benchmark
//!
//! This crate defines the foundational pieces shared by the store and the
//! harness:
//! - `CounterId`, `CounterRecord`: the counter row under contention
//! - `RunId`: identity of one benchmark run
//! - `Error` / `Result`: error types used throughout the workspace
//! - `CounterStore` / `Connection` / `Transaction`: the trait seam behind
//!   which the transactional engine lives
//!
//! Upper layers (strategies, workers, harness) depend only on this crate,
//! never on a concrete store implementation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{Connection, CounterStore, Transaction};
pub use types::{CounterId, CounterRecord, RunId};
