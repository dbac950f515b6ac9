//! Error types for the tally workspace
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::CounterId;
use thiserror::Error;

/// Result type alias for tally operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the counter store and benchmark harness
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The requested counter row does not exist
    #[error("Counter not found: {0}")]
    CounterNotFound(CounterId),

    /// A bounded optimistic retry policy ran out of attempts
    #[error("Optimistic update gave up after {attempts} attempt(s)")]
    RetriesExhausted {
        /// Attempts performed before giving up
        attempts: u32,
    },

    /// The harness deadline elapsed before the worker finished
    #[error("Benchmark deadline exceeded")]
    DeadlineExceeded,

    /// A worker thread panicked; the harness reports it instead of unwinding
    #[error("Worker {worker} panicked")]
    WorkerPanic {
        /// Index of the panicked worker
        worker: usize,
    },

    /// An unknown strategy name was supplied
    #[error("Unknown strategy: {0}")]
    InvalidStrategy(String),

    /// Invalid operation or state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
