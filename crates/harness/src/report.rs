//! Benchmark result reporting

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tally_core::RunId;

use crate::strategy::Strategy;
use crate::worker::WorkerSummary;

/// Outcome of one benchmark run
///
/// `final_value` is whatever the store holds after every worker finished,
/// which for the naive strategy is usually short of `expected_value`. The
/// shortfall is data, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    /// Identity of this run
    pub run_id: RunId,
    /// Strategy that was measured
    pub strategy: Strategy,
    /// When the workers were released
    pub started_at: DateTime<Utc>,
    /// Wall clock from worker release to last join
    pub elapsed: Duration,
    /// Worker count used
    pub workers: usize,
    /// Iterations per worker
    pub iterations: u64,
    /// workers * iterations
    pub expected_value: i64,
    /// Committed counter value after the run
    pub final_value: i64,
    /// Optimistic attempts beyond one per iteration, summed over workers
    pub total_retries: u64,
    /// Per-worker outcomes
    pub worker_summaries: Vec<WorkerSummary>,
}

impl BenchReport {
    /// Elapsed time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Whether the run produced exactly the expected value
    pub fn is_exact(&self) -> bool {
        self.final_value == self.expected_value
    }

    /// Increments that never made it into the final value
    pub fn lost_updates(&self) -> i64 {
        self.expected_value - self.final_value
    }

    /// Whether any worker stopped early
    pub fn has_errors(&self) -> bool {
        self.worker_summaries.iter().any(|s| s.error.is_some())
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total execution time for {}: {:.6} seconds",
            self.strategy,
            self.elapsed_secs()
        )?;
        write!(f, "Counter is {}", self.final_value)
    }
}
