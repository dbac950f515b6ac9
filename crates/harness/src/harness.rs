//! Benchmark orchestration
//!
//! `run_bench` executes one strategy against a freshly reset counter:
//! reset, fan out the workers, release them together, join them all, read
//! the final value, report.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::info;

use tally_core::{CounterId, CounterStore, Result, RunId};

use crate::report::BenchReport;
use crate::retry::RetryPolicy;
use crate::strategy::Strategy;
use crate::worker::{run_worker, WorkerSummary};

/// Knobs for one benchmark run
///
/// The defaults reproduce the reference workload: 10 workers, 10,000
/// iterations each, unbounded optimistic retry, no deadline.
#[derive(Debug, Clone)]
pub struct BenchOptions {
    /// Number of concurrent workers
    pub workers: usize,
    /// Iterations per worker
    pub iterations: u64,
    /// Row the workers contend on
    pub counter_id: CounterId,
    /// Retry policy for the optimistic strategy
    pub retry: RetryPolicy,
    /// Optional safety-net deadline per worker, checked between iterations.
    /// Leaving it unset (the default) preserves the measured semantics.
    pub deadline: Option<Duration>,
}

impl BenchOptions {
    /// The reference workload: 10 workers, 10,000 iterations each
    pub fn new() -> Self {
        BenchOptions {
            workers: 10,
            iterations: 10_000,
            counter_id: CounterId::DEFAULT,
            retry: RetryPolicy::default(),
            deadline: None,
        }
    }

    /// Set the worker count
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the iterations per worker
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the optimistic retry policy
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the per-worker deadline
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Final value a fully successful run must produce
    pub fn expected_value(&self) -> i64 {
        self.workers as i64 * self.iterations as i64
    }
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one strategy under the given options and report the outcome
///
/// Steps:
/// 1. Reset the counter row (committed before any worker starts).
/// 2. Open one connection per worker and spawn the worker threads; a
///    barrier releases them together.
/// 3. Join all workers unconditionally; a panicked worker is folded into
///    its summary instead of unwinding the run.
/// 4. Wall-clock time covers worker release to last join.
/// 5. Read the final committed value for the report.
///
/// # Errors
/// Returns an error for harness-level failures only (reset, connect, final
/// read). Worker failures are carried in the report's summaries.
pub fn run_bench<S: CounterStore>(
    store: &S,
    strategy: Strategy,
    options: &BenchOptions,
) -> Result<BenchReport> {
    let run_id = RunId::new();
    info!(
        target: "tally::bench",
        run_id = %run_id,
        strategy = %strategy,
        workers = options.workers,
        iterations = options.iterations,
        "benchmark starting"
    );

    store.reset(options.counter_id)?;

    // Connect every worker before spawning any of them: a failed connect
    // must not strand already-spawned workers at the barrier.
    let mut conns = Vec::with_capacity(options.workers);
    for _ in 0..options.workers {
        conns.push(store.connect()?);
    }

    let barrier = Arc::new(Barrier::new(options.workers + 1));
    let mut handles = Vec::with_capacity(options.workers);
    for (worker, conn) in conns.into_iter().enumerate() {
        let barrier = Arc::clone(&barrier);
        let retry = options.retry.clone();
        let counter_id = options.counter_id;
        let iterations = options.iterations;
        let deadline = options.deadline;
        handles.push(thread::spawn(move || {
            barrier.wait();
            run_worker(worker, conn, strategy, counter_id, iterations, &retry, deadline)
        }));
    }

    let started_at = Utc::now();
    barrier.wait();
    let clock = Instant::now();

    let mut worker_summaries = Vec::with_capacity(options.workers);
    for (worker, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(summary) => worker_summaries.push(summary),
            Err(_) => worker_summaries.push(WorkerSummary::panicked(worker)),
        }
    }
    let elapsed = clock.elapsed();

    let final_value = store.read_value(options.counter_id)?;
    let report = BenchReport {
        run_id,
        strategy,
        started_at,
        elapsed,
        workers: options.workers,
        iterations: options.iterations,
        expected_value: options.expected_value(),
        final_value,
        total_retries: worker_summaries.iter().map(|s| s.retries).sum(),
        worker_summaries,
    };

    info!(
        target: "tally::bench",
        run_id = %run_id,
        strategy = %strategy,
        elapsed_secs = report.elapsed_secs(),
        final_value,
        expected = report.expected_value,
        retries = report.total_retries,
        "benchmark finished"
    );
    Ok(report)
}
