//! Worker: one thread's share of the benchmark workload
//!
//! A worker owns one connection and runs K sequential iterations of a
//! single strategy. Iterations share nothing with each other, and workers
//! never synchronize directly; the counter row is the only coordination
//! point.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tally_core::{Connection, CounterId, Error};

use crate::retry::RetryPolicy;
use crate::strategy::Strategy;

/// Outcome of one worker's run
///
/// A worker that hits a store error stops where it is: `completed` holds
/// the iterations that committed, `error` the failure message. The harness
/// reports the summary as is and never restarts the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSummary {
    /// Worker index, 0-based
    pub worker: usize,
    /// Iterations that committed
    pub completed: u64,
    /// Extra optimistic attempts beyond one per iteration
    pub retries: u64,
    /// Error that stopped the worker early, if any
    pub error: Option<String>,
}

impl WorkerSummary {
    /// Summary for a worker that panicked before producing one
    pub(crate) fn panicked(worker: usize) -> Self {
        WorkerSummary {
            worker,
            completed: 0,
            retries: 0,
            error: Some(Error::WorkerPanic { worker }.to_string()),
        }
    }
}

/// Run `iterations` iterations of `strategy` on the worker's own connection
///
/// `deadline`, when set, is checked between iterations against the
/// worker's start time; tripping it stops the worker like any other error.
pub(crate) fn run_worker<C: Connection>(
    worker: usize,
    mut conn: C,
    strategy: Strategy,
    id: CounterId,
    iterations: u64,
    retry: &RetryPolicy,
    deadline: Option<Duration>,
) -> WorkerSummary {
    let started = Instant::now();
    let mut summary = WorkerSummary {
        worker,
        completed: 0,
        retries: 0,
        error: None,
    };

    for _ in 0..iterations {
        if let Some(limit) = deadline {
            if started.elapsed() > limit {
                summary.error = Some(Error::DeadlineExceeded.to_string());
                break;
            }
        }
        match strategy.execute(&mut conn, id, retry) {
            Ok(attempts) => {
                summary.completed += 1;
                summary.retries += attempts - 1;
            }
            Err(e) => {
                warn!(
                    target: "tally::bench",
                    worker,
                    completed = summary.completed,
                    error = %e,
                    "worker stopped early"
                );
                summary.error = Some(e.to_string());
                break;
            }
        }
    }

    debug!(
        target: "tally::bench",
        worker,
        completed = summary.completed,
        retries = summary.retries,
        "worker finished"
    );
    summary
}
