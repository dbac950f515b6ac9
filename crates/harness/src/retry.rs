//! Retry policy for the optimistic strategy
//!
//! The default policy spins without bound and without backoff, which keeps
//! the worst-case contention cost of optimistic versioning visible in the
//! measurements. Tests and callers that need bounded runtime can cap the
//! attempts or add a jittered exponential backoff.

use std::thread;
use std::time::Duration;

use rand::Rng;
use tally_core::{Error, Result};

/// How long the backoff doubles before it plateaus
const BACKOFF_CAP_DOUBLINGS: u32 = 6;

/// Retry behavior for a stale optimistic write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Give up with [`Error::RetriesExhausted`] after this many attempts.
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
    /// Base delay before a retry. Grows exponentially per failed attempt
    /// (capped) and is fully jittered. `None` retries immediately.
    pub backoff: Option<Duration>,
}

impl RetryPolicy {
    /// The default policy: retry forever, immediately
    pub fn unbounded() -> Self {
        RetryPolicy {
            max_attempts: None,
            backoff: None,
        }
    }

    /// Cap the number of attempts
    pub fn bounded(max_attempts: u32) -> Self {
        RetryPolicy {
            max_attempts: Some(max_attempts),
            backoff: None,
        }
    }

    /// Add a jittered exponential backoff with the given base delay
    pub fn with_backoff(mut self, base: Duration) -> Self {
        self.backoff = Some(base);
        self
    }

    /// Called after a failed attempt, before the next one
    ///
    /// `attempts` counts the attempts made so far (at least 1).
    ///
    /// # Errors
    /// Returns [`Error::RetriesExhausted`] when `max_attempts` is reached.
    pub fn before_retry(&self, attempts: u64) -> Result<()> {
        if let Some(max) = self.max_attempts {
            if attempts >= u64::from(max) {
                return Err(Error::RetriesExhausted {
                    attempts: max,
                });
            }
        }
        if let Some(base) = self.backoff {
            let doublings = (attempts.saturating_sub(1)).min(u64::from(BACKOFF_CAP_DOUBLINGS));
            let ceiling = base.saturating_mul(1 << doublings);
            // Full jitter: sleep anywhere in [0, ceiling].
            let nanos = rand::thread_rng().gen_range(0..=ceiling.as_nanos().max(1));
            thread::sleep(Duration::from_nanos(nanos as u64));
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded()
    }
}
