//! Foundational types for the counter benchmark
//!
//! This module defines:
//! - CounterId: identifier of a counter row
//! - CounterRecord: the row under contention (value + version)
//! - RunId: unique identifier for one benchmark run

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a counter row
///
/// The benchmark operates on a single row, [`CounterId::DEFAULT`]. The id is
/// still carried explicitly through every store operation so that the store
/// can host more than one counter (tests use separate rows to isolate
/// scenarios from each other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CounterId(u32);

impl CounterId {
    /// The singleton row all benchmark runs target
    pub const DEFAULT: CounterId = CounterId(1);

    /// Create a counter id from a raw integer
    pub const fn new(id: u32) -> Self {
        CounterId(id)
    }

    /// Get the raw integer value
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The counter row under contention
///
/// `value` is the counter itself. `version` is the stamp consumed by the
/// optimistic strategy: it starts at 0 and is bumped by exactly 1 per
/// successful version-conditioned write. Plain writes and engine-side
/// increments leave it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    /// Row identifier
    pub id: CounterId,
    /// Current counter value
    pub value: i64,
    /// Version stamp, changed only by conditional writes
    pub version: u64,
}

impl CounterRecord {
    /// Create a fresh record with value 0 and version 0
    pub fn fresh(id: CounterId) -> Self {
        CounterRecord {
            id,
            value: 0,
            version: 0,
        }
    }
}

impl fmt::Display for CounterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "counter {} = {} (version {})",
            self.id, self.value, self.version
        )
    }
}

/// Unique identifier for one benchmark run
///
/// A RunId is a wrapper around a UUID v4. It ties together the log lines and
/// the report produced by a single harness invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new random RunId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a RunId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
