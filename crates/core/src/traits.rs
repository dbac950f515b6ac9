//! Store abstraction consumed by the update strategies
//!
//! The counter lives in an external transactional engine. These traits are
//! the seam: strategies and the harness are written against them and never
//! see the engine behind the seam, so the embedded `MemoryStore` in
//! `tally-store` can be swapped for a relational client backend without
//! touching the upper layers.
//!
//! Thread safety: a `CounterStore` is shared across workers (`Send + Sync`),
//! while a `Connection` belongs to exactly one worker thread.

use crate::error::Result;
use crate::types::{CounterId, CounterRecord};

/// Handle to the transactional engine hosting the counter rows
///
/// One store is shared by the harness and all workers. Each worker obtains
/// its own [`Connection`]; connections are never shared between workers, and
/// no in-process lock coordinates them. All cross-worker coordination
/// happens through the engine's own transactional isolation.
pub trait CounterStore: Send + Sync + 'static {
    /// Per-worker session type
    type Conn: Connection;

    /// Open an independent session
    ///
    /// Every worker calls this once and keeps the connection for its whole
    /// lifetime, mirroring one client connection to a database server.
    fn connect(&self) -> Result<Self::Conn>;

    /// Destroy and recreate the row with value 0 and version 0
    ///
    /// Fully committed before returning. Wipes prior state, so it must not
    /// run concurrently with workers.
    fn reset(&self, id: CounterId) -> Result<()>;

    /// Read the committed value in its own transaction
    ///
    /// Used by the harness for final reporting only.
    ///
    /// # Errors
    /// Returns [`Error::CounterNotFound`](crate::Error::CounterNotFound)
    /// if the row does not exist.
    fn read_value(&self, id: CounterId) -> Result<i64>;

    /// Read the committed record (value and version) in its own transaction
    fn read_record(&self, id: CounterId) -> Result<CounterRecord>;
}

/// One worker's session with the engine
///
/// A connection executes one transaction at a time. Strategies never hold a
/// transaction open across iterations.
pub trait Connection: Send + 'static {
    /// Run `body` inside a transaction
    ///
    /// The closure receives the statement primitives. When it returns `Ok`
    /// the transaction commits; when it returns `Err` the transaction rolls
    /// back (row locks taken by `select_for_update` are released either
    /// way). The error is propagated to the caller unchanged.
    fn transaction<T, F>(&mut self, body: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T>;
}

/// Statement primitives available inside a transaction
///
/// These correspond to the statements the strategies issue. Update
/// statements report how many rows they affected, which is the signal the
/// optimistic strategy uses to detect a stale write.
pub trait Transaction {
    /// Read the row (committed value, no lock)
    fn select(&mut self, id: CounterId) -> Result<CounterRecord>;

    /// Read the row and take its exclusive lock
    ///
    /// The lock is held until the surrounding transaction ends, blocking
    /// other `select_for_update` callers on the same row.
    fn select_for_update(&mut self, id: CounterId) -> Result<CounterRecord>;

    /// Write a caller-computed value, leaving `version` untouched
    ///
    /// Returns the number of rows affected (0 if the row does not exist).
    fn update_value(&mut self, id: CounterId, value: i64) -> Result<u64>;

    /// Increment the value by 1 inside the engine
    ///
    /// The arithmetic happens engine-side in a single statement; no
    /// intervening read is exposed to the caller. Returns rows affected.
    fn increment_value(&mut self, id: CounterId) -> Result<u64>;

    /// Conditionally write `value`, stamping `version = expected + 1`
    ///
    /// The write only applies when the stored version still equals
    /// `expected_version`. Returns rows affected: 1 on success, 0 when the
    /// version moved underneath the caller.
    fn update_if_version(
        &mut self,
        id: CounterId,
        value: i64,
        expected_version: u64,
    ) -> Result<u64>;
}
