//! MemoryStore: embedded engine behind the counter store traits
//!
//! Layout follows the usual latched-map design:
//! - `BTreeMap<CounterId, CounterRow>` behind `parking_lot::RwLock` for the
//!   row table. Every statement takes the latch once, so each statement is
//!   atomic on its own and sees the latest committed state.
//! - `DashMap<CounterId, Arc<Mutex<()>>>` as the row-lock table. The guard
//!   taken by `select_for_update` lives in the transaction and is dropped
//!   when the transaction ends, never earlier.
//! - `AtomicU64` counters hand out connection and transaction ids for log
//!   correlation.
//!
//! Writes apply at statement execution, so visibility is read-committed:
//! a value written by one worker is observable by the next statement of any
//! other worker. Nothing here compensates for the naive strategy's
//! read-modify-write gap, and that is the point.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex, RwLock};
use tracing::{debug, info};

use tally_core::{
    Connection, CounterId, CounterRecord, CounterStore, Error, Result, Transaction,
};

use crate::row::CounterRow;

type RowTable = Arc<RwLock<BTreeMap<CounterId, CounterRow>>>;
type LockTable = Arc<DashMap<CounterId, Arc<Mutex<()>>>>;
type RowLockGuard = ArcMutexGuard<RawMutex, ()>;

/// Embedded transactional counter store
///
/// Shared by the harness and all workers through `Arc`. Workers never touch
/// the store directly; they open a [`MemoryConnection`] each and issue
/// statements through it.
#[derive(Debug)]
pub struct MemoryStore {
    /// The row table
    rows: RowTable,
    /// Per-row exclusive locks, created lazily on first use
    row_locks: LockTable,
    /// Connection id allocator
    next_conn_id: AtomicU64,
    /// Transaction id allocator, shared with every connection
    next_txn_id: Arc<AtomicU64>,
}

impl MemoryStore {
    /// Create an empty store
    ///
    /// No rows exist until [`CounterStore::reset`] creates them.
    pub fn new() -> Self {
        MemoryStore {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            row_locks: Arc::new(DashMap::new()),
            next_conn_id: AtomicU64::new(0),
            next_txn_id: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterStore for MemoryStore {
    type Conn = MemoryConnection;

    fn connect(&self) -> Result<Self::Conn> {
        let conn_id = self.next_conn_id.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(target: "tally::store", conn_id, "connection opened");
        Ok(MemoryConnection {
            conn_id,
            rows: Arc::clone(&self.rows),
            row_locks: Arc::clone(&self.row_locks),
            next_txn_id: Arc::clone(&self.next_txn_id),
        })
    }

    fn reset(&self, id: CounterId) -> Result<()> {
        self.rows.write().insert(id, CounterRow::fresh());
        info!(target: "tally::store", id = %id, "counter reset");
        Ok(())
    }

    fn read_value(&self, id: CounterId) -> Result<i64> {
        Ok(self.read_record(id)?.value)
    }

    fn read_record(&self, id: CounterId) -> Result<CounterRecord> {
        self.rows
            .read()
            .get(&id)
            .map(|row| row.to_record(id))
            .ok_or(Error::CounterNotFound(id))
    }
}

/// One worker's session with the store
///
/// Connections are cheap handles onto the shared tables. Each runs one
/// transaction at a time.
#[derive(Debug)]
pub struct MemoryConnection {
    conn_id: u64,
    rows: RowTable,
    row_locks: LockTable,
    next_txn_id: Arc<AtomicU64>,
}

impl Connection for MemoryConnection {
    fn transaction<T, F>(&mut self, body: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T>,
    {
        let conn_id = self.conn_id;
        let txn_id = self.next_txn_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut txn = MemoryTxn {
            conn: self,
            txn_id,
            row_locks: Vec::new(),
        };
        match body(&mut txn) {
            Ok(value) => {
                txn.finish("committed");
                Ok(value)
            }
            Err(e) => {
                drop(txn);
                debug!(
                    target: "tally::store",
                    conn_id,
                    txn_id,
                    error = %e,
                    "transaction rolled back"
                );
                Err(e)
            }
        }
    }
}

/// An open transaction on a [`MemoryConnection`]
///
/// Holds the row locks acquired by `select_for_update`; dropping the
/// transaction (commit or rollback) releases them.
struct MemoryTxn<'c> {
    conn: &'c MemoryConnection,
    txn_id: u64,
    row_locks: Vec<(CounterId, RowLockGuard)>,
}

impl MemoryTxn<'_> {
    fn finish(self, outcome: &str) {
        // Guards drop here, releasing any row locks.
        debug!(
            target: "tally::store",
            conn_id = self.conn.conn_id,
            txn_id = self.txn_id,
            locks = self.row_locks.len(),
            "transaction {outcome}"
        );
    }

    fn holds_lock(&self, id: CounterId) -> bool {
        self.row_locks.iter().any(|(locked, _)| *locked == id)
    }
}

impl Transaction for MemoryTxn<'_> {
    fn select(&mut self, id: CounterId) -> Result<CounterRecord> {
        self.conn
            .rows
            .read()
            .get(&id)
            .map(|row| row.to_record(id))
            .ok_or(Error::CounterNotFound(id))
    }

    fn select_for_update(&mut self, id: CounterId) -> Result<CounterRecord> {
        if !self.holds_lock(id) {
            // Clone the mutex out of the lock table before blocking on it:
            // holding the table shard while waiting would stall unrelated
            // lock lookups.
            let mutex = self
                .conn
                .row_locks
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone();
            let guard = mutex.lock_arc();
            self.row_locks.push((id, guard));
        }
        self.select(id)
    }

    fn update_value(&mut self, id: CounterId, value: i64) -> Result<u64> {
        let mut rows = self.conn.rows.write();
        match rows.get_mut(&id) {
            Some(row) => {
                row.value = value;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn increment_value(&mut self, id: CounterId) -> Result<u64> {
        let mut rows = self.conn.rows.write();
        match rows.get_mut(&id) {
            Some(row) => {
                row.value += 1;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn update_if_version(
        &mut self,
        id: CounterId,
        value: i64,
        expected_version: u64,
    ) -> Result<u64> {
        let mut rows = self.conn.rows.write();
        match rows.get_mut(&id) {
            Some(row) if row.version == expected_version => {
                row.value = value;
                row.version = expected_version + 1;
                Ok(1)
            }
            // Stale version or missing row: zero rows affected, no error.
            _ => Ok(0),
        }
    }
}
