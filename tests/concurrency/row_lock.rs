//! Row Lock Tests
//!
//! The pessimistic strategy relies on `select_for_update` holding the row's
//! exclusive lock until the transaction ends. These tests check the lock
//! semantics directly at the store level: critical sections never overlap,
//! and a blocked acquirer observes the committed result of the lock holder.

use crate::common;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use tally::{Connection, CounterStore, Transaction};

// ============================================================================
// Mutual Exclusion
// ============================================================================

#[test]
fn critical_sections_never_overlap() {
    let store = Arc::new(common::store_with_row());
    let holders = Arc::new(AtomicU32::new(0));
    let overlap = Arc::new(AtomicBool::new(false));
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let holders = Arc::clone(&holders);
            let overlap = Arc::clone(&overlap);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                let mut conn = store.connect().unwrap();
                barrier.wait();

                for _ in 0..25 {
                    conn.transaction(|txn| {
                        let record = txn.select_for_update(common::ID)?;
                        if holders.fetch_add(1, Ordering::SeqCst) != 0 {
                            overlap.store(true, Ordering::SeqCst);
                        }
                        // Widen the window a conflicting holder would need.
                        thread::sleep(Duration::from_micros(50));
                        holders.fetch_sub(1, Ordering::SeqCst);
                        txn.update_value(common::ID, record.value + 1)?;
                        Ok(())
                    })
                    .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(
        !overlap.load(Ordering::SeqCst),
        "two lock holders were inside the critical section at once"
    );
    assert_eq!(store.read_value(common::ID).unwrap(), 100);
}

// ============================================================================
// Blocking Reads
// ============================================================================

#[test]
fn blocked_acquirer_sees_holders_commit() {
    let store = Arc::new(common::store_with_row());
    let locked = Arc::new(AtomicBool::new(false));

    let holder = {
        let store = Arc::clone(&store);
        let locked = Arc::clone(&locked);
        thread::spawn(move || {
            let mut conn = store.connect().unwrap();
            conn.transaction(|txn| {
                txn.select_for_update(common::ID)?;
                locked.store(true, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(50));
                txn.update_value(common::ID, 42)?;
                Ok(())
            })
            .unwrap();
        })
    };

    while !locked.load(Ordering::SeqCst) {
        thread::yield_now();
    }

    // This select_for_update blocks until the holder commits, so the value
    // it returns must include the holder's write.
    let mut conn = store.connect().unwrap();
    let record = conn
        .transaction(|txn| txn.select_for_update(common::ID))
        .unwrap();
    assert_eq!(record.value, 42);

    holder.join().unwrap();
}
