//! Embedded transactional counter store
//!
//! This crate implements the `tally-core` store traits with an in-process
//! engine, [`MemoryStore`]:
//! - A latched row table gives every statement single-statement atomicity,
//!   which is the read-committed visibility the strategies observe.
//! - A row-lock table provides `SELECT ... FOR UPDATE` semantics: the lock
//!   taken by `select_for_update` is held until the transaction ends.
//! - Version-conditioned writes report how many rows they affected, which
//!   is the stale-write signal the optimistic strategy keys off.
//!
//! Statements apply eagerly, so visibility matches a server that commits
//! each statement's effect at statement end. That is exactly the isolation
//! the benchmark needs: weak enough for the naive strategy to lose updates,
//! strong enough for the other three strategies to be exact.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod memory;
mod row;

pub use memory::{MemoryConnection, MemoryStore};
