//! Storage-side representation of a counter row
//!
//! The contract type `CounterRecord` carries the row id so callers can log
//! and report it. Inside the row table the id is the map key, so the stored
//! form keeps only the mutable fields.

use tally_core::{CounterId, CounterRecord};

/// A counter row as held in the row table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CounterRow {
    /// Current counter value
    pub value: i64,
    /// Version stamp, bumped only by conditional writes
    pub version: u64,
}

impl CounterRow {
    /// A freshly reset row
    pub fn fresh() -> Self {
        CounterRow {
            value: 0,
            version: 0,
        }
    }

    /// Convert to the contract record for the given id
    pub fn to_record(self, id: CounterId) -> CounterRecord {
        CounterRecord {
            id,
            value: self.value,
            version: self.version,
        }
    }
}
