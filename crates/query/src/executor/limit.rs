//! Limit executor.

use alloc::vec::Vec;
use finderdb_core::Record;

/// Limit executor - truncates an ordered result to its first N records.
///
/// Applied after sorting, so `Top N` reads off the front of the ordered set.
pub struct LimitExecutor {
    limit: usize,
}

impl LimitExecutor {
    /// Creates a new limit executor.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Executes the limit on the input records.
    pub fn execute(&self, mut input: Vec<Record>) -> Vec<Record> {
        input.truncate(self.limit);
        input
    }
}
