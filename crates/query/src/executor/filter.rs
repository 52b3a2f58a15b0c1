//! Filter executor.

use crate::ast::CompiledPredicate;
use alloc::vec::Vec;
use finderdb_core::Record;

/// Filter executor - keeps records matching a predicate.
pub struct FilterExecutor<'a> {
    predicate: &'a CompiledPredicate,
}

impl<'a> FilterExecutor<'a> {
    /// Creates a new filter executor.
    pub fn new(predicate: &'a CompiledPredicate) -> Self {
        Self { predicate }
    }

    /// Executes the filter on the input records.
    pub fn execute(&self, input: Vec<Record>) -> Vec<Record> {
        if self.predicate.is_always() {
            return input;
        }
        input
            .into_iter()
            .filter(|record| self.predicate.matches(record))
            .collect()
    }
}
