//! Sort executor.

use crate::ast::FieldRef;
use crate::sort::SortOrder;
use alloc::vec::Vec;
use core::cmp::Ordering;
use finderdb_core::Record;

/// Sort executor - stable multi-key sort over records.
///
/// Stability matters: records with equal keys keep their input order, which
/// for store scans is insertion order.
pub struct SortExecutor {
    /// Resolved sort keys and directions.
    order_by: Vec<(FieldRef, SortOrder)>,
}

impl SortExecutor {
    /// Creates a new sort executor.
    pub fn new(order_by: Vec<(FieldRef, SortOrder)>) -> Self {
        Self { order_by }
    }

    /// Executes the sort on the input records.
    pub fn execute(&self, mut input: Vec<Record>) -> Vec<Record> {
        if self.order_by.is_empty() {
            return input;
        }
        input.sort_by(|a, b| self.compare(a, b));
        input
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for (field, order) in &self.order_by {
            let cmp = match field {
                FieldRef::Id => a.id().cmp(&b.id()),
                FieldRef::Field { index } => {
                    let a_val = a.get(*index);
                    let b_val = b.get(*index);
                    match (a_val, b_val) {
                        (Some(av), Some(bv)) => av.cmp(bv),
                        (None, Some(_)) => Ordering::Less,
                        (Some(_), None) => Ordering::Greater,
                        (None, None) => Ordering::Equal,
                    }
                }
            };

            if cmp != Ordering::Equal {
                return match order {
                    SortOrder::Asc => cmp,
                    SortOrder::Desc => cmp.reverse(),
                };
            }
        }
        Ordering::Equal
    }
}
