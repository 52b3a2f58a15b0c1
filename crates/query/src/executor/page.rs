//! Page executor.

use crate::page::{page_window, Page, PageRequest};
use alloc::vec::Vec;
use finderdb_core::Record;

/// Page executor - slices the page window out of an ordered result set.
pub struct PageExecutor<'a> {
    request: &'a PageRequest,
}

impl<'a> PageExecutor<'a> {
    /// Creates a new page executor.
    pub fn new(request: &'a PageRequest) -> Self {
        Self { request }
    }

    /// Executes the paging on the input records.
    ///
    /// The total element count is taken from the input length, so the input
    /// must be the full filtered result set.
    pub fn execute(&self, mut input: Vec<Record>) -> Page<Record> {
        let total = input.len();
        let (start, end) = page_window(total, self.request.page(), self.request.size());

        // Truncate tail first, then drop the head
        input.truncate(end);
        if start > 0 {
            input.drain(..start);
        }

        Page::new(input, self.request.clone(), total)
    }
}
