//! Query runner: the filter → sort → limit/page pipeline.

use crate::executor::{FilterExecutor, LimitExecutor, PageExecutor, SortExecutor};
use crate::page::{Page, PageRequest};
use crate::planner::QueryPlan;
use crate::trace::{TracePhase, TraceSink};
use alloc::vec::Vec;
use finderdb_core::schema::Entity;
use finderdb_core::{Record, Result};

/// Executes query plans over a snapshot of records.
///
/// The input records must be in insertion (id) order; the stable sort then
/// breaks ties by insertion order.
pub struct QueryRunner<'a> {
    entity: &'a Entity,
    trace: Option<&'a dyn TraceSink>,
}

impl<'a> QueryRunner<'a> {
    /// Creates a runner for an entity.
    pub fn new(entity: &'a Entity) -> Self {
        Self {
            entity,
            trace: None,
        }
    }

    /// Attaches a trace sink.
    pub fn with_trace(mut self, trace: &'a dyn TraceSink) -> Self {
        self.trace = Some(trace);
        self
    }

    fn emit(&self, phase: TracePhase, rows: usize) {
        if let Some(trace) = self.trace {
            trace.on_phase(phase, rows);
        }
    }

    /// Runs a plan, returning the ordered, filtered, limited records.
    pub fn run(&self, plan: &QueryPlan, records: Vec<Record>) -> Vec<Record> {
        let filtered = FilterExecutor::new(plan.predicate()).execute(records);
        self.emit(TracePhase::Filter, filtered.len());

        let sorted = SortExecutor::new(plan.order_by().to_vec()).execute(filtered);
        self.emit(TracePhase::Sort, sorted.len());

        match plan.limit() {
            Some(limit) => {
                let limited = LimitExecutor::new(limit).execute(sorted);
                self.emit(TracePhase::Limit, limited.len());
                limited
            }
            None => sorted,
        }
    }

    /// Runs a plan and slices one page of the result.
    ///
    /// The request's sort keys order after the plan's own keys, as
    /// tie-breakers. The page window governs slicing, so a plan's `Top N`
    /// limit does not apply here; the total element count is the full
    /// filtered set.
    pub fn run_page(
        &self,
        plan: &QueryPlan,
        records: Vec<Record>,
        request: &PageRequest,
    ) -> Result<Page<Record>> {
        let request_keys = request.sort().resolve(self.entity)?;
        let plan = plan.clone().with_appended_sort(request_keys);

        let filtered = FilterExecutor::new(plan.predicate()).execute(records);
        self.emit(TracePhase::Filter, filtered.len());

        let sorted = SortExecutor::new(plan.order_by().to_vec()).execute(filtered);
        self.emit(TracePhase::Sort, sorted.len());

        let page = PageExecutor::new(request).execute(sorted);
        self.emit(TracePhase::Page, page.number_of_elements());
        Ok(page)
    }
}
