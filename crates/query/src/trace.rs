//! Execution tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect execution
//! semantics.

/// Pipeline phases reported to a trace sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracePhase {
    Filter,
    Sort,
    Limit,
    Page,
}

/// A sink for execution events.
pub trait TraceSink {
    /// Called after each pipeline phase with the number of rows it produced.
    fn on_phase(&self, phase: TracePhase, rows: usize);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    #[derive(Default)]
    struct Recording {
        events: RefCell<alloc::vec::Vec<(TracePhase, usize)>>,
    }

    impl TraceSink for Recording {
        fn on_phase(&self, phase: TracePhase, rows: usize) {
            self.events.borrow_mut().push((phase, rows));
        }
    }

    #[test]
    fn test_sink_records_phases() {
        let sink = Recording::default();
        sink.on_phase(TracePhase::Filter, 3);
        sink.on_phase(TracePhase::Page, 2);
        assert_eq!(
            *sink.events.borrow(),
            alloc::vec![(TracePhase::Filter, 3), (TracePhase::Page, 2)]
        );
    }
}
