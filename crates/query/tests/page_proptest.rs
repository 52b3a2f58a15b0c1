//! Property-based tests for pagination math and sort stability.

use finderdb_core::schema::{Entity, EntityBuilder};
use finderdb_core::{DataType, Record, Value};
use finderdb_query::executor::QueryRunner;
use finderdb_query::page::{page_window, Page, PageRequest};
use finderdb_query::planner::QueryPlan;
use finderdb_query::sort::SortSpec;
use proptest::prelude::*;

fn entity() -> Entity {
    EntityBuilder::new("simple")
        .unwrap()
        .add_field("age", DataType::Int)
        .unwrap()
        .build()
}

/// Strategy for a dataset of records with small integer keys, so key
/// collisions are common and stability is actually exercised.
fn records_strategy(max_rows: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(0i64..8, 0..max_rows).prop_map(|keys| {
        keys.into_iter()
            .enumerate()
            .map(|(i, k)| Record::new(i as u64 + 1, vec![Value::Int(k)]))
            .collect()
    })
}

proptest! {
    /// Property: the page window covers [p*s, min(n, (p+1)*s)).
    #[test]
    fn window_bounds(total in 0usize..500, page in 0usize..20, size in 1usize..40) {
        let (start, end) = page_window(total, page, size);
        prop_assert!(start <= end);
        prop_assert!(end <= total);
        prop_assert_eq!(start, (page * size).min(total));
        prop_assert!(end - start <= size);
    }

    /// Property: numberOfElements = max(0, min(s, n - p*s)) when p*s < n, else 0.
    #[test]
    fn number_of_elements(n in 0usize..200, page in 0usize..10, size in 1usize..20) {
        let records: Vec<Record> =
            (1..=n as u64).map(|i| Record::new(i, vec![Value::Int(0)])).collect();
        let request = PageRequest::new(page, size).unwrap();
        let page_result = QueryRunner::new(&entity())
            .run_page(&QueryPlan::scan_all(), records, &request)
            .unwrap();

        let expected = if page * size < n { size.min(n - page * size) } else { 0 };
        prop_assert_eq!(page_result.number_of_elements(), expected);
        prop_assert_eq!(page_result.total_elements(), n);
    }

    /// Property: totalPages = ceil(n / s), and 0 when n = 0.
    #[test]
    fn total_pages(n in 0usize..200, size in 1usize..20) {
        let request = PageRequest::new(0, size).unwrap();
        let page: Page<i64> = Page::new(Vec::new(), request, n);
        prop_assert_eq!(page.total_pages(), n.div_ceil(size));
        if n == 0 {
            prop_assert_eq!(page.total_pages(), 0);
        }
    }

    /// Property: the page invariants of the data model hold for non-empty sets:
    /// totalPages*s >= n > (totalPages-1)*s.
    #[test]
    fn page_count_brackets_total(n in 1usize..500, size in 1usize..40) {
        let request = PageRequest::new(0, size).unwrap();
        let page: Page<i64> = Page::new(Vec::new(), request, n);
        let pages = page.total_pages();
        prop_assert!(pages * size >= n);
        prop_assert!(n > (pages - 1) * size);
    }

    /// Property: sorting is stable - records with equal keys keep their
    /// insertion order under any direction.
    #[test]
    fn sort_is_stable(records in records_strategy(60), descending in any::<bool>()) {
        let entity = entity();
        let sort = if descending { SortSpec::desc("age") } else { SortSpec::asc("age") };
        let size = records.len().max(1);
        let request = PageRequest::sorted(0, size, sort).unwrap();

        let page = QueryRunner::new(&entity)
            .run_page(&QueryPlan::scan_all(), records.clone(), &request)
            .unwrap();
        let sorted = page.into_content();

        prop_assert_eq!(sorted.len(), records.len());
        for pair in sorted.windows(2) {
            let a = pair[0].get(0).and_then(Value::as_int).unwrap();
            let b = pair[1].get(0).and_then(Value::as_int).unwrap();
            if descending {
                prop_assert!(a >= b);
            } else {
                prop_assert!(a <= b);
            }
            // equal keys: insertion (id) order preserved
            if a == b {
                prop_assert!(pair[0].id() < pair[1].id());
            }
        }
    }

    /// Property: paging partitions the sorted result - concatenating all
    /// pages reproduces it exactly once.
    #[test]
    fn pages_partition_the_result(records in records_strategy(60), size in 1usize..10) {
        let entity = entity();
        let full_request = PageRequest::sorted(0, records.len().max(1), SortSpec::asc("age")).unwrap();
        let full = QueryRunner::new(&entity)
            .run_page(&QueryPlan::scan_all(), records.clone(), &full_request)
            .unwrap()
            .into_content();

        let mut collected = Vec::new();
        let mut page_index = 0;
        loop {
            let request = PageRequest::sorted(page_index, size, SortSpec::asc("age")).unwrap();
            let page = QueryRunner::new(&entity)
                .run_page(&QueryPlan::scan_all(), records.clone(), &request)
                .unwrap();
            let is_last = page.is_last();
            collected.extend(page.into_content());
            if is_last {
                break;
            }
            page_index += 1;
        }

        prop_assert_eq!(collected, full);
    }
}
