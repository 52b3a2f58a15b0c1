//! Benchmarks for the record store.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finderdb_core::schema::{Entity, EntityBuilder};
use finderdb_core::{DataType, Value};
use finderdb_storage::RecordStore;

fn entity() -> Entity {
    EntityBuilder::new("simple")
        .unwrap()
        .add_field("name", DataType::Str)
        .unwrap()
        .add_field("age", DataType::Int)
        .unwrap()
        .build()
}

fn filled_store(n: u64) -> RecordStore {
    let mut store = RecordStore::new(entity());
    for i in 1..=n {
        store
            .insert(vec![
                Value::Str(format!("person{}", i)),
                Value::Int((i % 60) as i64),
            ])
            .unwrap();
    }
    store
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_10k", |b| {
        b.iter(|| black_box(filled_store(10_000)))
    });
}

fn bench_scan(c: &mut Criterion) {
    let store = filled_store(10_000);
    c.bench_function("scan_10k", |b| {
        b.iter(|| black_box(store.scan().count()))
    });
}

fn bench_delete_many(c: &mut Criterion) {
    let ids: Vec<u64> = (1..=10_000).step_by(2).collect();
    c.bench_function("delete_many_5k_of_10k", |b| {
        b.iter_batched(
            || filled_store(10_000),
            |mut store| black_box(store.delete_many(&ids)),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_insert, bench_scan, bench_delete_many);
criterion_main!(benches);
