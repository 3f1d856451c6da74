//! Criterion micro-benchmarks for atomic field operations and lock words.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shoal_bench::{contended_schema, shared_counter};
use shoal_store::{Collection, CollectionConfig, LayoutMode};

/// Benchmark: uncontended atomic increments on one shared counter.
fn bench_atomic_add(c: &mut Criterion) {
    let (schema, collection) = shared_counter();
    let val = schema.field("val").unwrap();
    let view = collection.get(0).unwrap();

    c.bench_function("atomic_add", |b| {
        b.iter(|| black_box(view.fetch_add(val, 1)));
    });
}

/// Benchmark: uncontended lock/unlock cycle around one plain write.
fn bench_mutex_cycle(c: &mut Criterion) {
    let schema = contended_schema();
    let collection = Collection::new(&schema, 1);
    let lock = schema.field("lock").unwrap();
    let data = schema.field("data").unwrap();
    let view = collection.get(0).unwrap();

    c.bench_function("mutex_cycle", |b| {
        b.iter(|| {
            view.lock(lock);
            view.set_i32(data, view.get_i32(data) + 1);
            view.unlock(lock);
        });
    });
}

/// Benchmark: four threads hammering one counter — atomics vs a mutex
/// guarding a plain field.
fn bench_contended(c: &mut Criterion) {
    const WORKERS: usize = 4;
    const PER_WORKER: usize = 10_000;

    let mut group = c.benchmark_group("contended_4x10k");
    group.sample_size(10);

    group.bench_function("atomic", |b| {
        let (schema, collection) = shared_counter();
        b.iter(|| {
            std::thread::scope(|scope| {
                for _ in 0..WORKERS {
                    let region = collection.region();
                    let schema = schema.clone();
                    scope.spawn(move || {
                        let local = Collection::with_config(
                            &schema,
                            1,
                            CollectionConfig::wrapping(LayoutMode::Row, region),
                        )
                        .unwrap();
                        let val = schema.field("val").unwrap();
                        let view = local.get(0).unwrap();
                        for _ in 0..PER_WORKER {
                            view.fetch_add(val, 1);
                        }
                    });
                }
            });
        });
    });

    group.bench_function("mutex", |b| {
        let schema = contended_schema();
        let collection = Collection::new(&schema, 1);
        b.iter(|| {
            std::thread::scope(|scope| {
                for _ in 0..WORKERS {
                    let region = collection.region();
                    let schema = schema.clone();
                    scope.spawn(move || {
                        let local = Collection::with_config(
                            &schema,
                            1,
                            CollectionConfig::wrapping(LayoutMode::Row, region),
                        )
                        .unwrap();
                        let lock = schema.field("lock").unwrap();
                        let data = schema.field("data").unwrap();
                        let view = local.get(0).unwrap();
                        for _ in 0..PER_WORKER {
                            view.lock(lock);
                            view.set_i32(data, view.get_i32(data) + 1);
                            view.unlock(lock);
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_atomic_add, bench_mutex_cycle, bench_contended);
criterion_main!(benches);
