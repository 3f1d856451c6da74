//! A worker pool operating on one shared region.
//!
//! The coordinator allocates a particle collection, hands each worker a
//! region handle plus an index range, and waits on a channel for
//! completion — the full zero-copy transfer protocol: workers
//! reconstruct a collection with the same schema, capacity, and layout
//! mode, then write through their own flyweight views.
//!
//! Run with: `cargo run --example worker_pool -p shoal-bench`

use std::thread;

use crossbeam_channel::bounded;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use shoal_bench::particle_schema;
use shoal_store::{Collection, CollectionConfig, LayoutMode};

const CAPACITY: usize = 100_000;
const WORKERS: usize = 4;
const STEPS: usize = 100;

fn main() {
    let schema = particle_schema();
    let collection = Collection::with_config(
        &schema,
        CAPACITY,
        CollectionConfig {
            mode: LayoutMode::Column,
            region: None,
        },
    )
    .expect("fresh region always fits");

    // Seed the particles deterministically.
    let x = schema.field("x").unwrap();
    let y = schema.field("y").unwrap();
    let vx = schema.field("vx").unwrap();
    let vy = schema.field("vy").unwrap();
    let alive = schema.field("alive").unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut seed_view = collection.view();
    for i in 0..CAPACITY {
        seed_view.retarget(i);
        seed_view.set_f32(x, rng.random_range(-100.0..100.0));
        seed_view.set_f32(y, rng.random_range(-100.0..100.0));
        seed_view.set_f32(vx, rng.random_range(-1.0..1.0));
        seed_view.set_f32(vy, rng.random_range(-1.0..1.0));
        seed_view.set_bool(alive, true);
    }

    let chunk = CAPACITY / WORKERS;
    let (done_tx, done_rx) = bounded(WORKERS);
    let started = std::time::Instant::now();

    thread::scope(|scope| {
        for worker in 0..WORKERS {
            let region = collection.region();
            let schema = schema.clone();
            let done = done_tx.clone();
            scope.spawn(move || {
                let local = Collection::with_config(
                    &schema,
                    CAPACITY,
                    CollectionConfig::wrapping(LayoutMode::Column, region),
                )
                .expect("region sized by the coordinator");
                let x = schema.field("x").unwrap();
                let y = schema.field("y").unwrap();
                let vx = schema.field("vx").unwrap();
                let vy = schema.field("vy").unwrap();

                let begin = worker * chunk;
                let end = begin + chunk;
                let mut view = local.view();
                for _ in 0..STEPS {
                    for i in begin..end {
                        view.retarget(i);
                        view.set_f32(x, view.get_f32(x) + view.get_f32(vx));
                        view.set_f32(y, view.get_f32(y) + view.get_f32(vy));
                    }
                }
                done.send(worker).expect("coordinator outlives workers");
            });
        }

        for _ in 0..WORKERS {
            let worker = done_rx.recv().expect("worker completion signal");
            println!("worker {worker} finished");
        }
    });

    let elapsed = started.elapsed();
    let checksum: f32 = {
        let mut view = collection.view();
        (0..CAPACITY)
            .map(|i| {
                view.retarget(i);
                view.get_f32(x)
            })
            .sum()
    };
    println!(
        "{WORKERS} workers × {STEPS} steps over {CAPACITY} particles in {elapsed:?} (checksum {checksum:.3})"
    );
}
