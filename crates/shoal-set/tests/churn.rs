//! Sparse-set behavior across threads and under randomized churn.

use crossbeam_channel::bounded;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use shoal_set::{SparseSet, SparseSetBuffers};
use shoal_store::{Collection, CollectionConfig};
use shoal_test_utils::player_schema;

fn hydrated_twin(set: &SparseSet, max_id: usize) -> SparseSet {
    let dense = set.collection();
    let collection = Collection::with_config(
        dense.schema(),
        dense.capacity(),
        CollectionConfig::wrapping(dense.mode(), dense.region()),
    )
    .expect("region sized by the producing collection");
    SparseSet::with_buffers(collection, max_id, set.buffers())
        .expect("buffers sized by the producing set")
}

#[test]
fn concurrent_adds_of_distinct_ids_reserve_unique_slots() {
    const WORKERS: usize = 4;
    const PER_WORKER: usize = 250;

    let schema = player_schema();
    let set = SparseSet::new(Collection::new(&schema, WORKERS * PER_WORKER), 10_000);
    let id_field = schema.field("id").unwrap();

    let (done_tx, done_rx) = bounded(WORKERS);
    std::thread::scope(|scope| {
        for worker in 0..WORKERS {
            let twin = hydrated_twin(&set, 10_000);
            let schema = schema.clone();
            let done = done_tx.clone();
            scope.spawn(move || {
                let id_field = schema.field("id").unwrap();
                for i in 0..PER_WORKER {
                    let id = worker * PER_WORKER + i;
                    let view = twin.add(id).expect("capacity covers all workers");
                    view.set_u32(id_field, id as u32);
                }
                done.send(()).unwrap();
            });
        }
        for _ in 0..WORKERS {
            done_rx.recv().unwrap();
        }
    });

    // Every id is live, mapped to a unique slot holding its own data.
    assert_eq!(set.len(), WORKERS * PER_WORKER);
    for id in 0..WORKERS * PER_WORKER {
        let view = set.get(id).expect("id inserted by some worker");
        assert_eq!(view.get_u32(id_field) as usize, id);
    }
}

#[test]
fn randomized_churn_preserves_data_and_mappings() {
    const CAPACITY: usize = 64;
    const MAX_ID: usize = 255;
    const OPS: usize = 5_000;

    let schema = player_schema();
    let set = SparseSet::new(Collection::new(&schema, CAPACITY), MAX_ID);
    let hp = schema.field("health").unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    let mut live: Vec<usize> = Vec::new();

    for _ in 0..OPS {
        if live.len() < CAPACITY && (live.is_empty() || rng.random_bool(0.6)) {
            let id = rng.random_range(0..=MAX_ID);
            if !set.has(id) {
                let view = set.add(id).expect("checked below capacity");
                // A fresh slot may hold a previous tenant's bytes; the
                // caller populates it.
                view.set_u32(schema.field("id").unwrap(), id as u32);
                view.set_u8(hp, (id % 251) as u8);
                live.push(id);
            }
        } else if let Some(&id) = live.choose(&mut rng) {
            set.remove(id);
            live.retain(|&x| x != id);
        }

        assert_eq!(set.len(), live.len());
    }

    // Every surviving id still carries the payload written at insert,
    // through every swap-compaction it was dragged through.
    for &id in &live {
        let view = set.get(id).expect("tracked as live");
        assert_eq!(view.get_u8(hp), (id % 251) as u8);
    }
}

#[test]
fn count_is_visible_across_hydrated_twins() {
    let schema = player_schema();
    let set = SparseSet::new(Collection::new(&schema, 8), 100);
    let SparseSetBuffers { count, .. } = set.buffers();

    set.add(1).unwrap();
    set.add(2).unwrap();

    // The raw count word and a hydrated twin agree with the original.
    assert_eq!(count.atomic_i32(0).load(std::sync::atomic::Ordering::SeqCst), 2);
    assert_eq!(hydrated_twin(&set, 100).len(), 2);
}
