//! Benchmark profiles and utilities for the Shoal storage engine.
//!
//! Provides the standard schemas and pre-populated stores the benches
//! and examples share:
//!
//! - [`particle_schema`]: the flyweight/iteration workload shape.
//! - [`shared_counter`]: one-record collection for contention benches.
//! - [`populated_set`]: a sparse set filled with a deterministic,
//!   seeded identifier sample.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use shoal_core::Schema;
use shoal_set::SparseSet;
use shoal_store::{Collection, CollectionConfig, LayoutMode};

/// Particle shape used by the field-access and iteration benches.
pub fn particle_schema() -> Schema {
    Schema::builder()
        .u32("id")
        .f32("x")
        .f32("y")
        .f32("vx")
        .f32("vy")
        .boolean("alive")
        .build()
}

/// Lock-plus-payload shape used by the contention benches.
pub fn contended_schema() -> Schema {
    Schema::builder().mutex("lock").i32("data").build()
}

/// A one-record collection holding a single shared `i32` counter.
pub fn shared_counter() -> (Schema, Collection) {
    let schema = Schema::builder().i32("val").build();
    let collection = Collection::new(&schema, 1);
    (schema, collection)
}

/// A particle collection of `capacity` records in the given mode.
pub fn particle_collection(capacity: usize, mode: LayoutMode) -> (Schema, Collection) {
    let schema = particle_schema();
    let collection = Collection::with_config(
        &schema,
        capacity,
        CollectionConfig { mode, region: None },
    )
    .expect("fresh region always fits");
    (schema, collection)
}

/// A sparse set over `capacity` particle records, pre-filled with
/// `fill` distinct identifiers drawn deterministically from `seed`.
pub fn populated_set(capacity: usize, max_id: usize, fill: usize, seed: u64) -> (Schema, SparseSet) {
    let (schema, collection) = particle_collection(capacity, LayoutMode::Row);
    let set = SparseSet::new(collection, max_id);
    let id_field = schema.field("id").unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut inserted = 0;
    while inserted < fill {
        // Drawn below max_id, leaving max_id itself as a guaranteed
        // fresh identifier for add/remove cycles.
        let id = rng.random_range(0..max_id);
        if !set.has(id) {
            set.add(id)
                .expect("fill is below capacity")
                .set_u32(id_field, id as u32);
            inserted += 1;
        }
    }
    (schema, set)
}
