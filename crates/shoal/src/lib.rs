//! Schema-driven shared-memory structured storage with zero-allocation
//! views.
//!
//! Shoal lays out user-declared record schemas into one contiguous
//! shared region with deterministic byte offsets, then exposes
//! non-owning view cursors for reading and writing fields directly in
//! place — including atomic read-modify-write and per-field lock words —
//! so that many threads can operate on one region without copying data.
//! A sparse set layers identifier indirection and swap-compacted dense
//! iteration on top.
//!
//! # Quick start
//!
//! ```
//! use shoal::{Collection, Schema, SparseSet};
//!
//! let schema = Schema::builder()
//!     .u32("id")
//!     .u8("health")
//!     .string("name", 16)
//!     .build();
//!
//! let entities = SparseSet::new(Collection::new(&schema, 1024), 4095);
//!
//! let id = schema.field("id").unwrap();
//! let health = schema.field("health").unwrap();
//!
//! let view = entities.add(42).unwrap();
//! view.set_u32(id, 42);
//! view.set_u8(health, 100);
//!
//! assert_eq!(entities.get(42).unwrap().get_u8(health), 100);
//! entities.remove(42);
//! assert!(!entities.has(42));
//! ```
//!
//! # Crates
//!
//! - [`shoal_core`]: schema declarations and the layout engine.
//! - [`shoal_store`]: shared regions, views, collections.
//! - [`shoal_set`]: the sparse set.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use shoal_core::{FieldKind, FieldRef, FieldSlot, Layout, Schema, SchemaBuilder};
pub use shoal_set::{SetError, SparseSet, SparseSetBuffers};
pub use shoal_store::{
    AccessPlan, Collection, CollectionConfig, LayoutMode, SharedRegion, StoreError, View,
};
