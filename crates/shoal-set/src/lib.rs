//! Sparse-set identifier indirection over Shoal collections.
//!
//! A [`SparseSet`] maps a sparse external identifier space onto the
//! densely packed slots of a [`shoal_store::Collection`], keeping live
//! records contiguous for cache-friendly iteration while preserving
//! O(1) lookup, insert, and remove by identifier. Removal swaps the
//! last live record into the hole (swap-compaction), so dense indices
//! are not stable across removals.
//!
//! The three index structures — `sparse` (id → dense index or −1),
//! `dense_to_id` (the reverse mapping), and the live `count` word — live
//! in their own shared regions so a worker pool can hydrate the whole
//! set from transferred handles.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod set;

pub use error::SetError;
pub use set::{SparseSet, SparseSetBuffers};
