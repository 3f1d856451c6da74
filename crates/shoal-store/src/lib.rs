//! Shared regions, views, and collections for the Shoal storage engine.
//!
//! This crate binds a computed [`shoal_core::Layout`] to actual shared
//! memory. It is the only crate in the workspace permitted `unsafe`
//! code, bounded to the private `raw` module.
//!
//! # Architecture
//!
//! ```text
//! Collection (owns the region, binds the plan)
//! ├── SharedRegion (Arc'd fixed-size byte region, clone = zero-copy handle)
//! │   └── raw::RawRegion (8-byte-aligned backing, the unsafe boundary)
//! ├── AccessPlan (per-field descriptor table, row or column addressing)
//! └── View (non-owning cursor: plain get/set, atomics, lock words)
//! ```
//!
//! # Concurrency
//!
//! Any number of execution units may hold clones of one region and
//! operate on it through their own collections and views. Plain field
//! access carries no cross-thread ordering guarantee; the atomic and
//! lock operations on integer and mutex fields are sequentially
//! consistent for that single field only. Multi-field consistency
//! requires an explicit mutex field around the sequence.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod collection;
pub mod error;
pub mod plan;
mod raw;
pub mod region;
pub mod view;

pub use collection::{Collection, CollectionConfig};
pub use error::StoreError;
pub use plan::{AccessPlan, LayoutMode};
pub use region::SharedRegion;
pub use view::View;
