//! Test fixtures and shared schemas for Shoal development.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod fixtures;

pub use fixtures::{counter_schema, guarded_schema, player_schema, vec2_schema};
