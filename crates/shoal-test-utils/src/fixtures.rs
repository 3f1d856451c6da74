//! Reusable schema fixtures.
//!
//! Standard schemas used across integration tests and benchmarks:
//!
//! - [`counter_schema`] — a single atomic counter word.
//! - [`guarded_schema`] — a lock word plus the fields it guards.
//! - [`vec2_schema`] / [`player_schema`] — a nested game-entity shape
//!   exercising every field kind class.

use shoal_core::Schema;

/// A single `i32` counter field named `val`.
pub fn counter_schema() -> Schema {
    Schema::builder().i32("val").build()
}

/// A mutex field `lock` guarding two plain fields `data` and `checksum`.
///
/// The pair lets tests assert cross-field consistency under the lock:
/// writers keep `checksum == data * 2`, and any reader that takes the
/// lock must never observe the invariant broken.
pub fn guarded_schema() -> Schema {
    Schema::builder()
        .mutex("lock")
        .i32("data")
        .i32("checksum")
        .build()
}

/// A two-component float vector.
pub fn vec2_schema() -> Schema {
    Schema::builder().f32("x").f32("y").build()
}

/// A game-entity schema covering integers, floats, a boolean, a fixed
/// string, and a nested record.
pub fn player_schema() -> Schema {
    Schema::builder()
        .u32("id")
        .u8("health")
        .boolean("active")
        .string("name", 16)
        .nested("pos", &vec2_schema())
        .build()
}
