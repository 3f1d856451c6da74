//! The shared region handle.
//!
//! [`SharedRegion`] is the opaque buffer handle of the storage engine:
//! a fixed-size, zero-initialised byte region with interior mutability,
//! shared by reference. `Clone` copies the handle, not the bytes — that
//! is the zero-copy transfer surface for handing a region to another
//! execution unit, which must reconstruct a collection with an identical
//! schema, capacity, and layout mode to interpret it (no self-describing
//! header exists).

use std::fmt;
use std::sync::atomic::{AtomicI32, AtomicU16, AtomicU32, AtomicU8};
use std::sync::Arc;

use crate::raw::RawRegion;

/// A reference-counted handle to one fixed-size shared byte region.
///
/// The region lives as long as its longest-held handle and is never
/// resized. Plain reads and writes carry no cross-thread ordering
/// guarantee; the atomic accessors are sequentially consistent for the
/// accessed word only.
#[derive(Clone)]
pub struct SharedRegion {
    raw: Arc<RawRegion>,
}

impl SharedRegion {
    /// Allocate a new zero-initialised region of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            raw: Arc::new(RawRegion::zeroed(len)),
        }
    }

    /// Region length in bytes.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the region has zero length.
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Whether two handles refer to the same region.
    pub fn same_region(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.raw, &other.raw)
    }

    /// Copy bytes out of the region into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region.
    pub fn read(&self, offset: usize, dst: &mut [u8]) {
        self.raw.read(offset, dst);
    }

    /// Copy `src` into the region.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region.
    pub fn write(&self, offset: usize, src: &[u8]) {
        self.raw.write(offset, src);
    }

    /// Set `len` bytes starting at `offset` to `byte`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region.
    pub fn fill(&self, offset: usize, len: usize, byte: u8) {
        self.raw.fill(offset, len, byte);
    }

    /// Copy `len` bytes from `src` to `dst` within the region
    /// (overlap-safe).
    ///
    /// # Panics
    ///
    /// Panics if either range exceeds the region.
    pub fn copy_within(&self, src: usize, dst: usize, len: usize) {
        self.raw.copy_within(src, dst, len);
    }

    /// Atomic view of the byte at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` exceeds the region.
    pub fn atomic_u8(&self, offset: usize) -> &AtomicU8 {
        self.raw.atomic_u8(offset)
    }

    /// Atomic view of the 16-bit word at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the word exceeds the region or is misaligned.
    pub fn atomic_u16(&self, offset: usize) -> &AtomicU16 {
        self.raw.atomic_u16(offset)
    }

    /// Atomic view of the 32-bit word at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the word exceeds the region or is misaligned.
    pub fn atomic_u32(&self, offset: usize) -> &AtomicU32 {
        self.raw.atomic_u32(offset)
    }

    /// Atomic view of the signed 32-bit word at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the word exceeds the region or is misaligned.
    pub fn atomic_i32(&self, offset: usize) -> &AtomicI32 {
        self.raw.atomic_i32(offset)
    }
}

impl fmt::Debug for SharedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRegion")
            .field("len", &self.len())
            .field("handles", &Arc::strong_count(&self.raw))
            .finish()
    }
}
