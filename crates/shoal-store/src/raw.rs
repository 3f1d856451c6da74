//! Raw byte region: the crate's single `unsafe` boundary.
//!
//! [`RawRegion`] owns an 8-byte-aligned, fixed-size block of bytes with
//! interior mutability, and exposes the three access families everything
//! else is built from: plain byte reads/writes, in-region copies, and
//! aligned atomic word access. All bounds and alignment checks happen
//! here, so the safe callers above (region, view, collection) cannot
//! reach out of bounds or produce a misaligned atomic.
//!
//! Concurrent plain access to the same bytes is permitted by the
//! documented contract (no ordering guarantee); coordinated access goes
//! through the atomic accessors.

#![allow(unsafe_code)]

use std::cell::UnsafeCell;
use std::ptr;
use std::sync::atomic::{AtomicI32, AtomicU16, AtomicU32, AtomicU8};

/// A fixed-size shared byte region.
///
/// Backed by `u64` words so the base address is 8-byte aligned — the
/// maximum alignment any field kind requires — which makes every
/// layout-computed field offset correctly aligned in absolute terms.
pub(crate) struct RawRegion {
    words: Box<[UnsafeCell<u64>]>,
    len: usize,
}

// One region is accessed from many threads through `&self`. The atomic
// accessors are synchronised by the hardware; plain accessors carry the
// documented no-ordering contract.
unsafe impl Sync for RawRegion {}

impl RawRegion {
    /// Allocate a zero-initialised region of `len` bytes.
    pub(crate) fn zeroed(len: usize) -> Self {
        let word_count = len.div_ceil(8);
        let words: Box<[UnsafeCell<u64>]> =
            (0..word_count).map(|_| UnsafeCell::new(0)).collect();
        Self { words, len }
    }

    /// Region length in bytes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn base(&self) -> *mut u8 {
        // UnsafeCell<u64> is repr(transparent) over u64.
        self.words.as_ptr() as *mut u8
    }

    fn check_range(&self, offset: usize, len: usize) {
        assert!(
            len <= self.len && offset <= self.len - len,
            "region access out of bounds: offset {offset}, len {len}, region {}",
            self.len
        );
    }

    fn check_word(&self, offset: usize, width: usize) {
        self.check_range(offset, width);
        assert!(
            offset % width == 0,
            "misaligned {width}-byte atomic access at offset {offset}"
        );
    }

    /// Copy `dst.len()` bytes out of the region starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region.
    pub(crate) fn read(&self, offset: usize, dst: &mut [u8]) {
        self.check_range(offset, dst.len());
        // SAFETY: range checked above; dst is a distinct allocation.
        unsafe {
            ptr::copy_nonoverlapping(self.base().add(offset), dst.as_mut_ptr(), dst.len());
        }
    }

    /// Copy `src` into the region starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region.
    pub(crate) fn write(&self, offset: usize, src: &[u8]) {
        self.check_range(offset, src.len());
        // SAFETY: range checked above; src is a distinct allocation.
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.base().add(offset), src.len());
        }
    }

    /// Set `len` bytes starting at `offset` to `byte`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region.
    pub(crate) fn fill(&self, offset: usize, len: usize, byte: u8) {
        self.check_range(offset, len);
        // SAFETY: range checked above.
        unsafe {
            ptr::write_bytes(self.base().add(offset), byte, len);
        }
    }

    /// Copy `len` bytes from `src` to `dst` within the region.
    ///
    /// Handles overlapping ranges (memmove semantics).
    ///
    /// # Panics
    ///
    /// Panics if either range exceeds the region.
    pub(crate) fn copy_within(&self, src: usize, dst: usize, len: usize) {
        self.check_range(src, len);
        self.check_range(dst, len);
        // SAFETY: both ranges checked above; ptr::copy permits overlap.
        unsafe {
            ptr::copy(self.base().add(src), self.base().add(dst), len);
        }
    }

    /// Atomic view of the byte at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` exceeds the region.
    pub(crate) fn atomic_u8(&self, offset: usize) -> &AtomicU8 {
        self.check_word(offset, 1);
        // SAFETY: in bounds, trivially aligned, and the returned borrow
        // keeps the region alive.
        unsafe { AtomicU8::from_ptr(self.base().add(offset)) }
    }

    /// Atomic view of the 16-bit word at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the word exceeds the region or `offset` is not 2-aligned.
    pub(crate) fn atomic_u16(&self, offset: usize) -> &AtomicU16 {
        self.check_word(offset, 2);
        // SAFETY: in bounds and 2-aligned (checked above); the base
        // address is 8-aligned, so offset alignment suffices.
        unsafe { AtomicU16::from_ptr(self.base().add(offset) as *mut u16) }
    }

    /// Atomic view of the 32-bit word at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the word exceeds the region or `offset` is not 4-aligned.
    pub(crate) fn atomic_u32(&self, offset: usize) -> &AtomicU32 {
        self.check_word(offset, 4);
        // SAFETY: in bounds and 4-aligned (checked above).
        unsafe { AtomicU32::from_ptr(self.base().add(offset) as *mut u32) }
    }

    /// Atomic view of the signed 32-bit word at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the word exceeds the region or `offset` is not 4-aligned.
    pub(crate) fn atomic_i32(&self, offset: usize) -> &AtomicI32 {
        self.check_word(offset, 4);
        // SAFETY: in bounds and 4-aligned (checked above).
        unsafe { AtomicI32::from_ptr(self.base().add(offset) as *mut i32) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn zeroed_region_reads_zero() {
        let region = RawRegion::zeroed(16);
        let mut buf = [0xFFu8; 16];
        region.read(0, &mut buf);
        assert_eq!(buf, [0u8; 16]);
    }

    #[test]
    fn write_then_read_round_trips() {
        let region = RawRegion::zeroed(8);
        region.write(2, &[1, 2, 3]);
        let mut buf = [0u8; 3];
        region.read(2, &mut buf);
        assert_eq!(buf, [1, 2, 3]);
    }

    #[test]
    fn odd_length_region_is_usable_to_the_last_byte() {
        let region = RawRegion::zeroed(5);
        region.write(4, &[9]);
        let mut buf = [0u8; 1];
        region.read(4, &mut buf);
        assert_eq!(buf, [9]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_read_panics() {
        let region = RawRegion::zeroed(4);
        let mut buf = [0u8; 2];
        region.read(3, &mut buf);
    }

    #[test]
    #[should_panic(expected = "misaligned")]
    fn misaligned_atomic_panics() {
        let region = RawRegion::zeroed(8);
        let _ = region.atomic_u32(2);
    }

    #[test]
    fn copy_within_moves_bytes() {
        let region = RawRegion::zeroed(8);
        region.write(0, &[1, 2, 3, 4]);
        region.copy_within(0, 4, 4);
        let mut buf = [0u8; 4];
        region.read(4, &mut buf);
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn fill_zeroes_a_tail() {
        let region = RawRegion::zeroed(8);
        region.write(0, &[7; 8]);
        region.fill(3, 5, 0);
        let mut buf = [0u8; 8];
        region.read(0, &mut buf);
        assert_eq!(buf, [7, 7, 7, 0, 0, 0, 0, 0]);
    }

    #[test]
    #[cfg(target_endian = "little")]
    fn atomic_word_aliases_plain_bytes() {
        let region = RawRegion::zeroed(8);
        region.atomic_u32(4).store(0x0403_0201, Ordering::SeqCst);
        let mut buf = [0u8; 4];
        region.read(4, &mut buf);
        // Matches the little-endian encoding the view layer fixes.
        assert_eq!(buf, 0x0403_0201u32.to_le_bytes());
    }
}
