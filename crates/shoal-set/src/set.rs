//! The sparse set itself.

use std::sync::atomic::{AtomicI32, Ordering};

use shoal_store::{Collection, SharedRegion, View};

use crate::error::SetError;

/// Ordering for all index-structure access.
const ORDER: Ordering = Ordering::SeqCst;

/// Sentinel marking an identifier with no dense slot.
const VACANT: i32 = -1;

/// The shared index buffers of a [`SparseSet`], as transferable handles.
///
/// A receiving execution unit rebuilds the set with
/// [`SparseSet::with_buffers`], passing these together with a collection
/// hydrated from the dense region.
#[derive(Clone, Debug)]
pub struct SparseSetBuffers {
    /// id → dense index (or −1), `(max_id + 1)` words.
    pub sparse: SharedRegion,
    /// dense index → id, `capacity` words.
    pub dense_to_id: SharedRegion,
    /// The live-count word.
    pub count: SharedRegion,
}

/// Identifier indirection with dense, swap-compacted storage.
///
/// Invariant: for every id with `sparse[id] ≠ −1`,
/// `dense_to_id[sparse[id]] == id` and `sparse[id] < count`; dense slots
/// `[0, count)` are always live and contiguous.
///
/// # Concurrency
///
/// `count` is maintained atomically, so concurrent [`SparseSet::add`]
/// calls for *distinct* identifiers reserve unique dense slots. The
/// reserve-then-publish sequence is not one atomic transaction, though:
/// concurrent `add` calls for the *same* identifier can both reserve a
/// slot, leaking one and leaving the mapping pointing at whichever
/// write lands last. Same-id insertion needs an external lock or a
/// single-writer discipline; the structure deliberately does not pay
/// for one internally.
pub struct SparseSet {
    dense: Collection,
    sparse: SharedRegion,
    dense_to_id: SharedRegion,
    count: SharedRegion,
    max_id: usize,
}

impl SparseSet {
    /// Create a set over `dense` accepting identifiers in `[0, max_id]`.
    ///
    /// Allocates the three index buffers; every identifier starts
    /// absent.
    pub fn new(dense: Collection, max_id: usize) -> Self {
        let sparse = SharedRegion::zeroed((max_id + 1) * 4);
        // −1 in two's complement is all-ones, so one fill vacates the
        // whole identifier space.
        sparse.fill(0, sparse.len(), 0xFF);
        let dense_to_id = SharedRegion::zeroed(dense.capacity() * 4);
        let count = SharedRegion::zeroed(4);
        Self {
            dense,
            sparse,
            dense_to_id,
            count,
            max_id,
        }
    }

    /// Rebuild a set around transferred index buffers (worker
    /// hydration). The buffers' contents are taken as-is.
    ///
    /// Returns [`SetError::RegionTooSmall`] if any buffer is shorter
    /// than the set's geometry requires.
    pub fn with_buffers(
        dense: Collection,
        max_id: usize,
        buffers: SparseSetBuffers,
    ) -> Result<Self, SetError> {
        let checks = [
            (buffers.sparse.len(), (max_id + 1) * 4),
            (buffers.dense_to_id.len(), dense.capacity() * 4),
            (buffers.count.len(), 4),
        ];
        for (actual, required) in checks {
            if actual < required {
                return Err(SetError::RegionTooSmall { required, actual });
            }
        }
        Ok(Self {
            dense,
            sparse: buffers.sparse,
            dense_to_id: buffers.dense_to_id,
            count: buffers.count,
            max_id,
        })
    }

    /// Handles to the index buffers, for zero-copy transfer.
    pub fn buffers(&self) -> SparseSetBuffers {
        SparseSetBuffers {
            sparse: self.sparse.clone(),
            dense_to_id: self.dense_to_id.clone(),
            count: self.count.clone(),
        }
    }

    /// The dense collection backing this set.
    pub fn collection(&self) -> &Collection {
        &self.dense
    }

    /// The largest identifier this set accepts.
    pub fn max_id(&self) -> usize {
        self.max_id
    }

    /// The dense collection's fixed capacity.
    pub fn capacity(&self) -> usize {
        self.dense.capacity()
    }

    /// Number of live identifiers, as an atomically-visible signal.
    pub fn len(&self) -> usize {
        self.count_cell().load(ORDER).max(0) as usize
    }

    /// Whether no identifiers are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sparse_cell(&self, id: usize) -> Option<&AtomicI32> {
        (id <= self.max_id).then(|| self.sparse.atomic_i32(id * 4))
    }

    fn dense_cell(&self, index: usize) -> &AtomicI32 {
        self.dense_to_id.atomic_i32(index * 4)
    }

    fn count_cell(&self) -> &AtomicI32 {
        self.count.atomic_i32(0)
    }

    /// Whether `id` currently has a dense slot. An out-of-range id is
    /// simply absent, not an error.
    pub fn has(&self, id: usize) -> bool {
        self.sparse_cell(id)
            .is_some_and(|cell| cell.load(ORDER) != VACANT)
    }

    /// Insert `id`, returning a view over its dense record.
    ///
    /// Already-present identifiers return their existing record
    /// (idempotent; `len` unchanged). A new identifier atomically
    /// reserves the next dense index; the returned view may address a
    /// previous tenant's bytes — the caller populates the record.
    ///
    /// Fails with [`SetError::CapacityExceeded`] (reservation rolled
    /// back) when the collection is full, and with
    /// [`SetError::OutOfRange`] for an id beyond `max_id`.
    pub fn add(&self, id: usize) -> Result<View<'_>, SetError> {
        let cell = self.sparse_cell(id).ok_or(SetError::OutOfRange {
            id,
            max_id: self.max_id,
        })?;

        let existing = cell.load(ORDER);
        if existing != VACANT {
            return Ok(self.dense_view(existing as usize));
        }

        let index = self.count_cell().fetch_add(1, ORDER);
        if index as usize >= self.capacity() {
            self.count_cell().fetch_sub(1, ORDER);
            return Err(SetError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        cell.store(index, ORDER);
        self.dense_cell(index as usize).store(id as i32, ORDER);
        Ok(self.dense_view(index as usize))
    }

    /// The dense record for `id`, or `None` if absent.
    pub fn get(&self, id: usize) -> Option<View<'_>> {
        let index = self.sparse_cell(id)?.load(ORDER);
        if index == VACANT {
            return None;
        }
        Some(self.dense_view(index as usize))
    }

    /// The identifier occupying dense slot `index`, or `None` if the
    /// slot is not live. Useful for iterating `[0, len)` densely.
    pub fn id_at(&self, index: usize) -> Option<usize> {
        if index >= self.len() {
            return None;
        }
        Some(self.dense_cell(index).load(ORDER) as usize)
    }

    /// Remove `id`, swap-compacting the dense range. A no-op when `id`
    /// is absent or out of range.
    ///
    /// Dense indices are not stable across removal: the last live
    /// record is relocated into the freed slot and its mapping updated.
    pub fn remove(&self, id: usize) {
        let Some(cell) = self.sparse_cell(id) else {
            return;
        };
        let index = cell.load(ORDER);
        if index == VACANT {
            return;
        }

        let last = self.count_cell().fetch_sub(1, ORDER) - 1;
        if index != last {
            let moved_id = self.dense_cell(last as usize).load(ORDER);
            self.dense
                .copy(last as usize, index as usize)
                .expect("live dense indices are within capacity");
            self.sparse_cell(moved_id as usize)
                .expect("mapped ids are within the identifier space")
                .store(index, ORDER);
            self.dense_cell(index as usize).store(moved_id, ORDER);
        }
        cell.store(VACANT, ORDER);
    }

    fn dense_view(&self, index: usize) -> View<'_> {
        self.dense
            .get(index)
            .expect("mapped dense indices are within capacity")
    }
}

impl std::fmt::Debug for SparseSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparseSet")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("max_id", &self.max_id)
            .finish()
    }
}
