//! Collections: a schema, a capacity, and the region that backs them.
//!
//! A [`Collection`] owns (or wraps) one [`SharedRegion`] holding
//! `capacity` records of one schema in a chosen [`LayoutMode`], and
//! binds the compiled [`AccessPlan`] to it. It hands out [`View`]
//! cursors — freshly bound per index, or one reusable flyweight — and
//! performs record-to-record copies for swap-compaction.

use shoal_core::Schema;

use crate::error::StoreError;
use crate::plan::{AccessPlan, LayoutMode, PlanSlot};
use crate::region::SharedRegion;
use crate::view::View;

/// Construction options for a [`Collection`].
///
/// The default is row layout with a freshly allocated region. Supplying
/// an existing region is the receiving half of a zero-copy transfer;
/// only the region's *length* is validated against the plan — nothing
/// records how the bytes were originally produced, so binding a region
/// with a different schema, capacity, or layout mode than its producer
/// reads garbage. That contract is the caller's to uphold.
#[derive(Clone, Debug, Default)]
pub struct CollectionConfig {
    /// Physical record arrangement.
    pub mode: LayoutMode,
    /// Existing region to wrap instead of allocating a new one.
    pub region: Option<SharedRegion>,
}

impl CollectionConfig {
    /// Row layout, fresh region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column layout, fresh region.
    pub fn column() -> Self {
        Self {
            mode: LayoutMode::Column,
            region: None,
        }
    }

    /// Wrap an existing region.
    pub fn wrapping(mode: LayoutMode, region: SharedRegion) -> Self {
        Self {
            mode,
            region: Some(region),
        }
    }
}

/// A fixed-capacity collection of records in one shared region.
pub struct Collection {
    schema: Schema,
    capacity: usize,
    plan: AccessPlan,
    region: SharedRegion,
}

impl Collection {
    /// Allocate a new zero-initialised collection in row layout.
    pub fn new(schema: &Schema, capacity: usize) -> Self {
        Self::with_config(schema, capacity, CollectionConfig::new())
            .expect("a freshly allocated region always fits its own plan")
    }

    /// Construct a collection with explicit options.
    ///
    /// Returns [`StoreError::RegionTooSmall`] if a supplied region is
    /// shorter than the plan requires.
    pub fn with_config(
        schema: &Schema,
        capacity: usize,
        config: CollectionConfig,
    ) -> Result<Self, StoreError> {
        let plan = AccessPlan::compile(schema, config.mode, capacity);
        let region = match config.region {
            Some(region) => {
                if region.len() < plan.required_len() {
                    return Err(StoreError::RegionTooSmall {
                        required: plan.required_len(),
                        actual: region.len(),
                    });
                }
                region
            }
            None => SharedRegion::zeroed(plan.required_len()),
        };
        Ok(Self {
            schema: schema.clone(),
            capacity,
            plan,
            region,
        })
    }

    /// The schema this collection stores.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Fixed record capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Physical layout mode.
    pub fn mode(&self) -> LayoutMode {
        self.plan.mode()
    }

    /// A handle to the backing region, for zero-copy transfer to another
    /// execution unit (which must reconstruct a collection with the same
    /// schema, capacity, and mode to interpret it).
    pub fn region(&self) -> SharedRegion {
        self.region.clone()
    }

    /// A freshly bound view over the record at `index`.
    ///
    /// Returns [`StoreError::OutOfRange`] when `index ≥ capacity`.
    pub fn get(&self, index: usize) -> Result<View<'_>, StoreError> {
        if index >= self.capacity {
            return Err(StoreError::OutOfRange {
                index,
                capacity: self.capacity,
            });
        }
        Ok(View::bind(&self.region, &self.plan, index))
    }

    /// The reusable flyweight: one view, bound to record 0, meant to be
    /// [`View::retarget`]ed across many indices without allocating.
    pub fn view(&self) -> View<'_> {
        View::bind(&self.region, &self.plan, 0)
    }

    /// Copy every field of record `from` over record `to`.
    ///
    /// A no-op when the indices are equal. Row layout copies the record
    /// as one contiguous byte range; column layout has no contiguous
    /// range to copy, so it degrades to per-field assignment, recursing
    /// through nested records. Either way the copy is **not** atomic
    /// across fields: a concurrent reader may observe a torn mix of old
    /// and new values.
    pub fn copy(&self, from: usize, to: usize) -> Result<(), StoreError> {
        let bound = self.capacity;
        for index in [from, to] {
            if index >= bound {
                return Err(StoreError::OutOfRange {
                    index,
                    capacity: bound,
                });
            }
        }
        if from == to {
            return Ok(());
        }
        match self.plan.mode() {
            LayoutMode::Row => {
                let stride = self.plan.stride();
                self.region
                    .copy_within(from * stride, to * stride, stride);
            }
            LayoutMode::Column => {
                copy_fields(&self.region, &self.plan, (0, from), (0, to));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("capacity", &self.capacity)
            .field("mode", &self.plan.mode())
            .field("record_size", &self.schema.layout().size())
            .finish()
    }
}

/// Field-by-field copy of one record, recursing into nested records.
///
/// `from`/`to` are `(row base, record index)` pairs as [`AccessPlan::addr`]
/// expects. Non-nested fields — primitives and fixed strings alike — are
/// value-copied as their element's byte range.
fn copy_fields(
    region: &SharedRegion,
    plan: &AccessPlan,
    from: (usize, usize),
    to: (usize, usize),
) {
    for slot in plan.slots() {
        let src = plan.addr(from.0, from.1, slot);
        let dst = plan.addr(to.0, to.1, slot);
        match nested_of(slot) {
            Some(nested) => copy_fields(region, nested, (src, 0), (dst, 0)),
            None => region.copy_within(src, dst, slot.elem_size),
        }
    }
}

fn nested_of(slot: &PlanSlot) -> Option<&AccessPlan> {
    slot.nested.as_deref()
}
