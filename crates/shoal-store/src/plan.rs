//! Compiled access plans: the per-field descriptor tables views dispatch on.
//!
//! An [`AccessPlan`] is compiled once per collection from a schema, a
//! [`LayoutMode`], and a fixed capacity. It holds one descriptor per
//! field — kind tag, element size, and the resolved offset — so that
//! every view operation is a table lookup plus one address computation,
//! with no per-access name resolution or allocation.
//!
//! Address arithmetic is the only thing the two physical layouts differ
//! on:
//!
//! - **Row** (record-major): `addr = slot_base + field_offset`, where
//!   `slot_base = index × layout.size`.
//! - **Column** (field-major): each field owns a contiguous plane of
//!   `capacity` elements, the plane start padded to the field's own
//!   alignment; `addr = plane_offset + index × elem_size`.
//!
//! Nested record fields occupy one plane (column) or one inline block
//! (row); in both cases an individual element is a contiguous
//! row-addressed block, so nested sub-plans are always row plans.

use smallvec::SmallVec;

use shoal_core::{FieldKind, FieldRef, Schema};

/// Physical arrangement of records within a region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// Array-of-structures: all fields of one record stored contiguously.
    #[default]
    Row,
    /// Structure-of-arrays: each field stored as its own plane across
    /// all records.
    Column,
}

/// One field's entry in a compiled plan.
#[derive(Clone, Debug)]
pub(crate) struct PlanSlot {
    /// Field name, kept for diagnostics.
    pub(crate) name: String,
    /// The field's data type.
    pub(crate) kind: FieldKind,
    /// Row mode: byte offset within one record. Column mode: absolute
    /// byte offset of this field's plane within the region.
    pub(crate) offset: usize,
    /// Size of one element of this field in bytes.
    pub(crate) elem_size: usize,
    /// Row-mode sub-plan for nested record fields.
    pub(crate) nested: Option<Box<AccessPlan>>,
}

/// A compiled, immutable descriptor table for one `(schema, mode,
/// capacity)` binding.
#[derive(Clone, Debug)]
pub struct AccessPlan {
    mode: LayoutMode,
    /// Byte stride between consecutive records (row addressing).
    stride: usize,
    capacity: usize,
    /// Total region bytes this plan addresses.
    region_len: usize,
    slots: SmallVec<[PlanSlot; 8]>,
}

fn align_up(offset: usize, align: usize) -> usize {
    match offset % align {
        0 => offset,
        rem => offset + (align - rem),
    }
}

impl AccessPlan {
    /// Compile a plan for `capacity` records of `schema` in `mode`.
    pub fn compile(schema: &Schema, mode: LayoutMode, capacity: usize) -> Self {
        match mode {
            LayoutMode::Row => Self::row(schema, capacity),
            LayoutMode::Column => Self::column(schema, capacity),
        }
    }

    /// Row plan: slot offsets are the layout's in-record offsets.
    fn row(schema: &Schema, capacity: usize) -> Self {
        let layout = schema.layout();
        let slots = layout
            .slots()
            .iter()
            .map(|slot| PlanSlot {
                name: slot.name.clone(),
                kind: slot.kind.clone(),
                offset: slot.offset,
                elem_size: slot.size,
                nested: nested_plan(&slot.kind),
            })
            .collect();
        Self {
            mode: LayoutMode::Row,
            stride: layout.size(),
            capacity,
            region_len: layout.size() * capacity,
            slots,
        }
    }

    /// Column plan: planes laid field-after-field, each plane start
    /// padded to the field's own alignment (planes are laid end-to-end,
    /// so the struct's overall alignment alone would not keep every
    /// plane's elements aligned).
    fn column(schema: &Schema, capacity: usize) -> Self {
        let layout = schema.layout();
        let mut offset = 0usize;
        let mut slots: SmallVec<[PlanSlot; 8]> = SmallVec::with_capacity(layout.slots().len());
        for slot in layout.slots() {
            offset = align_up(offset, slot.alignment);
            slots.push(PlanSlot {
                name: slot.name.clone(),
                kind: slot.kind.clone(),
                offset,
                elem_size: slot.size,
                nested: nested_plan(&slot.kind),
            });
            offset += slot.size * capacity;
        }
        Self {
            mode: LayoutMode::Column,
            stride: layout.size(),
            capacity,
            region_len: offset,
            slots,
        }
    }

    /// The physical layout this plan addresses.
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// The fixed record capacity this plan was compiled for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Region bytes required to back this plan.
    pub fn required_len(&self) -> usize {
        self.region_len
    }

    /// Byte stride between consecutive records under row addressing.
    pub(crate) fn stride(&self) -> usize {
        self.stride
    }

    /// Look up a field's descriptor.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this plan's schema.
    pub(crate) fn slot(&self, field: FieldRef) -> &PlanSlot {
        self.slots
            .get(field.0 as usize)
            .unwrap_or_else(|| panic!("field handle {field} does not belong to this schema"))
    }

    /// All slots in declaration order.
    pub(crate) fn slots(&self) -> &[PlanSlot] {
        &self.slots
    }

    /// Absolute byte address of `slot` for the record at `index`, given
    /// the view's row base (`index × stride`, or the absolute block base
    /// for nested sub-views).
    pub(crate) fn addr(&self, base: usize, index: usize, slot: &PlanSlot) -> usize {
        match self.mode {
            LayoutMode::Row => base + slot.offset,
            LayoutMode::Column => slot.offset + index * slot.elem_size,
        }
    }
}

/// Row-mode sub-plan for nested record fields; `None` for everything else.
fn nested_plan(kind: &FieldKind) -> Option<Box<AccessPlan>> {
    match kind {
        FieldKind::Struct(schema) => Some(Box::new(AccessPlan::row(schema, 1))),
        _ => None,
    }
}
