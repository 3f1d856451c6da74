//! Schemas and the layout engine.
//!
//! A [`Schema`] is an immutable, ordered field list together with its
//! computed [`Layout`]: per-field byte offsets, element sizes and
//! alignments, and the padded total size. Layout computation walks the
//! fields in declaration order, inserting padding so that every field
//! lands on a multiple of its own alignment, then pads the total size up
//! to the struct alignment so arrays of the layout tile without
//! misalignment.
//!
//! Schemas are cheap to clone (`Arc` inner) and are built bottom-up, so
//! cyclic nesting cannot be expressed.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::builder::SchemaBuilder;
use crate::kind::FieldKind;

/// A reusable handle to a field within a schema.
///
/// Resolved once by name via [`Schema::field`], then passed to view
/// operations for the lifetime of the schema. The handle is nothing but
/// the field's position in declaration order; using it against a view
/// compiled from a *different* schema is a contract violation and reads
/// the wrong field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldRef(pub u32);

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One field's placement within a [`Layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSlot {
    /// Field name, unique within the schema.
    pub name: String,
    /// Byte offset from the start of the record. Always a multiple of
    /// [`FieldSlot::alignment`].
    pub offset: usize,
    /// The field's data type.
    pub kind: FieldKind,
    /// Element size in bytes (`kind.size()`, cached).
    pub size: usize,
    /// Alignment requirement in bytes (`kind.alignment()`, cached).
    pub alignment: usize,
}

/// Computed byte geometry for a schema.
///
/// Invariants: every slot's `offset` is a multiple of that slot's own
/// alignment, and `size` is a multiple of `alignment`. An empty schema
/// has size 0 and alignment 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    size: usize,
    alignment: usize,
    slots: Vec<FieldSlot>,
}

impl Layout {
    /// Total record size in bytes, padded to [`Layout::alignment`].
    pub fn size(&self) -> usize {
        self.size
    }

    /// Record alignment: the maximum alignment over all fields (min 1).
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// The field slots in declaration order.
    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }
}

/// Round `offset` up to the next multiple of `align`.
///
/// `align` is always one of the small powers of two produced by
/// [`FieldKind::alignment`], never zero.
fn align_up(offset: usize, align: usize) -> usize {
    match offset % align {
        0 => offset,
        rem => offset + (align - rem),
    }
}

/// Walk the fields in declaration order and place each one.
fn compute_layout(definition: &IndexMap<String, FieldKind>) -> Layout {
    let mut offset = 0usize;
    let mut max_alignment = 1usize;
    let mut slots = Vec::with_capacity(definition.len());

    for (name, kind) in definition {
        let size = kind.size();
        let alignment = kind.alignment();
        if alignment > max_alignment {
            max_alignment = alignment;
        }
        offset = align_up(offset, alignment);
        slots.push(FieldSlot {
            name: name.clone(),
            offset,
            kind: kind.clone(),
            size,
            alignment,
        });
        offset += size;
    }

    Layout {
        size: align_up(offset, max_alignment),
        alignment: max_alignment,
        slots,
    }
}

#[derive(Debug)]
struct SchemaInner {
    definition: IndexMap<String, FieldKind>,
    layout: Layout,
}

/// An immutable, ordered record schema with its computed layout.
///
/// Construction is the layout engine: offsets and sizes are computed
/// once, here, and never change. The same `Schema` value can back any
/// number of collections (and is what a receiving execution unit must
/// reconstruct to interpret a transferred region — no self-describing
/// header exists in the bytes).
#[derive(Clone, Debug)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

impl PartialEq for Schema {
    /// Two schemas are equal when they produce the same layout — same
    /// field names, kinds, and offsets in the same order.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.layout == other.inner.layout
    }
}

impl Schema {
    /// Build a schema from an ordered name → kind mapping.
    ///
    /// Field order is declaration order and determines the layout.
    pub fn new(definition: IndexMap<String, FieldKind>) -> Self {
        let layout = compute_layout(&definition);
        Self {
            inner: Arc::new(SchemaInner { definition, layout }),
        }
    }

    /// Start a fluent [`SchemaBuilder`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// The computed layout.
    pub fn layout(&self) -> &Layout {
        &self.inner.layout
    }

    /// Resolve a field name to a reusable [`FieldRef`] handle.
    ///
    /// Returns `None` if no field with that name exists.
    pub fn field(&self, name: &str) -> Option<FieldRef> {
        self.inner
            .definition
            .get_index_of(name)
            .map(|idx| FieldRef(idx as u32))
    }

    /// Number of fields in the schema.
    pub fn len(&self) -> usize {
        self.inner.definition.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.inner.definition.is_empty()
    }

    /// Iterate over `(name, kind)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldKind)> {
        self.inner
            .definition
            .iter()
            .map(|(name, kind)| (name.as_str(), kind))
    }
}
