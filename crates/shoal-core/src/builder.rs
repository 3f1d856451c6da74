//! Fluent schema declaration surface.
//!
//! [`SchemaBuilder`] is the convenience entry point for declaring record
//! schemas field by field:
//!
//! ```
//! use shoal_core::Schema;
//!
//! let position = Schema::builder()
//!     .f64("x")
//!     .f64("y")
//!     .build();
//!
//! let player = Schema::builder()
//!     .u32("id")
//!     .u8("health")
//!     .string("name", 16)
//!     .nested("pos", &position)
//!     .build();
//!
//! assert!(player.field("health").is_some());
//! ```

use indexmap::IndexMap;

use crate::kind::FieldKind;
use crate::schema::Schema;

/// Accumulates an ordered field list and produces a [`Schema`].
///
/// Declaration order is layout order. Field names must be unique.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: IndexMap<String, FieldKind>,
}

impl SchemaBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Add a field of an explicit kind.
    ///
    /// # Panics
    ///
    /// Panics if a field with the same name was already declared.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        let previous = self.fields.insert(name.clone(), kind);
        assert!(previous.is_none(), "duplicate field name '{name}'");
        self
    }

    /// Signed 8-bit integer field (-128 to 127).
    pub fn i8(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::I8)
    }

    /// Unsigned 8-bit integer field (0 to 255).
    pub fn u8(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::U8)
    }

    /// Signed 16-bit integer field.
    pub fn i16(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::I16)
    }

    /// Unsigned 16-bit integer field.
    pub fn u16(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::U16)
    }

    /// Signed 32-bit integer field.
    pub fn i32(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::I32)
    }

    /// Unsigned 32-bit integer field.
    pub fn u32(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::U32)
    }

    /// 32-bit float field (IEEE 754 single-precision).
    pub fn f32(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::F32)
    }

    /// 64-bit float field (IEEE 754 double-precision).
    pub fn f64(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::F64)
    }

    /// Boolean field, stored as one byte.
    pub fn boolean(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Bool)
    }

    /// Lock-word field usable with the view's lock operations.
    pub fn mutex(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Mutex)
    }

    /// Fixed-length UTF-8 string field.
    ///
    /// `len` is in bytes, not characters — multibyte characters consume
    /// more than one byte, and oversized writes are silently truncated
    /// at the byte boundary.
    pub fn string(self, name: impl Into<String>, len: usize) -> Self {
        self.field(name, FieldKind::Str { len })
    }

    /// Nested record field laid out inline.
    pub fn nested(self, name: impl Into<String>, schema: &Schema) -> Self {
        self.field(name, FieldKind::Struct(schema.clone()))
    }

    /// Finish and compute the layout.
    pub fn build(self) -> Schema {
        Schema::new(self.fields)
    }
}
