//! Store-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during collection operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A slot index at or beyond the collection's capacity.
    OutOfRange {
        /// The requested slot index.
        index: usize,
        /// The collection's fixed capacity.
        capacity: usize,
    },
    /// A wrapped region is too small for the schema, capacity, and
    /// layout mode it is being bound to.
    RegionTooSmall {
        /// Bytes required by the access plan.
        required: usize,
        /// Bytes actually present in the supplied region.
        actual: usize,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, capacity } => {
                write!(f, "slot index {index} out of range: capacity {capacity}")
            }
            Self::RegionTooSmall { required, actual } => {
                write!(
                    f,
                    "region too small: plan requires {required} bytes, region holds {actual}"
                )
            }
        }
    }
}

impl Error for StoreError {}
