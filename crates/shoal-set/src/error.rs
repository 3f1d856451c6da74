//! Sparse-set error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during sparse-set operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetError {
    /// An identifier beyond the set's configured maximum.
    OutOfRange {
        /// The requested identifier.
        id: usize,
        /// The largest identifier this set accepts.
        max_id: usize,
    },
    /// A reservation would exceed the dense collection's capacity.
    /// The reservation has been rolled back.
    CapacityExceeded {
        /// The dense collection's fixed capacity.
        capacity: usize,
    },
    /// A supplied index buffer is too small for this set's geometry.
    RegionTooSmall {
        /// Bytes required.
        required: usize,
        /// Bytes actually present.
        actual: usize,
    },
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { id, max_id } => {
                write!(f, "identifier {id} out of range: max id {max_id}")
            }
            Self::CapacityExceeded { capacity } => {
                write!(f, "collection capacity {capacity} exceeded")
            }
            Self::RegionTooSmall { required, actual } => {
                write!(
                    f,
                    "index buffer too small: requires {required} bytes, holds {actual}"
                )
            }
        }
    }
}

impl Error for SetError {}
