//! Error types for tensor construction, indexing and broadcasting
//!
//! Every fallible operation in this crate reports a [`TensorError`]. Errors are
//! raised at the point of detection and abort the whole operation: nothing is
//! partially written before a check fails.
//!
//! # Examples
//!
//! ```
//! use einarray_core::{broadcast_shapes, TensorError};
//!
//! let err = broadcast_shapes(&[&[2], &[3]]).unwrap_err();
//! assert!(matches!(err, TensorError::IncompatibleShapes { .. }));
//! ```

use thiserror::Error;

/// Errors raised by tensors, views and broadcasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    /// Broadcasting found more than one distinct non-1 size at an aligned axis,
    /// or a view cannot be stretched to the requested shape.
    #[error("shapes {shapes:?} cannot be broadcast together (axis {axis} from the right)")]
    IncompatibleShapes {
        shapes: Vec<Vec<usize>>,
        axis: usize,
    },

    /// An assigned tensor (or a caller-supplied output) has the wrong shape.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// An index falls outside the logical extent of an axis.
    #[error("index {index} is out of bounds for axis {axis} with size {size}")]
    IndexOutOfBounds {
        axis: usize,
        index: isize,
        size: usize,
    },

    /// Element access with an index tuple of the wrong length.
    #[error("expected {expected} indices, got {got}")]
    RankMismatch { expected: usize, got: usize },

    /// A key with more entries than the tensor has axes.
    #[error("too many indices for tensor of rank {rank}: got {got}")]
    TooManyIndices { rank: usize, got: usize },

    #[error("invalid slice: {reason}")]
    InvalidSlice { reason: String },

    /// Nested input whose lists do not all have the same depth and length.
    #[error("ragged nested data at depth {depth}: expected {expected}, found {found}")]
    RaggedNesting {
        depth: usize,
        expected: String,
        found: String,
    },

    #[error("shape {shape:?} requires {expected} elements, but got {got}")]
    DataLength {
        shape: Vec<usize>,
        expected: usize,
        got: usize,
    },

    #[error("axis {axis} is out of range for tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    #[error("value {value} cannot be represented in the element type")]
    NumericCast { value: f64 },

    /// Raw view parts that address positions before the start of a buffer.
    #[error("invalid view: {reason}")]
    InvalidView { reason: String },

    /// Random fill parameters that do not describe a distribution.
    #[error("invalid distribution: {reason}")]
    InvalidDistribution { reason: String },
}

/// Result alias for tensor operations.
pub type TensorResult<T> = Result<T, TensorError>;

impl TensorError {
    pub(crate) fn incompatible(shapes: &[&[usize]], axis: usize) -> Self {
        TensorError::IncompatibleShapes {
            shapes: shapes.iter().map(|s| s.to_vec()).collect(),
            axis,
        }
    }

    pub(crate) fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        TensorError::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }
}
