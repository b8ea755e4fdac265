//! Core type definitions shared across the einarray stack.
//!
//! - Type aliases for dimensions ([`Axis`], [`Rank`], [`Shape`], [`Strides`])
//! - [`Value`], the "tensor or bare scalar" result of indexing and reductions
//!
//! # Examples
//!
//! ```
//! use einarray_core::{Slice, Tensor, Value};
//!
//! let t = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?;
//!
//! // An integer per axis selects a single element
//! let x = t.select(&[1.into(), 0.into()])?;
//! assert_eq!(x.as_scalar(), Some(3.0));
//!
//! // Anything else produces a view
//! let row = t.select(&[Slice::full().into(), 1.into()])?;
//! assert!(matches!(row, Value::Tensor(_)));
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fmt;

use smallvec::SmallVec;

use crate::dense::Tensor;

/// Zero-indexed axis number.
pub type Axis = usize;

/// Number of axes of a tensor.
pub type Rank = usize;

/// Shape type using SmallVec to avoid heap allocation for common cases.
///
/// Tensors with up to 6 axes keep their shape inline.
pub type Shape = SmallVec<[usize; 6]>;

/// Per-axis element strides. Signed, since negative-step slices walk backwards
/// through the buffer and broadcast axes use stride `0`.
pub type Strides = SmallVec<[isize; 6]>;

/// Either a bare scalar or a tensor.
///
/// Returned by [`Tensor::select`] (an all-integer key yields a scalar) and by
/// reductions whose output has no axes. Also accepted as the right-hand side of
/// [`Tensor::assign`], where a scalar fills the whole destination.
#[derive(Clone)]
pub enum Value<T> {
    Scalar(T),
    Tensor(Tensor<T>),
}

impl<T: Copy + fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Value::Tensor(t) => f.debug_tuple("Tensor").field(t).finish(),
        }
    }
}

impl<T: Copy> Value<T> {
    /// Wrap a scalar.
    pub fn scalar(value: T) -> Self {
        Value::Scalar(value)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// The scalar, if this is one.
    pub fn as_scalar(&self) -> Option<T> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Tensor(_) => None,
        }
    }

    /// The tensor, if this is one.
    pub fn as_tensor(&self) -> Option<&Tensor<T>> {
        match self {
            Value::Scalar(_) => None,
            Value::Tensor(t) => Some(t),
        }
    }

    /// Shape of the value; empty for a scalar.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Scalar(_) => Shape::new(),
            Value::Tensor(t) => Shape::from_slice(t.shape()),
        }
    }

    /// Convert into a tensor, wrapping a scalar as a 0-dimensional tensor.
    pub fn into_tensor(self) -> Tensor<T> {
        match self {
            Value::Scalar(v) => Tensor::scalar(v),
            Value::Tensor(t) => t,
        }
    }

    /// Convert into a scalar. A 0-dimensional tensor yields its single element.
    pub fn into_scalar(self) -> Option<T> {
        match self {
            Value::Scalar(v) => Some(v),
            Value::Tensor(t) if t.rank() == 0 => t.get(&[]).ok(),
            Value::Tensor(_) => None,
        }
    }
}

impl<T> From<Tensor<T>> for Value<T> {
    fn from(tensor: Tensor<T>) -> Self {
        Value::Tensor(tensor)
    }
}

impl<T> From<&Tensor<T>> for Value<T> {
    fn from(tensor: &Tensor<T>) -> Self {
        Value::Tensor(tensor.clone())
    }
}

macro_rules! impl_scalar_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value<$t> {
                fn from(value: $t) -> Self {
                    Value::Scalar(value)
                }
            }
        )*
    };
}

impl_scalar_value!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
