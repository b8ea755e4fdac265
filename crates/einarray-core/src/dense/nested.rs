//! Conversion between tensors and nested sequences
//!
//! Nested data is the interchange format of the crate: `Vec<Vec<f64>>`,
//! fixed-size arrays and [`Nested`] values all convert into tensors, with the
//! shape inferred from the nesting depth.
//!
//! ```
//! use einarray_core::{Nested, Tensor};
//!
//! let t = Tensor::<i32>::from_nested(vec![vec![1, 2, 3], vec![4, 5, 6]])?;
//! assert_eq!(t.shape(), &[2, 3]);
//!
//! let back = t.to_nested();
//! assert_eq!(back.to_string(), "[[1, 2, 3], [4, 5, 6]]");
//! assert_eq!(Tensor::from_nested(back)?, t);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fmt;

use super::types::Tensor;
use crate::error::{TensorError, TensorResult};
use crate::types::Shape;

/// A scalar or an arbitrarily deep list of nested values.
///
/// With the `serde` feature this (de)serializes untagged, so JSON such as
/// `[[1, 2], [3, 4]]` maps directly onto it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Nested<T> {
    Scalar(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Nesting depth: 0 for a scalar.
    pub fn depth(&self) -> usize {
        match self {
            Nested::Scalar(_) => 0,
            Nested::List(items) => 1 + items.first().map_or(0, Nested::depth),
        }
    }

    /// Shape inferred by following the first element at every level.
    pub fn inferred_shape(&self) -> Shape {
        let mut shape = Shape::new();
        let mut node = self;
        while let Nested::List(items) = node {
            shape.push(items.len());
            match items.first() {
                Some(first) => node = first,
                None => break,
            }
        }
        shape
    }

    fn describe(&self) -> String {
        match self {
            Nested::Scalar(_) => "a scalar".to_string(),
            Nested::List(items) => format!("a list of length {}", items.len()),
        }
    }
}

impl<T: Copy> Nested<T> {
    /// Flatten in row-major order, checking every level against `shape`.
    fn flatten_into(&self, shape: &[usize], depth: usize, out: &mut Vec<T>) -> TensorResult<()> {
        match (self, shape.split_first()) {
            (Nested::Scalar(v), None) => {
                out.push(*v);
                Ok(())
            }
            (Nested::List(items), Some((&len, rest))) if items.len() == len => {
                for item in items {
                    item.flatten_into(rest, depth + 1, out)?;
                }
                Ok(())
            }
            (found, expected) => Err(TensorError::RaggedNesting {
                depth,
                expected: match expected {
                    Some((&len, _)) => format!("a list of length {len}"),
                    None => "a scalar".to_string(),
                },
                found: found.describe(),
            }),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Nested<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nested::Scalar(v) => write!(f, "{v:?}"),
            Nested::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Anything that can be viewed as nested data with element type `T`.
pub trait NestedData<T> {
    fn into_nested(self) -> Nested<T>;
}

impl<T> NestedData<T> for Nested<T> {
    fn into_nested(self) -> Nested<T> {
        self
    }
}

impl<T, U: NestedData<T>> NestedData<T> for Vec<U> {
    fn into_nested(self) -> Nested<T> {
        Nested::List(self.into_iter().map(NestedData::into_nested).collect())
    }
}

impl<T, U: NestedData<T>, const N: usize> NestedData<T> for [U; N] {
    fn into_nested(self) -> Nested<T> {
        Nested::List(self.into_iter().map(NestedData::into_nested).collect())
    }
}

macro_rules! impl_nested_scalar {
    ($($t:ty),*) => {
        $(
            impl NestedData<$t> for $t {
                fn into_nested(self) -> Nested<$t> {
                    Nested::Scalar(self)
                }
            }
        )*
    };
}

impl_nested_scalar!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Copy> Tensor<T> {
    /// Build a tensor from nested data.
    ///
    /// The shape comes from the first element at every depth; every other
    /// element must agree, or the call fails with
    /// [`TensorError::RaggedNesting`]. A bare scalar gives a 0-dimensional
    /// tensor and an empty list gives shape `[0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_core::{Tensor, TensorError};
    ///
    /// let t = Tensor::<f64>::from_nested([[1.0, 2.0], [3.0, 4.0]])?;
    /// assert_eq!(t.shape(), &[2, 2]);
    ///
    /// let ragged = Tensor::<f64>::from_nested(vec![vec![1.0, 2.0], vec![3.0]]);
    /// assert!(matches!(ragged, Err(TensorError::RaggedNesting { depth: 1, .. })));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_nested(data: impl NestedData<T>) -> TensorResult<Self> {
        let nested = data.into_nested();
        let shape = nested.inferred_shape();
        let mut flat = Vec::with_capacity(shape.iter().product());
        nested.flatten_into(&shape, 0, &mut flat)?;
        Self::from_vec(flat, &shape)
    }

    /// Convert to nested data, the inverse of [`Tensor::from_nested`].
    pub fn to_nested(&self) -> Nested<T> {
        fn build<T: Copy>(data: &[T], shape: &[usize]) -> Nested<T> {
            match shape.split_first() {
                None => Nested::Scalar(data[0]),
                Some((&len, rest)) => {
                    let step: usize = rest.iter().product();
                    Nested::List(
                        (0..len)
                            .map(|i| build(&data[i * step..(i + 1) * step], rest))
                            .collect(),
                    )
                }
            }
        }
        build(&self.to_vec(), self.shape())
    }
}
