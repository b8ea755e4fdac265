//! # einarray-core
//!
//! Strided tensors, NumPy-style slicing and broadcasting for einarray.
//!
//! This crate provides the foundational building blocks of the einarray stack:
//!
//! - **Slices and keys** ([`Slice`], [`Key`]) with Python-style defaults and
//!   negative indices
//! - **Affine views** ([`View`]) mapping index tuples to buffer positions
//! - **Dense tensors** ([`Tensor`]) sharing one flat buffer between every view
//!   derived from them
//! - **Broadcasting** ([`broadcast_shapes`], [`Tensor::broadcast_to`],
//!   [`broadcast`]) through stride-0 axes
//! - **Nested data** ([`Nested`], [`NestedData`]) as the interchange format
//!
//! ## Memory Layout
//!
//! Fresh tensors are C-contiguous (row-major). Slicing, integer indexing and
//! broadcasting are zero-copy: they derive a new [`View`] over the same buffer,
//! so writes through one tensor are visible through every tensor that shares
//! the position.
//!
//! ## Quick Start
//!
//! ```
//! use einarray_core::{Slice, Tensor};
//!
//! let t = Tensor::<f64>::from_nested([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])?;
//! assert_eq!(t.shape(), &[2, 3]);
//!
//! // t[:, 1:]
//! let right = t.slice(&[Slice::full().into(), Slice::from_start(1).into()])?;
//! assert_eq!(right.to_string(), "[[2.0, 3.0], [5.0, 6.0]]");
//!
//! // t[-1, -1]
//! assert_eq!(t.select(&[(-1).into(), (-1).into()])?.as_scalar(), Some(6.0));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Creating Tensors
//!
//! ```
//! use einarray_core::Tensor;
//!
//! let zeros = Tensor::<f64>::zeros(&[2, 3]);
//! let ones = Tensor::<f64>::ones(&[2, 3]);
//! let fives = Tensor::full(&[2, 3], 5.0);
//! let identity = Tensor::<f64>::eye(3);
//! let grid = Tensor::from_fn(&[2, 2], |idx| idx[0] * 2 + idx[1]);
//! let uniform = Tensor::<f64>::random_uniform(&[2, 3], 0.0, 1.0)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Safety
//!
//! All indexing is bounds-checked and no `unsafe` code is used. Integer keys
//! outside an axis fail with [`TensorError::IndexOutOfBounds`]; storage never
//! grows on write.
//!
//! ## Features
//!
//! - `serde`: serialization of [`Nested`], [`Slice`] and [`BroadcastMode`]

#![deny(warnings)]

pub mod dense;
pub mod error;
pub mod iter;
pub mod slice;
pub mod types;
pub mod view;


pub use dense::{
    broadcast, broadcast_shapes, broadcast_shapes_with, broadcast_with, BroadcastMode, Nested,
    NestedData, OuterIter, Tensor,
};
pub use error::{TensorError, TensorResult};
pub use iter::IndexIter;
pub use slice::{Key, ResolvedSlice, Slice};
pub use types::{Axis, Rank, Shape, Strides, Value};
pub use view::{row_major_strides, View};
