//! # einarray - strided arrays with einsum
//!
//! N-dimensional arrays over shared buffers, with Python-style slicing views,
//! NumPy-style broadcasting and a generalized Einstein reduction.
//!
//! This is the **meta crate** that re-exports every einarray component and
//! adds free-function constructors for convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use einarray::prelude::*;
//!
//! let a = array([[1.0f64, 2.0], [3.0, 4.0]])?;
//! let b = eye::<f64>(2);
//!
//! // Views share storage
//! let col = a.slice(&[Key::Full, 1.into()])?;
//! col.set(&[0], 20.0)?;
//! assert_eq!(a.get(&[0, 1])?, 20.0);
//!
//! // Reductions
//! assert_eq!(matmul(&a, &b)?, a);
//! assert_eq!(einsum("ii->", &[&a])?.as_scalar(), Some(5.0));
//! assert_eq!(sum(&a, Some(&[0]))?.into_tensor().to_vec(), vec![4.0, 24.0]);
//!
//! // Broadcasting math
//! let shifted = add(&a, 1.0)?;
//! assert_eq!(shifted.to_vec(), vec![2.0, 21.0, 4.0, 5.0]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Tensors and views ([`core`])
//!
//! [`Tensor`] is a shared buffer plus an affine `{offset, strides, shape}` view.
//! Selecting with integers, [`Slice`]s or [`Key::Full`] derives a new view
//! without copying; [`Tensor::assign`] writes through it.
//!
//! ### Subscripts ([`planner`])
//!
//! Parsing of `"ij,jk->ik"` strings (or structured [`Label`] lists) and shape
//! binding into a [`ReductionPlan`].
//!
//! ```
//! use einarray::planner::{ReductionPlan, Subscripts};
//!
//! let subs = Subscripts::parse("bij,bjk")?;
//! assert_eq!(subs.to_string(), "bij,bjk->bik");
//! let plan = ReductionPlan::new(&subs, &[&[4, 2, 3], &[4, 3, 5]])?;
//! assert_eq!(plan.output_shape(), &[4, 2, 5]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ### Execution ([`exec`])
//!
//! [`einreduce`], [`einsum`], axis reductions, elementwise functions and the
//! [`Executor`] seam.
//!
//! ## Features
//!
//! - `serde`: serialize [`Nested`] data, slices, subscripts and hints
//! - `tracing`: [`tracing_support::init_tracing`] installs a
//!   `tracing-subscriber` (compact text or JSON)
//! - `full`: Enable all features

#![deny(warnings)]

// Re-export all components
pub use einarray_core as core;
pub use einarray_exec as exec;
pub use einarray_planner as planner;

pub mod tracing_support;

pub use einarray_core::{
    broadcast, broadcast_shapes, broadcast_shapes_with, broadcast_with, BroadcastMode, IndexIter,
    Key, Nested, NestedData, Slice, Tensor, TensorError, TensorResult, Value,
};
pub use einarray_exec::{
    abs, add, cos, cosh, div, einreduce, einsum, einsum_ex, einsum_with, elementwise, exp, log, matmul, max,
    min, mul, neg, pow, prod, sin, sinh, sqrt, sub, sum, tan, tanh, tensorize, BinaryOp,
    CpuExecutor, ElemOp, ExecError, ExecHints, ExecResult, Executor, ReduceOp, Reducer,
};
pub use einarray_planner::{Label, ReductionPlan, SubscriptError, SubscriptSpec, Subscripts};

use num_traits::{Num, NumCast};

/// Build a tensor from nested arrays or vectors; the shape is the nesting.
///
/// ```
/// let t = einarray::array(vec![vec![1i64, 2, 3], vec![4, 5, 6]])?;
/// assert_eq!(t.shape(), &[2, 3]);
///
/// // Ragged input is rejected
/// assert!(einarray::array(vec![vec![1i64, 2], vec![3]]).is_err());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn array<T: Copy>(data: impl NestedData<T>) -> TensorResult<Tensor<T>> {
    Tensor::from_nested(data)
}

/// Tensor of zeros.
pub fn zeros<T: Copy + Num>(shape: &[usize]) -> Tensor<T> {
    Tensor::zeros(shape)
}

/// Tensor of ones.
pub fn ones<T: Copy + Num>(shape: &[usize]) -> Tensor<T> {
    Tensor::ones(shape)
}

/// Tensor filled with `value`.
pub fn full<T: Copy>(shape: &[usize], value: T) -> Tensor<T> {
    Tensor::full(shape, value)
}

/// `n x n` identity matrix.
pub fn eye<T: Copy + Num>(n: usize) -> Tensor<T> {
    Tensor::eye(n)
}

/// Tensor whose element at each index is `f(index)`.
///
/// ```
/// let grid = einarray::from_fn(&[2, 3], |idx| 10 * idx[0] + idx[1]);
/// assert_eq!(grid.to_vec(), vec![0, 1, 2, 10, 11, 12]);
/// ```
pub fn from_fn<T, F>(shape: &[usize], f: F) -> Tensor<T>
where
    T: Copy,
    F: FnMut(&[usize]) -> T,
{
    Tensor::from_fn(shape, f)
}

/// Tensor of shape `shape ++ [rank]` holding every index of `shape`.
pub fn indices<T: Copy + NumCast>(shape: &[usize]) -> TensorResult<Tensor<T>> {
    Tensor::indices(shape)
}

/// Uniform samples in `[low, high)` from the thread-local generator.
pub fn random_uniform<T: Copy + NumCast>(
    shape: &[usize],
    low: f64,
    high: f64,
) -> TensorResult<Tensor<T>> {
    Tensor::random_uniform(shape, low, high)
}

/// Normal samples from the thread-local generator.
pub fn random_normal<T: Copy + NumCast>(
    shape: &[usize],
    mean: f64,
    std: f64,
) -> TensorResult<Tensor<T>> {
    Tensor::random_normal(shape, mean, std)
}

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use einarray::prelude::*;
    //!
    //! let t = zeros::<f64>(&[2, 3]);
    //! let row = t.select(&[Key::Index(-1)])?;
    //! assert_eq!(row.shape().as_slice(), &[3]);
    //! # Ok::<(), anyhow::Error>(())
    //! ```

    // Core types
    pub use crate::core::{BroadcastMode, Key, Slice, Tensor, Value};

    // Constructors
    pub use crate::{array, eye, from_fn, full, ones, zeros};

    // Reductions and elementwise math
    pub use crate::exec::{
        add, div, einreduce, einsum, einsum_ex, matmul, max, min, mul, sub, sum, ExecHints,
        ReduceOp,
    };
}
