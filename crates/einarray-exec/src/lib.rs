//! # einarray-exec
//!
//! Execution layer for einarray.
//!
//! This crate provides:
//! - [`einreduce`] - generalized Einstein reduction with caller-supplied
//!   combine and reduce steps, and [`einsum`] / [`matmul`] on top of it
//! - axis reductions [`sum`], [`prod`], [`min`], [`max`]
//! - broadcasting elementwise functions ([`elementwise`], [`tensorize`] and
//!   the named math set)
//! - `einsum_ex` - builder-style entry point whose [`ExecHints`] pick the
//!   broadcast rule for label sizes ([`einsum_with`])
//! - the [`Executor`] trait with a single-threaded [`CpuExecutor`]

#![deny(warnings)]

pub mod elementwise;
pub mod error;
pub mod executor;
pub mod hints;
pub mod ops;
pub mod reducer;

#[cfg(test)]
mod property_tests;

// Re-exports
pub use elementwise::{
    abs, add, cos, cosh, div, elementwise, exp, log, mul, neg, pow, sin, sinh, sqrt, sub, tan,
    tanh, tensorize,
};
pub use error::{ExecError, ExecResult};
pub use executor::{BinaryOp, CpuExecutor, ElemOp, Executor};
pub use hints::ExecHints;
pub use ops::{
    axis_subscripts, einreduce, einsum, einsum_into, einsum_with, matmul, max, min, prod, reduce,
    sum,
};
pub use reducer::{ReduceOp, Reducer};

use einarray_core::{Tensor, Value};
use einarray_planner::SubscriptSpec;
use num_traits::Num;

/// Execute an einsum reduction with hints
///
/// # Example
///
/// ```
/// use einarray_core::Tensor;
/// use einarray_exec::{einsum_ex, ExecHints};
///
/// let a = Tensor::<f64>::ones(&[2, 2, 3]);
/// let b = Tensor::<f64>::ones(&[2, 3, 4]);
/// let y = einsum_ex::<f64>("bij,bjk->bik")
///     .inputs(&[&a, &b])
///     .hints(&ExecHints::default())
///     .run()?
///     .into_tensor();
/// assert_eq!(y.shape(), &[2, 2, 4]);
/// assert!(y.to_vec().iter().all(|&v| v == 3.0));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn einsum_ex<'a, T>(spec: impl Into<SubscriptSpec>) -> EinsumBuilder<'a, T>
where
    T: Copy + Num + PartialOrd,
{
    EinsumBuilder::new(spec)
}

/// Builder for einsum operations
pub struct EinsumBuilder<'a, T> {
    spec: SubscriptSpec,
    inputs: Option<&'a [&'a Tensor<T>]>,
    out: Option<&'a Tensor<T>>,
    hints: ExecHints,
}

impl<'a, T> EinsumBuilder<'a, T>
where
    T: Copy + Num + PartialOrd,
{
    /// Create a new einsum builder
    pub fn new(spec: impl Into<SubscriptSpec>) -> Self {
        Self {
            spec: spec.into(),
            inputs: None,
            out: None,
            hints: ExecHints::default(),
        }
    }

    /// Set input tensors, one per operand of the subscripts
    pub fn inputs(mut self, inputs: &'a [&'a Tensor<T>]) -> Self {
        self.inputs = Some(inputs);
        self
    }

    /// Set execution hints. `hints.broadcast` decides whether size-1 operand
    /// axes stretch to their label's size.
    pub fn hints(mut self, hints: &ExecHints) -> Self {
        self.hints = hints.clone();
        self
    }

    /// Write the result into `out`, which must already have the output shape
    ///
    /// ```
    /// use einarray_core::Tensor;
    /// use einarray_exec::einsum_ex;
    ///
    /// let a = Tensor::<i32>::from_nested([[1, 2], [3, 4]])?;
    /// let out = Tensor::<i32>::zeros(&[2, 2]);
    /// einsum_ex("ij->ji").inputs(&[&a]).out(&out).run()?;
    /// assert_eq!(out.to_vec(), vec![1, 3, 2, 4]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn out(mut self, out: &'a Tensor<T>) -> Self {
        self.out = Some(out);
        self
    }

    /// Execute the reduction
    pub fn run(self) -> ExecResult<Value<T>> {
        let inputs = self.inputs.ok_or(ExecError::MissingInputs)?;
        tracing::debug!(hints = ?self.hints, inputs = inputs.len(), "einsum_ex");
        einsum_with(self.spec, inputs, self.out, self.hints.broadcast)
    }
}
