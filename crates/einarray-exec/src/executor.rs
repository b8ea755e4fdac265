//! Executor trait and the CPU implementation

use einarray_core::{Axis, Tensor, Value};
use einarray_planner::SubscriptSpec;
use num_traits::Float;

use crate::elementwise::elementwise;
use crate::error::ExecResult;
use crate::hints::ExecHints;
use crate::ops::{einsum_with, reduce};
use crate::reducer::ReduceOp;

/// Element-wise operation types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElemOp {
    /// Negation: -x
    Neg,
    /// Absolute value: |x|
    Abs,
    /// Exponential: e^x
    Exp,
    /// Natural logarithm: ln(x)
    Log,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    /// Square root: sqrt(x)
    Sqrt,
}

impl ElemOp {
    pub fn apply<T: Float>(self, x: T) -> T {
        match self {
            ElemOp::Neg => -x,
            ElemOp::Abs => x.abs(),
            ElemOp::Exp => x.exp(),
            ElemOp::Log => x.ln(),
            ElemOp::Sin => x.sin(),
            ElemOp::Cos => x.cos(),
            ElemOp::Tan => x.tan(),
            ElemOp::Sinh => x.sinh(),
            ElemOp::Cosh => x.cosh(),
            ElemOp::Tanh => x.tanh(),
            ElemOp::Sqrt => x.sqrt(),
        }
    }
}

/// Binary element-wise operation types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    /// Element-wise addition: x + y
    Add,
    /// Element-wise subtraction: x - y
    Sub,
    /// Element-wise multiplication: x * y
    Mul,
    /// Element-wise division: x / y
    Div,
    /// Element-wise power: x^y
    Pow,
}

impl BinaryOp {
    pub fn apply<T: Float>(self, x: T, y: T) -> T {
        match self {
            BinaryOp::Add => x + y,
            BinaryOp::Sub => x - y,
            BinaryOp::Mul => x * y,
            BinaryOp::Div => x / y,
            BinaryOp::Pow => x.powf(y),
        }
    }
}

/// Main executor trait for tensor operations
pub trait Executor<T> {
    /// Execute an einsum reduction, stretching size-1 axes per the executor's hints
    fn einsum(&mut self, spec: SubscriptSpec, inputs: &[&Tensor<T>]) -> ExecResult<Value<T>>;

    /// Apply element-wise operation
    fn elem_op(&mut self, op: ElemOp, x: &Tensor<T>) -> ExecResult<Tensor<T>>;

    /// Apply a binary operation, broadcasting per the executor's hints
    fn binary_op(&mut self, op: BinaryOp, x: &Tensor<T>, y: &Tensor<T>) -> ExecResult<Tensor<T>>;

    /// Reduce over `axes`. An empty `axes` reduces nothing and returns a copy.
    fn reduce(&mut self, op: ReduceOp, x: &Tensor<T>, axes: &[Axis]) -> ExecResult<Value<T>>;
}

/// Single-threaded executor over dense tensors.
///
/// ```
/// use einarray_core::Tensor;
/// use einarray_exec::{BinaryOp, CpuExecutor, Executor, ReduceOp};
///
/// let mut exec = CpuExecutor::new();
/// let a = Tensor::<f64>::from_nested([[1.0, 2.0], [3.0, 4.0]])?;
///
/// let c = exec.einsum("ij,jk->ik".into(), &[&a, &a])?.into_tensor();
/// assert_eq!(c.to_vec(), vec![7.0, 10.0, 15.0, 22.0]);
///
/// let d = exec.binary_op(BinaryOp::Sub, &c, &a)?;
/// let total = exec.reduce(ReduceOp::Sum, &d, &[0, 1])?;
/// assert_eq!(total.as_scalar(), Some(44.0));
/// assert_eq!(exec.ops_executed(), 3);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct CpuExecutor {
    hints: ExecHints,
    ops_executed: usize,
}

impl CpuExecutor {
    /// Create a new CPU executor with default hints
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hints(hints: ExecHints) -> Self {
        Self {
            hints,
            ops_executed: 0,
        }
    }

    pub fn hints(&self) -> &ExecHints {
        &self.hints
    }

    /// Operations run so far, failed ones included.
    pub fn ops_executed(&self) -> usize {
        self.ops_executed
    }
}

impl<T> Executor<T> for CpuExecutor
where
    T: Float,
{
    fn einsum(&mut self, spec: SubscriptSpec, inputs: &[&Tensor<T>]) -> ExecResult<Value<T>> {
        self.ops_executed += 1;
        einsum_with(spec, inputs, None, self.hints.broadcast)
    }

    fn elem_op(&mut self, op: ElemOp, x: &Tensor<T>) -> ExecResult<Tensor<T>> {
        self.ops_executed += 1;
        tracing::trace!(?op, shape = ?x.shape(), "elem_op");
        elementwise(&[x.into()], |xs: &[T]| op.apply(xs[0]), self.hints.broadcast)
    }

    fn binary_op(&mut self, op: BinaryOp, x: &Tensor<T>, y: &Tensor<T>) -> ExecResult<Tensor<T>> {
        self.ops_executed += 1;
        tracing::trace!(?op, lhs = ?x.shape(), rhs = ?y.shape(), "binary_op");
        elementwise(
            &[x.into(), y.into()],
            |xs: &[T]| op.apply(xs[0], xs[1]),
            self.hints.broadcast,
        )
    }

    fn reduce(&mut self, op: ReduceOp, x: &Tensor<T>, axes: &[Axis]) -> ExecResult<Value<T>> {
        self.ops_executed += 1;
        reduce(x, Some(axes), op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecError;
    use einarray_core::{BroadcastMode, TensorError};

    #[test]
    fn test_elem_ops() {
        let mut exec = CpuExecutor::new();
        let x = Tensor::<f64>::from_vec(vec![-4.0, 0.0], &[2]).unwrap();
        assert_eq!(exec.elem_op(ElemOp::Abs, &x).unwrap().to_vec(), vec![4.0, 0.0]);
        assert_eq!(exec.elem_op(ElemOp::Neg, &x).unwrap().to_vec(), vec![4.0, -0.0]);
        assert_eq!(exec.elem_op(ElemOp::Exp, &x).unwrap().get(&[1]).unwrap(), 1.0);
        assert!(exec.elem_op(ElemOp::Sqrt, &x).unwrap().get(&[0]).unwrap().is_nan());
        assert_eq!(exec.ops_executed(), 4);
    }

    #[test]
    fn test_binary_op_honours_broadcast_hint() {
        let a = Tensor::<f32>::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let b = Tensor::<f32>::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let one = Tensor::<f32>::from_vec(vec![2.0], &[1]).unwrap();

        let mut strict = CpuExecutor::new();
        assert!(matches!(
            strict.binary_op(BinaryOp::Add, &a, &b),
            Err(ExecError::Tensor(TensorError::IncompatibleShapes { .. }))
        ));

        let mut permissive =
            CpuExecutor::with_hints(ExecHints::new().with_broadcast(BroadcastMode::Permissive));
        assert_eq!(permissive.hints().broadcast, BroadcastMode::Permissive);
        let r = permissive.binary_op(BinaryOp::Pow, &b, &one).unwrap();
        assert_eq!(r.to_vec(), vec![1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_einsum_honours_broadcast_hint() {
        let a = Tensor::<f64>::from_nested([[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let col = Tensor::<f64>::from_nested([[1.0], [10.0]]).unwrap();

        let mut strict = CpuExecutor::new();
        assert!(strict.einsum("ij,ij->i".into(), &[&a, &col]).is_err());

        let mut permissive =
            CpuExecutor::with_hints(ExecHints::new().with_broadcast(BroadcastMode::Permissive));
        let r = permissive.einsum("ij,ij->i".into(), &[&a, &col]).unwrap();
        assert_eq!(r.into_tensor().to_vec(), vec![3.0, 70.0]);
    }

    #[test]
    fn test_reduce_axes() {
        let mut exec = CpuExecutor::new();
        let t = Tensor::<f64>::from_nested([[1.0, 5.0, 3.0], [4.0, 2.0, 6.0]]).unwrap();
        let m = exec.reduce(ReduceOp::Max, &t, &[1]).unwrap().into_tensor();
        assert_eq!(m.to_vec(), vec![5.0, 6.0]);
        let all = exec.reduce(ReduceOp::Min, &t, &[1, 0]).unwrap();
        assert_eq!(all.as_scalar(), Some(1.0));
        // no axes: element-for-element copy
        let same = exec.reduce(ReduceOp::Sum, &t, &[]).unwrap().into_tensor();
        assert_eq!(same, t);
    }
}
