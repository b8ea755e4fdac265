//! Generalized reductions
//!
//! [`einreduce`] is the single engine behind [`einsum`], [`matmul`] and the
//! axis reductions [`sum`], [`prod`], [`min`] and [`max`]. For every output
//! index (outer axis slowest) and every marginal index, it projects the
//! combined index onto each operand, `combine`s the fetched elements into one
//! term and folds the terms with a [`Reducer`].

use std::collections::HashMap;

use einarray_core::{
    row_major_strides, Axis, BroadcastMode, IndexIter, Strides, Tensor, TensorError, Value,
};
use einarray_planner::{Label, ReductionPlan, SubscriptSpec, Subscripts};
use num_traits::Num;

use crate::error::{ExecError, ExecResult};
use crate::reducer::{ReduceOp, Reducer};

/// Operand snapshot addressed by the combined index.
struct Projection<T> {
    data: Vec<T>,
    strides: Strides,
    axes: Vec<usize>,
}

impl<T: Copy> Projection<T> {
    fn fetch(&self, combined: &[usize]) -> T {
        let pos: isize = self
            .axes
            .iter()
            .zip(self.strides.iter())
            .map(|(&axis, &stride)| combined[axis] as isize * stride)
            .sum();
        self.data[pos as usize]
    }
}

/// Run a generalized Einstein reduction.
///
/// # Arguments
///
/// * `spec` - Subscripts, as text (`"ij,jk->ik"`) or as [`Subscripts`]
/// * `operands` - One tensor per operand label list
/// * `combine` - Merges the elements fetched from every operand into one term
/// * `reducer` - Folds the terms of each output element
/// * `out` - Optional destination; must have exactly the output shape
///
/// # Returns
///
/// [`Value::Scalar`] when the output has no labels, otherwise the output
/// tensor (`out` itself when supplied).
///
/// # Errors
///
/// Subscript errors from parsing and shape binding, a
/// [`TensorError::ShapeMismatch`] for a wrongly shaped `out`, and
/// [`ExecError::EmptyReduction`] when a reduced axis is empty and the reducer
/// has no identity. Every check runs before the first write.
///
/// # Examples
///
/// ```
/// use einarray_core::Tensor;
/// use einarray_exec::{einreduce, ReduceOp};
///
/// let a = Tensor::<f64>::from_nested([[1.0, 2.0], [3.0, 4.0]])?;
///
/// // Largest entry of each row
/// let row_max = einreduce("ij->i", &[&a], |xs: &[f64]| xs[0], ReduceOp::Max, None)?;
/// assert_eq!(row_max.into_tensor().to_vec(), vec![2.0, 4.0]);
///
/// // Squared Frobenius norm
/// let norm = einreduce("ij->", &[&a], |xs: &[f64]| xs[0] * xs[0], ReduceOp::Sum, None)?;
/// assert_eq!(norm.as_scalar(), Some(30.0));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn einreduce<T, C, R>(
    spec: impl Into<SubscriptSpec>,
    operands: &[&Tensor<T>],
    mut combine: C,
    mut reducer: R,
    out: Option<&Tensor<T>>,
) -> ExecResult<Value<T>>
where
    T: Copy,
    C: FnMut(&[T]) -> T,
    R: Reducer<T>,
{
    let subscripts = spec.into().resolve()?;
    let shapes: Vec<&[usize]> = operands.iter().map(|t| t.shape()).collect();
    let plan = ReductionPlan::new(&subscripts, &shapes)?;

    let output_shape = plan.output_shape();
    let output_len: usize = output_shape.iter().product();

    if let Some(out) = out {
        if out.shape() != output_shape {
            return Err(TensorError::ShapeMismatch {
                expected: output_shape.to_vec(),
                got: out.shape().to_vec(),
            }
            .into());
        }
    }

    let empty_fill = if plan.terms_per_output() == 0 && output_len > 0 {
        match reducer.identity() {
            Some(v) => Some(v),
            None => {
                let labels = plan
                    .marginal_labels()
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                return Err(ExecError::EmptyReduction { labels });
            }
        }
    } else {
        None
    };

    tracing::debug!(
        subscripts = %plan.subscripts(),
        output_shape = ?output_shape,
        marginal_shape = ?plan.marginal_shape(),
        outputs = output_len,
        terms_per_output = plan.terms_per_output(),
        "einreduce"
    );

    // Snapshot operands so callbacks run with no buffer lock held and `out`
    // may alias an operand.
    let projections: Vec<Projection<T>> = operands
        .iter()
        .enumerate()
        .map(|(i, t)| Projection {
            data: t.to_vec(),
            strides: row_major_strides(t.shape()),
            axes: plan.operand_axes(i).to_vec(),
        })
        .collect();

    let out_rank = output_shape.len();
    let mut combined = vec![0usize; out_rank + plan.marginal_shape().len()];
    let mut args: Vec<T> = Vec::with_capacity(projections.len());
    let mut results: Vec<T> = Vec::with_capacity(output_len);

    for out_idx in IndexIter::new(output_shape) {
        combined[..out_rank].copy_from_slice(&out_idx);
        let mut acc: Option<T> = None;
        for marg_idx in IndexIter::new(plan.marginal_shape()) {
            combined[out_rank..].copy_from_slice(&marg_idx);
            args.clear();
            args.extend(projections.iter().map(|p| p.fetch(&combined)));
            let term = combine(&args);
            acc = Some(match acc {
                None => term,
                Some(a) => reducer.reduce(a, term),
            });
        }
        if let Some(v) = acc.or(empty_fill) {
            results.push(v);
        }
    }

    if plan.is_scalar_output() {
        if let Some(&value) = results.first() {
            if let Some(out) = out {
                out.set(&[], value)?;
            }
            return Ok(Value::Scalar(value));
        }
    }

    let result = Tensor::from_vec(results, output_shape)?;
    match out {
        Some(out) => {
            out.assign(&[], &result)?;
            Ok(Value::Tensor(out.clone()))
        }
        None => Ok(Value::Tensor(result)),
    }
}

/// Einstein summation: product combine, sum reducer.
///
/// # Examples
///
/// ```
/// use einarray_core::Tensor;
/// use einarray_exec::einsum;
///
/// let eye = Tensor::<f64>::eye(3);
/// assert_eq!(einsum("ii->", &[&eye])?.as_scalar(), Some(3.0));
///
/// let u = Tensor::<f64>::from_vec(vec![1.0, 2.0], &[2])?;
/// let v = Tensor::<f64>::from_vec(vec![3.0, 4.0, 5.0], &[3])?;
/// let outer = einsum("i,j->ij", &[&u, &v])?.into_tensor();
/// assert_eq!(outer.to_vec(), vec![3.0, 4.0, 5.0, 6.0, 8.0, 10.0]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn einsum<T>(spec: impl Into<SubscriptSpec>, operands: &[&Tensor<T>]) -> ExecResult<Value<T>>
where
    T: Copy + Num + PartialOrd,
{
    einsum_into(spec, operands, None)
}

/// [`einsum`] writing into a caller-supplied output.
pub fn einsum_into<T>(
    spec: impl Into<SubscriptSpec>,
    operands: &[&Tensor<T>],
    out: Option<&Tensor<T>>,
) -> ExecResult<Value<T>>
where
    T: Copy + Num + PartialOrd,
{
    einreduce(spec, operands, product, ReduceOp::Sum, out)
}

/// [`einsum_into`] with a broadcast rule for label sizes.
///
/// Under [`BroadcastMode::Strict`] every occurrence of a label must have the
/// same size. Under [`BroadcastMode::Permissive`] an operand axis of size 1 is
/// stretched to the size the label has elsewhere; other conflicts still fail
/// with `InconsistentDimension`.
///
/// ```
/// use einarray_core::{BroadcastMode, Tensor};
/// use einarray_exec::einsum_with;
///
/// let m = Tensor::<i32>::from_nested([[1, 2], [3, 4]])?;
/// let bias = Tensor::<i32>::from_nested([[10], [20]])?;
///
/// assert!(einsum_with("ij,ij->ij", &[&m, &bias], None, BroadcastMode::Strict).is_err());
/// let y = einsum_with("ij,ij->ij", &[&m, &bias], None, BroadcastMode::Permissive)?;
/// assert_eq!(y.into_tensor().to_vec(), vec![10, 20, 60, 80]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn einsum_with<T>(
    spec: impl Into<SubscriptSpec>,
    operands: &[&Tensor<T>],
    out: Option<&Tensor<T>>,
    mode: BroadcastMode,
) -> ExecResult<Value<T>>
where
    T: Copy + Num + PartialOrd,
{
    let subscripts = spec.into().resolve()?;
    match mode {
        BroadcastMode::Strict => einsum_into(subscripts, operands, out),
        BroadcastMode::Permissive => {
            let stretched = stretch_unit_axes(&subscripts, operands)?;
            let refs: Vec<&Tensor<T>> = stretched.iter().collect();
            einsum_into(subscripts, &refs, out)
        }
    }
}

/// Broadcast size-1 axes of each operand to the first other size their label
/// takes. Operands whose rank does not match their labels are left for
/// [`ReductionPlan::new`] to reject.
fn stretch_unit_axes<T>(subscripts: &Subscripts, operands: &[&Tensor<T>]) -> ExecResult<Vec<Tensor<T>>> {
    let mut sizes: HashMap<Label, usize> = HashMap::new();
    for (labels, t) in subscripts.operands().iter().zip(operands) {
        for (&label, &size) in labels.iter().zip(t.shape()) {
            if size != 1 {
                sizes.entry(label).or_insert(size);
            }
        }
    }

    let mut stretched = Vec::with_capacity(operands.len());
    for (i, t) in operands.iter().enumerate() {
        let labels = subscripts.operands().get(i);
        let target: Option<Vec<usize>> = labels
            .filter(|labels| labels.len() == t.rank())
            .map(|labels| {
                labels
                    .iter()
                    .zip(t.shape())
                    .map(|(label, &size)| match size {
                        1 => sizes.get(label).copied().unwrap_or(1),
                        n => n,
                    })
                    .collect()
            });
        match target {
            Some(shape) if shape.as_slice() != t.shape() => {
                tracing::trace!(operand = i, from = ?t.shape(), to = ?shape, "stretch operand");
                stretched.push(t.broadcast_to(&shape)?);
            }
            _ => stretched.push((*t).clone()),
        }
    }
    Ok(stretched)
}

fn product<T: Copy + Num>(xs: &[T]) -> T {
    xs.iter().fold(T::one(), |acc, &x| acc * x)
}

/// Matrix product of two rank-2 tensors, `"ij,jk->ik"`.
///
/// ```
/// use einarray_core::Tensor;
/// use einarray_exec::matmul;
///
/// let a = Tensor::<i64>::from_nested([[1, 2], [3, 4]])?;
/// let b = Tensor::<i64>::from_nested([[5, 6], [7, 8]])?;
/// assert_eq!(matmul(&a, &b)?.to_vec(), vec![19, 22, 43, 50]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn matmul<T>(a: &Tensor<T>, b: &Tensor<T>) -> ExecResult<Tensor<T>>
where
    T: Copy + Num + PartialOrd,
{
    Ok(einsum("ij,jk->ik", &[a, b])?.into_tensor())
}

/// Subscripts reducing `axes` of a rank-`rank` operand, keeping the rest in
/// order. `None` reduces every axis.
pub fn axis_subscripts(rank: usize, axes: Option<&[Axis]>) -> ExecResult<Subscripts> {
    let input: Vec<Label> = (0..rank).map(Label::Axis).collect();
    let output: Vec<Label> = match axes {
        None => Vec::new(),
        Some(axes) => {
            if let Some(&axis) = axes.iter().find(|&&a| a >= rank) {
                return Err(TensorError::InvalidAxis { axis, rank }.into());
            }
            input
                .iter()
                .copied()
                .filter(|l| !matches!(l, Label::Axis(a) if axes.contains(a)))
                .collect()
        }
    };
    Ok(Subscripts::new(vec![input], output)?)
}

/// Reduce `axes` of `t` with a named operation; `None` reduces every axis
/// and gives a scalar.
pub fn reduce<T>(t: &Tensor<T>, axes: Option<&[Axis]>, op: ReduceOp) -> ExecResult<Value<T>>
where
    T: Copy + Num + PartialOrd,
{
    let subscripts = axis_subscripts(t.rank(), axes)?;
    einreduce(subscripts, &[t], |xs: &[T]| xs[0], op, None)
}

/// Sum over `axes` (every axis when `None`).
///
/// ```
/// use einarray_core::Tensor;
/// use einarray_exec::sum;
///
/// let t = Tensor::<i32>::from_nested([[1, 2, 3], [4, 5, 6]])?;
/// assert_eq!(sum(&t, Some(&[1]))?.into_tensor().to_vec(), vec![6, 15]);
/// assert_eq!(sum(&t, None)?.as_scalar(), Some(21));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn sum<T>(t: &Tensor<T>, axes: Option<&[Axis]>) -> ExecResult<Value<T>>
where
    T: Copy + Num + PartialOrd,
{
    reduce(t, axes, ReduceOp::Sum)
}

/// Product over `axes` (every axis when `None`).
pub fn prod<T>(t: &Tensor<T>, axes: Option<&[Axis]>) -> ExecResult<Value<T>>
where
    T: Copy + Num + PartialOrd,
{
    reduce(t, axes, ReduceOp::Prod)
}

/// Minimum over `axes` (every axis when `None`). Fails on empty axes.
pub fn min<T>(t: &Tensor<T>, axes: Option<&[Axis]>) -> ExecResult<Value<T>>
where
    T: Copy + Num + PartialOrd,
{
    reduce(t, axes, ReduceOp::Min)
}

/// Maximum over `axes` (every axis when `None`). Fails on empty axes.
pub fn max<T>(t: &Tensor<T>, axes: Option<&[Axis]>) -> ExecResult<Value<T>>
where
    T: Copy + Num + PartialOrd,
{
    reduce(t, axes, ReduceOp::Max)
}
