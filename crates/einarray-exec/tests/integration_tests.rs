//! Integration tests for einarray-exec
//!
//! Reductions, elementwise functions and the executor seam used together
//! through the public API.

use einarray_core::{BroadcastMode, Key, Slice, Tensor, TensorError, Value};
use einarray_exec::{
    add, einreduce, einsum, einsum_ex, einsum_with, matmul, max, min, sum, tensorize, CpuExecutor, ElemOp,
    ExecError, ExecHints, Executor, ReduceOp,
};
use einarray_planner::SubscriptError;

#[test]
fn test_einsum_equals_matrix_multiplication() {
    let a = Tensor::<f64>::from_nested([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    let b = Tensor::<f64>::from_nested([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]).unwrap();

    let c = einsum("ij,jk->ik", &[&a, &b]).unwrap().into_tensor();
    let mut manual = vec![0.0; 4];
    for i in 0..2 {
        for k in 0..2 {
            for j in 0..3 {
                manual[i * 2 + k] += a.get(&[i, j]).unwrap() * b.get(&[j, k]).unwrap();
            }
        }
    }
    assert_eq!(c.shape(), &[2, 2]);
    assert_eq!(c.to_vec(), manual);
    assert_eq!(matmul(&a, &b).unwrap(), c);
}

#[test]
fn test_trace_of_identity_is_scalar() {
    let eye = Tensor::<f64>::eye(3);
    match einsum("ii->", &[&eye]).unwrap() {
        Value::Scalar(v) => assert_eq!(v, 3.0),
        Value::Tensor(_) => panic!("expected a scalar"),
    }
}

#[test]
fn test_row_sums() {
    let t = Tensor::<i32>::from_nested([[1, 2, 3], [4, 5, 6]]).unwrap();
    let s = sum(&t, Some(&[1])).unwrap().into_tensor();
    assert_eq!(s.shape(), &[2]);
    assert_eq!(s.to_vec(), vec![6, 15]);
    assert_eq!(min(&t, Some(&[0])).unwrap().into_tensor().to_vec(), vec![1, 2, 3]);
    assert_eq!(max(&t, None).unwrap().as_scalar(), Some(6));
}

#[test]
fn test_einsum_over_views() {
    // rows 0 and 2 of a 3x2, dotted with a broadcast column of ones
    let t = Tensor::<i64>::from_vec((1..=6).collect(), &[3, 2]).unwrap();
    let picked = t.slice(&[Slice::new(0, None, 2).unwrap().into(), Key::Full]).unwrap();
    let ones = Tensor::<i64>::ones(&[1]).broadcast_to(&[2]).unwrap();
    let r = einsum("ij,j->i", &[&picked, &ones]).unwrap().into_tensor();
    assert_eq!(r.to_vec(), vec![3, 11]);
}

#[test]
fn test_errors_abort_before_writing() {
    let a = Tensor::<f64>::ones(&[2, 3]);
    let out = Tensor::<f64>::zeros(&[2, 2]);

    let r = einsum_ex("ij,jk->ik").inputs(&[&a, &a]).out(&out).run();
    assert!(matches!(
        r,
        Err(ExecError::Subscript(SubscriptError::InconsistentDimension { .. }))
    ));

    let r = einsum_ex("ij->i").inputs(&[&a]).out(&out).run();
    assert!(matches!(
        r,
        Err(ExecError::Tensor(TensorError::ShapeMismatch { .. }))
    ));
    assert_eq!(out.to_vec(), vec![0.0; 4]);
}

#[test]
fn test_min_over_empty_axis_fails() {
    let empty = Tensor::<f64>::zeros(&[3, 0]);
    let err = einreduce("ij->i", &[&empty], |xs: &[f64]| xs[0], ReduceOp::Min, None).unwrap_err();
    assert!(matches!(err, ExecError::EmptyReduction { .. }));
    assert!(err.to_string().contains('j'));
}

#[test]
fn test_softmax_like_pipeline() {
    let x = Tensor::<f64>::from_nested([[0.0, 0.0], [1.0, 1.0]]).unwrap();
    let mut exec = CpuExecutor::new();
    let e = exec.elem_op(ElemOp::Exp, &x).unwrap();
    let totals = exec.reduce(ReduceOp::Sum, &e, &[1]).unwrap().into_tensor();
    // [2] -> [2, 1] so it broadcasts across columns
    let col = Tensor::from_vec(totals.to_vec(), &[2, 1]).unwrap();
    let mut divide = tensorize(|xs: &[f64]| xs[0] / xs[1], BroadcastMode::Strict);
    let p = divide(&[e.into(), col.into()]).unwrap();
    assert_eq!(p.to_vec(), vec![0.5; 4]);
}

#[test]
fn test_permissive_hints_flow_through_executor() {
    let hints = ExecHints::new().with_broadcast(BroadcastMode::Permissive);
    let mut exec = CpuExecutor::with_hints(hints);
    let a = Tensor::<f64>::ones(&[1]);
    let b = Tensor::<f64>::ones(&[4]);
    let r = exec.binary_op(einarray_exec::BinaryOp::Add, &a, &b).unwrap();
    assert_eq!(r.to_vec(), vec![2.0; 4]);
    assert_eq!(add(&a, &b).unwrap(), r);
}

#[test]
fn test_permissive_einsum_stretches_batch_axis() {
    // one shared matrix against a batch of two
    let shared = Tensor::<i64>::from_nested([[[1, 0], [0, 2]]]).unwrap();
    let batch = Tensor::<i64>::from_vec((1..=8).collect(), &[2, 2, 2]).unwrap();
    let out = Tensor::<i64>::zeros(&[2, 2, 2]);

    let r = einsum_with(
        "bij,bjk->bik",
        &[&shared, &batch],
        Some(&out),
        BroadcastMode::Permissive,
    )
    .unwrap();
    assert!(r.into_tensor().shares_buffer(&out));
    assert_eq!(out.to_vec(), vec![1, 2, 6, 8, 5, 6, 14, 16]);
    // the stretched operand is untouched
    assert_eq!(shared.shape(), &[1, 2, 2]);

    assert!(matches!(
        einsum_with("bij,bjk->bik", &[&shared, &batch], None, BroadcastMode::Strict),
        Err(ExecError::Subscript(SubscriptError::InconsistentDimension { .. }))
    ));
}
