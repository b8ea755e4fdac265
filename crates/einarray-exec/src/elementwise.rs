//! Broadcasting elementwise operations
//!
//! [`elementwise`] lifts an n-ary scalar function to tensors: arguments are
//! broadcast to one shape (scalars count as 0-dimensional tensors) and the
//! function is applied at every position of a freshly allocated output.
//! [`tensorize`] packages the same thing as a reusable closure, and the named
//! functions below cover the usual arithmetic and math set.


use einarray_core::{broadcast_with, BroadcastMode, Tensor, Value};
use num_traits::{Float, Num};

use crate::error::ExecResult;

/// Apply `f` elementwise over broadcast arguments.
///
/// `f` receives one element per argument, in argument order. Inputs are read
/// before `f` is first called, so the output never aliases an input.
///
/// # Examples
///
/// ```
/// use einarray_core::{BroadcastMode, Tensor, Value};
/// use einarray_exec::elementwise;
///
/// let col = Tensor::<f64>::from_vec(vec![1.0, 2.0], &[2, 1])?;
/// let row = Tensor::<f64>::from_vec(vec![10.0, 20.0, 30.0], &[3])?;
///
/// let fma = elementwise(
///     &[col.into(), row.into(), Value::Scalar(0.5)],
///     |xs: &[f64]| xs[0] * xs[1] + xs[2],
///     BroadcastMode::Strict,
/// )?;
/// assert_eq!(fma.shape(), &[2, 3]);
/// assert_eq!(fma.to_vec(), vec![10.5, 20.5, 30.5, 20.5, 40.5, 60.5]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn elementwise<T, F>(args: &[Value<T>], mut f: F, mode: BroadcastMode) -> ExecResult<Tensor<T>>
where
    T: Copy,
    F: FnMut(&[T]) -> T,
{
    let tensors: Vec<Tensor<T>> = args.iter().cloned().map(Value::into_tensor).collect();
    let refs: Vec<&Tensor<T>> = tensors.iter().collect();
    let stretched = broadcast_with(mode, &refs)?;

    let shape: Vec<usize> = match stretched.first() {
        Some(t) => t.shape().to_vec(),
        None => Vec::new(),
    };
    let len: usize = shape.iter().product();
    let columns: Vec<Vec<T>> = stretched.iter().map(Tensor::to_vec).collect();

    tracing::trace!(arity = args.len(), shape = ?shape, ?mode, "elementwise");

    let mut point: Vec<T> = Vec::with_capacity(columns.len());
    let data: Vec<T> = (0..len)
        .map(|i| {
            point.clear();
            point.extend(columns.iter().map(|c| c[i]));
            f(&point)
        })
        .collect();

    Ok(Tensor::from_vec(data, &shape)?)
}

/// Lift a scalar function into a reusable tensor function.
///
/// ```
/// use einarray_core::{BroadcastMode, Tensor};
/// use einarray_exec::tensorize;
///
/// let mut hypot = tensorize(|xs: &[f64]| xs[0].hypot(xs[1]), BroadcastMode::Strict);
/// let a = Tensor::from_vec(vec![3.0, 6.0], &[2])?;
/// let b = Tensor::from_vec(vec![4.0, 8.0], &[2])?;
/// let out = hypot(&[a.into(), b.into()])?;
/// assert_eq!(out.to_vec(), vec![5.0, 10.0]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn tensorize<T, F>(
    mut f: F,
    mode: BroadcastMode,
) -> impl FnMut(&[Value<T>]) -> ExecResult<Tensor<T>>
where
    T: Copy,
    F: FnMut(&[T]) -> T,
{
    move |args: &[Value<T>]| elementwise(args, &mut f, mode)
}

fn binary<T, F>(a: Value<T>, b: Value<T>, f: F) -> ExecResult<Tensor<T>>
where
    T: Copy,
    F: Fn(T, T) -> T,
{
    elementwise(&[a, b], |xs: &[T]| f(xs[0], xs[1]), BroadcastMode::Strict)
}

fn unary<T, F>(x: Value<T>, f: F) -> ExecResult<Tensor<T>>
where
    T: Copy,
    F: Fn(T) -> T,
{
    elementwise(&[x], |xs: &[T]| f(xs[0]), BroadcastMode::Strict)
}

/// Elementwise `a + b` with broadcasting.
///
/// ```
/// use einarray_core::Tensor;
/// use einarray_exec::{add, mul};
///
/// let t = Tensor::<i32>::from_nested([[1, 2], [3, 4]])?;
/// assert_eq!(add(&t, 10)?.to_vec(), vec![11, 12, 13, 14]);
/// assert_eq!(mul(&t, &t)?.to_vec(), vec![1, 4, 9, 16]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn add<T: Copy + Num>(a: impl Into<Value<T>>, b: impl Into<Value<T>>) -> ExecResult<Tensor<T>> {
    binary(a.into(), b.into(), |x, y| x + y)
}

/// Elementwise `a - b` with broadcasting.
pub fn sub<T: Copy + Num>(a: impl Into<Value<T>>, b: impl Into<Value<T>>) -> ExecResult<Tensor<T>> {
    binary(a.into(), b.into(), |x, y| x - y)
}

/// Elementwise `a * b` with broadcasting.
pub fn mul<T: Copy + Num>(a: impl Into<Value<T>>, b: impl Into<Value<T>>) -> ExecResult<Tensor<T>> {
    binary(a.into(), b.into(), |x, y| x * y)
}

/// Elementwise `a / b` with broadcasting. Integer division by zero panics as
/// it does for the scalar type.
pub fn div<T: Copy + Num>(a: impl Into<Value<T>>, b: impl Into<Value<T>>) -> ExecResult<Tensor<T>> {
    binary(a.into(), b.into(), |x, y| x / y)
}

/// Elementwise `a ^ b` with broadcasting.
pub fn pow<T: Copy + Float>(a: impl Into<Value<T>>, b: impl Into<Value<T>>) -> ExecResult<Tensor<T>> {
    binary(a.into(), b.into(), |x, y| x.powf(y))
}

macro_rules! unary_float {
    ($($(#[$doc:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name<T: Copy + Float>(x: impl Into<Value<T>>) -> ExecResult<Tensor<T>> {
                unary(x.into(), |v: T| v.$method())
            }
        )*
    };
}

unary_float! {
    /// Elementwise `e^x`.
    exp => exp;
    /// Elementwise natural logarithm.
    log => ln;
    sin => sin;
    cos => cos;
    tan => tan;
    sinh => sinh;
    cosh => cosh;
    tanh => tanh;
    /// Elementwise square root; negative inputs give NaN.
    sqrt => sqrt;
    abs => abs;
    /// Elementwise negation.
    neg => neg;
}
