//! Reducers folding the terms of a reduction
//!
//! A reducer is an associative binary operation. The first term of every
//! output element seeds the accumulator, so a reducer only needs an identity
//! value to handle reductions over empty axes.

use num_traits::Num;

/// Associative fold used by [`crate::einreduce`].
///
/// Any `FnMut(T, T) -> T` closure is a reducer without an identity.
pub trait Reducer<T> {
    fn reduce(&mut self, acc: T, x: T) -> T;

    /// Result of reducing zero terms, if the operation defines one.
    fn identity(&self) -> Option<T> {
        None
    }
}

impl<T, F> Reducer<T> for F
where
    F: FnMut(T, T) -> T,
{
    fn reduce(&mut self, acc: T, x: T) -> T {
        self(acc, x)
    }
}

/// Reduction operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReduceOp {
    /// Addition, identity 0
    Sum,
    /// Multiplication, identity 1
    Prod,
    /// Smallest term; no identity
    Min,
    /// Largest term; no identity
    Max,
}

impl<T> Reducer<T> for ReduceOp
where
    T: Copy + Num + PartialOrd,
{
    fn reduce(&mut self, acc: T, x: T) -> T {
        match self {
            ReduceOp::Sum => acc + x,
            ReduceOp::Prod => acc * x,
            ReduceOp::Min => {
                if x < acc {
                    x
                } else {
                    acc
                }
            }
            ReduceOp::Max => {
                if x > acc {
                    x
                } else {
                    acc
                }
            }
        }
    }

    fn identity(&self) -> Option<T> {
        match self {
            ReduceOp::Sum => Some(T::zero()),
            ReduceOp::Prod => Some(T::one()),
            ReduceOp::Min | ReduceOp::Max => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold<R: Reducer<i32>>(mut r: R, xs: &[i32]) -> Option<i32> {
        let mut it = xs.iter().copied();
        match it.next() {
            Some(first) => Some(it.fold(first, |acc, x| r.reduce(acc, x))),
            None => r.identity(),
        }
    }

    #[test]
    fn test_named_ops() {
        let xs = [3, -1, 4, 1];
        assert_eq!(fold(ReduceOp::Sum, &xs), Some(7));
        assert_eq!(fold(ReduceOp::Prod, &xs), Some(-12));
        assert_eq!(fold(ReduceOp::Min, &xs), Some(-1));
        assert_eq!(fold(ReduceOp::Max, &xs), Some(4));
    }

    #[test]
    fn test_identities() {
        assert_eq!(fold(ReduceOp::Sum, &[]), Some(0));
        assert_eq!(fold(ReduceOp::Prod, &[]), Some(1));
        assert_eq!(fold(ReduceOp::Min, &[]), None);
    }

    #[test]
    fn test_closure_reducer() {
        assert_eq!(fold(|a: i32, b: i32| a.max(b) * 2, &[1, 2, 3]), Some(8));
        assert_eq!(fold(|a: i32, b: i32| a + b, &[]), None);
    }
}
