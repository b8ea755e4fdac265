//! Broadcasting shapes and stride-0 views
//!
//! Shapes are aligned on the right, missing leading axes count as size 1, and
//! at every aligned axis the sizes other than 1 must agree. Broadcast tensors
//! never copy: stretched axes get stride 0 over the original buffer.
//!
//! # Examples
//!
//! ```
//! use einarray_core::{broadcast, broadcast_shapes, Tensor};
//!
//! assert_eq!(broadcast_shapes(&[&[3, 1], &[1, 4]])?.as_slice(), &[3, 4]);
//!
//! let col = Tensor::<i32>::from_vec(vec![1, 2, 3], &[3, 1])?;
//! let row = Tensor::<i32>::from_vec(vec![10, 20], &[2])?;
//! let out = broadcast(&[&col, &row])?;
//! assert_eq!(out[0].to_vec(), vec![1, 1, 2, 2, 3, 3]);
//! assert_eq!(out[1].to_vec(), vec![10, 20, 10, 20, 10, 20]);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::types::Tensor;
use crate::error::{TensorError, TensorResult};
use crate::types::Shape;

/// How [`broadcast_shapes_with`] treats conflicting axis sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BroadcastMode {
    /// NumPy rule: after dropping 1s, at most one distinct size per axis.
    #[default]
    Strict,
    /// Accept up to two distinct sizes per axis (1s included) and take the
    /// largest. Only the shape computation is relaxed; stretching a tensor
    /// whose axis is neither 1 nor the target size still fails.
    Permissive,
}

/// Common shape of `shapes` under [`BroadcastMode::Strict`].
///
/// Fails with [`TensorError::IncompatibleShapes`] naming the first conflicting
/// axis, counted from the right.
pub fn broadcast_shapes(shapes: &[&[usize]]) -> TensorResult<Shape> {
    broadcast_shapes_with(BroadcastMode::Strict, shapes)
}

/// Common shape of `shapes` under the given mode.
///
/// ```
/// use einarray_core::{broadcast_shapes_with, BroadcastMode};
///
/// assert!(broadcast_shapes_with(BroadcastMode::Strict, &[&[2], &[3]]).is_err());
/// let shape = broadcast_shapes_with(BroadcastMode::Permissive, &[&[2], &[3]])?;
/// assert_eq!(shape.as_slice(), &[3]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn broadcast_shapes_with(mode: BroadcastMode, shapes: &[&[usize]]) -> TensorResult<Shape> {
    let rank = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out: Shape = smallvec::smallvec![1; rank];

    for axis in 0..rank {
        // Size of every shape at this axis, counted from the right
        let mut sizes: Vec<usize> = shapes
            .iter()
            .map(|s| {
                if axis < s.len() {
                    s[s.len() - 1 - axis]
                } else {
                    1
                }
            })
            .collect();
        sizes.sort_unstable();
        sizes.dedup();

        let size = match mode {
            BroadcastMode::Strict => {
                sizes.retain(|&n| n != 1);
                match sizes.as_slice() {
                    [] => 1,
                    [n] => *n,
                    _ => return Err(TensorError::incompatible(shapes, axis)),
                }
            }
            BroadcastMode::Permissive => {
                if sizes.len() > 2 {
                    return Err(TensorError::incompatible(shapes, axis));
                }
                sizes.last().copied().unwrap_or(1)
            }
        };
        out[rank - 1 - axis] = size;
    }

    tracing::trace!(?shapes, ?mode, result = ?out.as_slice(), "broadcast shapes");
    Ok(out)
}

impl<T> Tensor<T> {
    /// Stretch to `shape` without copying.
    ///
    /// Size-1 axes and missing leading axes get stride 0; every other axis must
    /// already match. Broadcasting to the tensor's own shape gives an
    /// observably identical tensor over the same buffer.
    ///
    /// ```
    /// use einarray_core::Tensor;
    ///
    /// let t = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0], &[3])?;
    /// let b = t.broadcast_to(&[2, 3])?;
    /// assert_eq!(b.to_vec(), vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    /// assert!(b.shares_buffer(&t));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn broadcast_to(&self, shape: &[usize]) -> TensorResult<Tensor<T>> {
        let view = self.view.broadcast_to(shape)?;
        Ok(Tensor::from_parts(self.buffer.clone(), view))
    }
}

/// Broadcast every tensor to the common strict shape.
pub fn broadcast<T>(tensors: &[&Tensor<T>]) -> TensorResult<Vec<Tensor<T>>> {
    broadcast_with(BroadcastMode::Strict, tensors)
}

/// Broadcast every tensor to the common shape computed under `mode`.
pub fn broadcast_with<T>(mode: BroadcastMode, tensors: &[&Tensor<T>]) -> TensorResult<Vec<Tensor<T>>> {
    let shapes: Vec<&[usize]> = tensors.iter().map(|t| t.shape()).collect();
    let target = broadcast_shapes_with(mode, &shapes)?;
    tensors.iter().map(|t| t.broadcast_to(&target)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_law() {
        assert_eq!(broadcast_shapes(&[&[3, 1], &[1, 4]]).unwrap().as_slice(), &[3, 4]);
        assert_eq!(broadcast_shapes(&[&[5, 1, 2], &[4, 1]]).unwrap().as_slice(), &[5, 4, 2]);
        assert_eq!(broadcast_shapes(&[&[], &[2]]).unwrap().as_slice(), &[2]);
        assert!(broadcast_shapes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_strict_rejects_conflict() {
        let err = broadcast_shapes(&[&[2], &[3]]).unwrap_err();
        assert_eq!(
            err,
            TensorError::IncompatibleShapes {
                shapes: vec![vec![2], vec![3]],
                axis: 0
            }
        );
        assert!(matches!(
            broadcast_shapes(&[&[2, 4], &[3, 4]]),
            Err(TensorError::IncompatibleShapes { axis: 1, .. })
        ));
    }

    #[test]
    fn test_zero_sized_axis_broadcasts() {
        assert_eq!(broadcast_shapes(&[&[0], &[1]]).unwrap().as_slice(), &[0]);
        assert!(broadcast_shapes(&[&[0], &[2]]).is_err());
    }

    #[test]
    fn test_permissive_mode() {
        let shape = broadcast_shapes_with(BroadcastMode::Permissive, &[&[2], &[3]]).unwrap();
        assert_eq!(shape.as_slice(), &[3]);
        assert!(broadcast_shapes_with(BroadcastMode::Permissive, &[&[1], &[2], &[3]]).is_err());
        assert_eq!(
            broadcast_shapes_with(BroadcastMode::Permissive, &[&[3, 1], &[1, 4]])
                .unwrap()
                .as_slice(),
            &[3, 4]
        );
    }

    #[test]
    fn test_permissive_shape_unreachable_by_broadcast() {
        let a = Tensor::<i32>::from_vec(vec![1, 2], &[2]).unwrap();
        let b = Tensor::<i32>::from_vec(vec![1, 2, 3], &[3]).unwrap();
        assert!(matches!(
            broadcast_with(BroadcastMode::Permissive, &[&a, &b]),
            Err(TensorError::IncompatibleShapes { .. })
        ));
    }

    #[test]
    fn test_broadcast_to_own_shape() {
        let t = Tensor::<i32>::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        let b = t.broadcast_to(&[2, 2]).unwrap();
        assert_eq!(b, t);
        assert_eq!(b.view(), t.view());
        assert!(b.shares_buffer(&t));
    }

    #[test]
    fn test_broadcast_write_through() {
        let t = Tensor::<i32>::from_vec(vec![1, 2], &[2, 1]).unwrap();
        let b = t.broadcast_to(&[2, 3]).unwrap();
        b.set(&[1, 2], 9).unwrap();
        assert_eq!(t.to_vec(), vec![1, 9]);
        assert_eq!(b.to_vec(), vec![1, 1, 1, 9, 9, 9]);
    }

    #[test]
    fn test_broadcast_scalar_tensor() {
        let s = Tensor::scalar(5);
        let b = s.broadcast_to(&[2, 2]).unwrap();
        assert_eq!(b.to_vec(), vec![5; 4]);
        assert_eq!(b.buffer_len(), 1);
    }
}
