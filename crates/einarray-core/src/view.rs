//! Affine views over a flat buffer
//!
//! A [`View`] is the addressing scheme of a tensor: an `offset` plus one stride
//! per axis. The element at index tuple `idx` lives at buffer position
//!
//! ```text
//! offset + Σ idx[i] * strides[i]
//! ```
//!
//! Slicing, integer indexing and broadcasting never touch data; they derive a
//! new view in O(rank). Views are immutable once built.
//!
//! # Examples
//!
//! ```
//! use einarray_core::{Key, Slice, View};
//!
//! let view = View::contiguous(&[3, 4]);
//! assert_eq!(view.strides(), &[4, 1]);
//!
//! // Row 1, every other column
//! let child = view.select(&[Key::Index(1), Slice::new(0, None, 2)?.into()])?;
//! assert_eq!(child.shape(), &[2]);
//! assert_eq!(child.offset(), 4);
//! assert_eq!(child.strides(), &[2]);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fmt;

use crate::error::{TensorError, TensorResult};
use crate::iter::IndexIter;
use crate::slice::Key;
use crate::types::{Shape, Strides};

/// Offset, strides and shape of a tensor over its buffer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct View {
    offset: isize,
    strides: Strides,
    shape: Shape,
}

impl View {
    /// Row-major view over a fresh buffer of exactly `shape.iter().product()` elements.
    pub fn contiguous(shape: &[usize]) -> Self {
        Self {
            offset: 0,
            strides: row_major_strides(shape),
            shape: Shape::from_slice(shape),
        }
    }

    /// Build a view from raw parts. `strides` must have one entry per axis and
    /// every reachable position must be non-negative.
    pub fn from_parts(offset: isize, strides: &[isize], shape: &[usize]) -> TensorResult<Self> {
        if strides.len() != shape.len() {
            return Err(TensorError::RankMismatch {
                expected: shape.len(),
                got: strides.len(),
            });
        }
        if shape.iter().all(|&n| n > 0) {
            let lowest = shape
                .iter()
                .zip(strides)
                .try_fold(offset, |acc, (&n, &s)| {
                    (n as isize - 1).checked_mul(s.min(0))?.checked_add(acc)
                });
            match lowest {
                Some(p) if p >= 0 => {}
                _ => {
                    return Err(TensorError::InvalidView {
                        reason: format!(
                            "offset {offset} with strides {strides:?} reaches a negative position"
                        ),
                    })
                }
            }
        }
        Ok(Self {
            offset,
            strides: Strides::from_slice(strides),
            shape: Shape::from_slice(shape),
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    pub fn offset(&self) -> isize {
        self.offset
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of logical elements.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the view walks its elements in row-major order with no gaps.
    pub fn is_contiguous(&self) -> bool {
        self.strides == row_major_strides(&self.shape)
    }

    /// True when at least one axis has stride 0 and more than one element.
    pub fn has_broadcast_axes(&self) -> bool {
        self.shape
            .iter()
            .zip(self.strides.iter())
            .any(|(&n, &s)| s == 0 && n > 1)
    }

    /// Buffer position of the element at `index`.
    ///
    /// `index` must have one entry per axis and lie inside the shape.
    pub fn position(&self, index: &[usize]) -> TensorResult<usize> {
        if index.len() != self.rank() {
            return Err(TensorError::RankMismatch {
                expected: self.rank(),
                got: index.len(),
            });
        }
        let mut pos = self.offset;
        for (axis, ((&i, &n), &s)) in index
            .iter()
            .zip(self.shape.iter())
            .zip(self.strides.iter())
            .enumerate()
        {
            if i >= n {
                return Err(TensorError::IndexOutOfBounds {
                    axis,
                    index: i as isize,
                    size: n,
                });
            }
            pos += i as isize * s;
        }
        usize::try_from(pos).map_err(|_| TensorError::IndexOutOfBounds {
            axis: 0,
            index: pos,
            size: 0,
        })
    }

    /// Derive a child view from an indexing key.
    ///
    /// The key is padded with [`Key::Full`] up to the rank. Integer entries
    /// collapse their axis, slices keep it with a rescaled stride, and
    /// [`Key::Full`] passes the axis through. A result of rank 0 addresses a
    /// single buffer position, [`View::offset`].
    pub fn select(&self, key: &[Key]) -> TensorResult<View> {
        if key.len() > self.rank() {
            return Err(TensorError::TooManyIndices {
                rank: self.rank(),
                got: key.len(),
            });
        }
        let mut offset = self.offset;
        let mut shape = Shape::with_capacity(self.rank());
        let mut strides = Strides::with_capacity(self.rank());

        for axis in 0..self.rank() {
            let size = self.shape[axis];
            let stride = self.strides[axis];
            match key.get(axis).copied().unwrap_or(Key::Full) {
                Key::Index(k) => {
                    let i = Key::resolve_index(k, axis, size)?;
                    offset += i as isize * stride;
                }
                Key::Slice(slice) => {
                    let r = slice.resolve(size);
                    if r.len > 0 {
                        offset += r.start * stride;
                    }
                    shape.push(r.len);
                    strides.push(stride * r.step);
                }
                Key::Full => {
                    shape.push(size);
                    strides.push(stride);
                }
            }
        }

        tracing::trace!(?key, offset, ?shape, ?strides, "derived view");
        Ok(View {
            offset,
            strides,
            shape,
        })
    }

    /// View of position `i` along the leading axis.
    pub(crate) fn subview(&self, i: usize) -> View {
        View {
            offset: self.offset + i as isize * self.strides[0],
            strides: Strides::from_slice(&self.strides[1..]),
            shape: Shape::from_slice(&self.shape[1..]),
        }
    }

    /// Stretch this view to `target` without copying.
    ///
    /// Axes are aligned on the right. Size-1 axes and missing leading axes get
    /// stride 0; every other axis must already have the target size.
    pub fn broadcast_to(&self, target: &[usize]) -> TensorResult<View> {
        let incompatible =
            |axis| TensorError::incompatible(&[self.shape.as_slice(), target], axis);
        if target.len() < self.rank() {
            return Err(incompatible(self.rank() - 1));
        }
        let extra = target.len() - self.rank();
        let mut strides = Strides::with_capacity(target.len());
        strides.extend(std::iter::repeat(0).take(extra));

        for (i, (&n, &s)) in self.shape.iter().zip(self.strides.iter()).enumerate() {
            let want = target[extra + i];
            if n == want {
                strides.push(if n == 1 { 0 } else { s });
            } else if n == 1 {
                strides.push(0);
            } else {
                return Err(incompatible(self.rank() - 1 - i));
            }
        }

        Ok(View {
            offset: self.offset,
            strides,
            shape: Shape::from_slice(target),
        })
    }

    /// Buffer positions of every element in row-major logical order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        IndexIter::new(&self.shape).map(move |index| {
            let pos = self.offset
                + index
                    .iter()
                    .zip(self.strides.iter())
                    .map(|(&i, &s)| i as isize * s)
                    .sum::<isize>();
            pos as usize
        })
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "View(offset={}, strides={:?}, shape={:?})",
            self.offset,
            self.strides.as_slice(),
            self.shape.as_slice()
        )
    }
}

/// Row-major (C-contiguous) strides for `shape`.
pub fn row_major_strides(shape: &[usize]) -> Strides {
    let mut strides: Strides = smallvec::smallvec![1isize; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1] as isize;
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::Slice;

    #[test]
    fn test_contiguous_strides() {
        assert_eq!(View::contiguous(&[2, 3, 4]).strides(), &[12, 4, 1]);
        assert_eq!(View::contiguous(&[5]).strides(), &[1]);
        assert!(View::contiguous(&[]).strides().is_empty());
        assert!(View::contiguous(&[2, 3]).is_contiguous());
    }

    #[test]
    fn test_position() {
        let v = View::contiguous(&[2, 3]);
        assert_eq!(v.position(&[0, 0]).unwrap(), 0);
        assert_eq!(v.position(&[1, 2]).unwrap(), 5);
        assert!(matches!(
            v.position(&[2, 0]),
            Err(TensorError::IndexOutOfBounds { axis: 0, .. })
        ));
        assert!(matches!(
            v.position(&[1]),
            Err(TensorError::RankMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_scalar_view_position() {
        let v = View::contiguous(&[]);
        assert_eq!(v.position(&[]).unwrap(), 0);
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_select_pads_with_full_axes() {
        let v = View::contiguous(&[2, 3, 4]);
        let child = v.select(&[Key::Index(1)]).unwrap();
        assert_eq!(child.shape(), &[3, 4]);
        assert_eq!(child.strides(), &[4, 1]);
        assert_eq!(child.offset(), 12);
    }

    #[test]
    fn test_select_all_integers_is_scalar() {
        let v = View::contiguous(&[2, 3]);
        let child = v.select(&[Key::Index(1), Key::Index(-1)]).unwrap();
        assert_eq!(child.rank(), 0);
        assert_eq!(child.offset(), 5);
    }

    #[test]
    fn test_select_too_many_indices() {
        let v = View::contiguous(&[2]);
        assert!(matches!(
            v.select(&[Key::Index(0), Key::Index(0)]),
            Err(TensorError::TooManyIndices { rank: 1, got: 2 })
        ));
    }

    #[test]
    fn test_select_composes() {
        // [10] -> [2:8:2] -> [1:] picks original positions 4 and 6
        let v = View::contiguous(&[10]);
        let a = v.select(&[Slice::new(2, Some(8), 2).unwrap().into()]).unwrap();
        let b = a.select(&[Slice::from_start(1).into()]).unwrap();
        let positions: Vec<usize> = b.positions().collect();
        assert_eq!(positions, vec![4, 6]);
    }

    #[test]
    fn test_select_negative_step() {
        let v = View::contiguous(&[5]);
        let rev = v.select(&[Slice::new(4, None, -1).unwrap().into()]).unwrap();
        assert_eq!(rev.strides(), &[-1]);
        let positions: Vec<usize> = rev.positions().collect();
        assert_eq!(positions, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_select_empty_slice_keeps_offset() {
        let v = View::contiguous(&[3, 2]);
        let empty = v.select(&[Slice::from_start(5).into()]).unwrap();
        assert_eq!(empty.shape(), &[0, 2]);
        assert_eq!(empty.offset(), 0);
        assert_eq!(empty.positions().count(), 0);
    }

    #[test]
    fn test_broadcast_to() {
        let v = View::contiguous(&[3, 1]);
        let b = v.broadcast_to(&[2, 3, 4]).unwrap();
        assert_eq!(b.shape(), &[2, 3, 4]);
        assert_eq!(b.strides(), &[0, 1, 0]);
        assert!(b.has_broadcast_axes());
        assert_eq!(b.position(&[1, 2, 3]).unwrap(), 2);
    }

    #[test]
    fn test_broadcast_to_rejects_stretching() {
        let v = View::contiguous(&[2]);
        assert!(matches!(
            v.broadcast_to(&[3]),
            Err(TensorError::IncompatibleShapes { .. })
        ));
        assert!(View::contiguous(&[2, 2]).broadcast_to(&[2]).is_err());
    }

    #[test]
    fn test_from_parts_rank_check() {
        assert!(View::from_parts(0, &[1], &[2, 2]).is_err());
        let v = View::from_parts(1, &[2], &[2]).unwrap();
        assert_eq!(v.positions().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_from_parts_rejects_negative_positions() {
        assert!(matches!(
            View::from_parts(-1, &[1], &[2]),
            Err(TensorError::InvalidView { .. })
        ));
        // walking backwards from position 2 by 3 leaves the buffer
        assert!(View::from_parts(2, &[-3], &[2]).is_err());
        assert!(View::from_parts(-1, &[], &[]).is_err());

        let v = View::from_parts(3, &[-3, 1], &[2, 2]).unwrap();
        assert_eq!(v.positions().collect::<Vec<_>>(), vec![3, 4, 0, 1]);

        // nothing is addressed through an empty view
        let empty = View::from_parts(-5, &[1], &[0]).unwrap();
        assert_eq!(empty.positions().count(), 0);
    }
}
