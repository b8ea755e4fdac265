//! Indexing and selection operations on tensors
//!
//! - [`Tensor::get`] / [`Tensor::set`] address one element by a full index tuple
//! - [`Tensor::select`] applies a Python-style key and returns a view or a scalar
//! - [`Tensor::assign`] writes a scalar or a tensor through a key
//! - [`Tensor::outer_iter`] walks the leading axis

use super::types::Tensor;
use crate::error::{TensorError, TensorResult};
use crate::slice::Key;
use crate::types::Value;

impl<T: Copy> Tensor<T> {
    /// Read the element at `index`.
    ///
    /// `index` needs one entry per axis; an empty index reads a 0-dimensional
    /// tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_core::{Tensor, TensorError};
    ///
    /// let t = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?;
    /// assert_eq!(t.get(&[0, 1])?, 2.0);
    /// assert!(matches!(t.get(&[2, 0]), Err(TensorError::IndexOutOfBounds { .. })));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn get(&self, index: &[usize]) -> TensorResult<T> {
        let pos = self.view.position(index)?;
        Ok(self.buffer.read(pos))
    }

    /// Write the element at `index`. The write is visible through every tensor
    /// sharing this buffer.
    pub fn set(&self, index: &[usize], value: T) -> TensorResult<()> {
        let pos = self.view.position(index)?;
        self.buffer.write(pos, value);
        Ok(())
    }

    /// Apply an indexing key, NumPy style.
    ///
    /// Each key entry is an integer ([`Key::Index`], negative counts from the
    /// end), a [`crate::Slice`], or [`Key::Full`]. Missing trailing entries take
    /// the full axis. When every axis is indexed by an integer the element is
    /// returned as [`Value::Scalar`]; otherwise the result is a
    /// [`Value::Tensor`] sharing this tensor's buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_core::{Slice, Tensor};
    ///
    /// let t = Tensor::<i32>::from_vec((0..10).collect(), &[10])?;
    ///
    /// let evens = t.select(&[Slice::new(2, Some(8), 2)?.into()])?.into_tensor();
    /// assert_eq!(evens.to_vec(), vec![2, 4, 6]);
    ///
    /// assert_eq!(t.select(&[(-1).into()])?.as_scalar(), Some(9));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn select(&self, key: &[Key]) -> TensorResult<Value<T>> {
        let view = self.view.select(key)?;
        if view.rank() == 0 {
            return Ok(Value::Scalar(self.buffer.read(view.position(&[])?)));
        }
        Ok(Value::Tensor(Tensor::from_parts(self.buffer.clone(), view)))
    }

    /// Like [`Tensor::select`] but always returns a tensor; an all-integer key
    /// gives a 0-dimensional view that still aliases the buffer.
    pub fn slice(&self, key: &[Key]) -> TensorResult<Tensor<T>> {
        let view = self.view.select(key)?;
        Ok(Tensor::from_parts(self.buffer.clone(), view))
    }

    /// Write through an indexing key.
    ///
    /// A scalar fills every selected position. A tensor must have exactly the
    /// shape of the selection ([`TensorError::ShapeMismatch`] otherwise, checked
    /// before anything is written). The source is read completely before the
    /// first write, so overlapping source and destination behave like a copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_core::{Slice, Tensor};
    ///
    /// let t = Tensor::<f64>::zeros(&[2, 3]);
    /// t.assign(&[0.into()], 1.0)?;
    ///
    /// let row = Tensor::from_vec(vec![7.0, 8.0, 9.0], &[3])?;
    /// t.assign(&[1.into()], &row)?;
    ///
    /// assert_eq!(t.to_vec(), vec![1.0, 1.0, 1.0, 7.0, 8.0, 9.0]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn assign(&self, key: &[Key], value: impl Into<Value<T>>) -> TensorResult<()> {
        let dest = self.view.select(key)?;
        match value.into() {
            Value::Scalar(v) => {
                self.buffer.fill(&dest, v);
            }
            Value::Tensor(src) => {
                if src.shape() != dest.shape() {
                    return Err(TensorError::shape_mismatch(dest.shape(), src.shape()));
                }
                let values = src.to_vec();
                self.buffer.scatter(&dest, &values);
            }
        }
        Ok(())
    }

    /// Iterate over the leading axis.
    ///
    /// Yields scalars for a 1-dimensional tensor and sub-tensor views otherwise.
    /// A 0-dimensional tensor yields nothing.
    ///
    /// ```
    /// use einarray_core::Tensor;
    ///
    /// let t = Tensor::<i32>::from_vec(vec![1, 2, 3, 4], &[2, 2])?;
    /// let rows: Vec<Vec<i32>> = t.outer_iter().map(|r| r.into_tensor().to_vec()).collect();
    /// assert_eq!(rows, vec![vec![1, 2], vec![3, 4]]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn outer_iter(&self) -> OuterIter<'_, T> {
        OuterIter {
            tensor: self,
            next: 0,
            end: self.shape().first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over the leading axis of a tensor, see [`Tensor::outer_iter`].
pub struct OuterIter<'a, T> {
    tensor: &'a Tensor<T>,
    next: usize,
    end: usize,
}

impl<T: Copy> Iterator for OuterIter<'_, T> {
    type Item = Value<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let view = self.tensor.view.subview(self.next);
        self.next += 1;
        if view.rank() == 0 {
            let pos = view.offset() as usize;
            return Some(Value::Scalar(self.tensor.buffer.read(pos)));
        }
        Some(Value::Tensor(Tensor::from_parts(
            self.tensor.buffer.clone(),
            view,
        )))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl<T: Copy> ExactSizeIterator for OuterIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::Slice;

    fn arange(n: i32, shape: &[usize]) -> Tensor<i32> {
        Tensor::from_vec((0..n).collect(), shape).unwrap()
    }

    #[test]
    fn test_get_set() {
        let t = arange(6, &[2, 3]);
        assert_eq!(t.get(&[1, 1]).unwrap(), 4);
        t.set(&[1, 1], 40).unwrap();
        assert_eq!(t.get(&[1, 1]).unwrap(), 40);
        assert!(t.set(&[0, 3], 1).is_err());
        assert!(matches!(
            t.get(&[0]),
            Err(TensorError::RankMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_select_empty_key_is_identity() {
        let t = arange(6, &[2, 3]);
        let same = t.select(&[]).unwrap().into_tensor();
        assert_eq!(same, t);
        assert!(same.shares_buffer(&t));
    }

    #[test]
    fn test_select_slice_arithmetic() {
        let t = arange(10, &[10]);
        let s = t
            .select(&[Slice::new(2, Some(8), 2).unwrap().into()])
            .unwrap()
            .into_tensor();
        assert_eq!(s.shape(), &[3]);
        assert_eq!(s.to_vec(), vec![2, 4, 6]);
    }

    #[test]
    fn test_select_negative_start() {
        let t = arange(5, &[5]);
        let s = t
            .select(&[Slice::new(-3, None, 1).unwrap().into()])
            .unwrap()
            .into_tensor();
        assert_eq!(s.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_select_mixed_key() {
        let t = arange(24, &[2, 3, 4]);
        let s = t
            .select(&[Key::Full, 1.into(), Slice::range(1, 3).into()])
            .unwrap()
            .into_tensor();
        assert_eq!(s.shape(), &[2, 2]);
        assert_eq!(s.to_vec(), vec![5, 6, 17, 18]);
    }

    #[test]
    fn test_select_scalar() {
        let t = arange(6, &[2, 3]);
        let v = t.select(&[(-1).into(), 0.into()]).unwrap();
        assert_eq!(v.as_scalar(), Some(3));
    }

    #[test]
    fn test_select_out_of_range_integer() {
        let t = arange(6, &[2, 3]);
        assert!(matches!(
            t.select(&[5.into()]),
            Err(TensorError::IndexOutOfBounds { axis: 0, index: 5, size: 2 })
        ));
    }

    #[test]
    fn test_slice_aliases_original() {
        let t = arange(6, &[2, 3]);
        let row = t.slice(&[1.into()]).unwrap();
        row.set(&[0], 100).unwrap();
        assert_eq!(t.get(&[1, 0]).unwrap(), 100);

        let elem = t.slice(&[0.into(), 2.into()]).unwrap();
        assert_eq!(elem.rank(), 0);
        elem.set(&[], -1).unwrap();
        assert_eq!(t.get(&[0, 2]).unwrap(), -1);
    }

    #[test]
    fn test_assign_scalar_fills_selection() {
        let t = arange(6, &[2, 3]);
        t.assign(&[Key::Full, Slice::from_start(1).into()], 0).unwrap();
        assert_eq!(t.to_vec(), vec![0, 0, 0, 3, 0, 0]);
    }

    #[test]
    fn test_assign_scalar_position() {
        let t = arange(4, &[4]);
        t.assign(&[2.into()], 9).unwrap();
        assert_eq!(t.to_vec(), vec![0, 1, 9, 3]);
    }

    #[test]
    fn test_assign_tensor_shape_mismatch_writes_nothing() {
        let t = arange(6, &[2, 3]);
        let wrong = arange(2, &[2]);
        let err = t.assign(&[0.into()], &wrong).unwrap_err();
        assert_eq!(
            err,
            TensorError::ShapeMismatch {
                expected: vec![3],
                got: vec![2]
            }
        );
        assert_eq!(t.to_vec(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_assign_overlapping_source() {
        // t[1:] = t[:-1] shifts right, like a copy
        let t = arange(5, &[5]);
        let src = t.slice(&[Slice::range(0, 4).into()]).unwrap();
        t.assign(&[Slice::from_start(1).into()], &src).unwrap();
        assert_eq!(t.to_vec(), vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_assign_zero_dim_tensor_into_element() {
        let t = arange(3, &[3]);
        t.assign(&[1.into()], Tensor::scalar(42)).unwrap();
        assert_eq!(t.to_vec(), vec![0, 42, 2]);
    }

    #[test]
    fn test_outer_iter() {
        let t = arange(6, &[3, 2]);
        let rows: Vec<Vec<i32>> = t.outer_iter().map(|v| v.into_tensor().to_vec()).collect();
        assert_eq!(rows, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);

        let flat = arange(3, &[3]);
        let items: Vec<Option<i32>> = flat.outer_iter().map(|v| v.as_scalar()).collect();
        assert_eq!(items, vec![Some(0), Some(1), Some(2)]);

        assert_eq!(Tensor::scalar(1).outer_iter().count(), 0);
    }

    #[test]
    fn test_outer_iter_over_reversed_view() {
        let t = arange(6, &[3, 2]);
        let rev = t.slice(&[Slice::new(2, None, -1).unwrap().into()]).unwrap();
        let firsts: Vec<i32> = rev
            .outer_iter()
            .map(|v| v.into_tensor().get(&[0]).unwrap())
            .collect();
        assert_eq!(firsts, vec![4, 2, 0]);
    }
}
