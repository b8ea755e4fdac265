//! Tensor type definition and basic accessors
//!
//! A [`Tensor`] is a [`View`] over a reference-counted, lock-protected flat
//! buffer. Cloning a tensor clones the handle, not the data; use
//! [`Tensor::contiguous`] for an independent copy.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{TensorError, TensorResult};
use crate::view::View;

/// Flat element storage shared by every tensor derived from it.
pub(crate) struct Buffer<T>(Arc<RwLock<Vec<T>>>);

impl<T> Buffer<T> {
    pub(crate) fn new(data: Vec<T>) -> Self {
        Buffer(Arc::new(RwLock::new(data)))
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.read().len()
    }
}

impl<T: Copy> Buffer<T> {
    pub(crate) fn read(&self, pos: usize) -> T {
        self.0.read()[pos]
    }

    pub(crate) fn write(&self, pos: usize, value: T) {
        self.0.write()[pos] = value;
    }

    /// Copy out every element of `view`, in row-major logical order.
    pub(crate) fn gather(&self, view: &View) -> Vec<T> {
        let data = self.0.read();
        view.positions().map(|p| data[p]).collect()
    }

    /// Write `values` into the positions of `view`, in row-major logical order.
    pub(crate) fn scatter(&self, view: &View, values: &[T]) {
        let mut data = self.0.write();
        for (p, &v) in view.positions().zip(values.iter()) {
            data[p] = v;
        }
    }

    pub(crate) fn fill(&self, view: &View, value: T) {
        let mut data = self.0.write();
        for p in view.positions() {
            data[p] = value;
        }
    }
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Buffer(Arc::clone(&self.0))
    }
}

/// N-dimensional tensor: a strided view over a shared flat buffer.
///
/// # Type Parameters
///
/// * `T` - The element type (any `Copy` numeric type; most operations need
///   `num_traits::Num`)
///
/// # Examples
///
/// ```
/// use einarray_core::Tensor;
///
/// let t = Tensor::<i64>::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3])?;
/// assert_eq!(t.shape(), &[2, 3]);
/// assert_eq!(t.rank(), 2);
/// assert_eq!(t.len(), 6);
/// assert_eq!(t.get(&[1, 0])?, 4);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Tensor<T> {
    pub(crate) buffer: Buffer<T>,
    pub(crate) view: View,
}

impl<T> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            view: self.view.clone(),
        }
    }
}

impl<T> Tensor<T> {
    pub(crate) fn from_parts(buffer: Buffer<T>, view: View) -> Self {
        Self { buffer, view }
    }

    /// Wrap a flat row-major vector with the given shape.
    ///
    /// Fails with [`TensorError::DataLength`] when `data.len()` differs from
    /// the product of `shape`.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> TensorResult<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(TensorError::DataLength {
                shape: shape.to_vec(),
                expected,
                got: data.len(),
            });
        }
        Ok(Self::from_parts(Buffer::new(data), View::contiguous(shape)))
    }

    /// A 0-dimensional tensor holding one element.
    pub fn scalar(value: T) -> Self {
        Self::from_parts(Buffer::new(vec![value]), View::contiguous(&[]))
    }

    pub fn shape(&self) -> &[usize] {
        self.view.shape()
    }

    pub fn rank(&self) -> usize {
        self.view.rank()
    }

    /// Number of logical elements (1 for a 0-dimensional tensor).
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// The addressing scheme of this tensor over its buffer.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// True when both tensors read and write the same buffer.
    pub fn shares_buffer(&self, other: &Tensor<T>) -> bool {
        self.buffer.ptr_eq(&other.buffer)
    }

    /// Number of elements in the backing buffer, which can exceed [`Tensor::len`]
    /// for slices and fall short of it for broadcast views.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_contiguous(&self) -> bool {
        self.view.is_contiguous() && self.view.offset() == 0
    }
}

impl<T: Copy> Tensor<T> {
    /// Elements in row-major logical order.
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer.gather(&self.view)
    }

    /// Copy into a fresh buffer with row-major strides.
    ///
    /// The result shares nothing with `self`.
    pub fn contiguous(&self) -> Self {
        Self::from_parts(Buffer::new(self.to_vec()), View::contiguous(self.shape()))
    }
}

impl<T: Copy + PartialEq> PartialEq for Tensor<T> {
    /// Tensors are equal when their shapes and logical elements are equal,
    /// regardless of layout or buffer sharing.
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.to_vec() == other.to_vec()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor(shape={:?}, data=", self.shape())?;
        fmt::Display::fmt(self, f)?;
        write!(f, ")")
    }
}

impl<T: Copy + fmt::Debug> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_nested(), f)
    }
}
