//! Tensor creation and initialization methods
//!
//! Every constructor allocates a fresh buffer sized to the full shape up front.

use num_traits::{Num, NumCast};
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use super::types::{Buffer, Tensor};
use crate::error::{TensorError, TensorResult};
use crate::iter::IndexIter;
use crate::view::View;

impl<T: Copy> Tensor<T> {
    /// Create a tensor filled with a specific value
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_core::Tensor;
    ///
    /// let t = Tensor::full(&[2, 3], 5.0);
    /// assert_eq!(t.get(&[1, 2])?, 5.0);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn full(shape: &[usize], value: T) -> Self {
        let total: usize = shape.iter().product();
        Self::from_parts(Buffer::new(vec![value; total]), View::contiguous(shape))
    }

    /// Build a tensor by calling `f` with every index tuple in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_core::Tensor;
    ///
    /// let t = Tensor::from_fn(&[2, 3], |idx| (10 * idx[0] + idx[1]) as i32);
    /// assert_eq!(t.to_vec(), vec![0, 1, 2, 10, 11, 12]);
    /// ```
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let data: Vec<T> = IndexIter::new(shape).map(|idx| f(&idx)).collect();
        Self::from_parts(Buffer::new(data), View::contiguous(shape))
    }
}

impl<T: Copy + Num> Tensor<T> {
    /// Create a tensor filled with zeros
    ///
    /// ```
    /// use einarray_core::Tensor;
    ///
    /// let t = Tensor::<f32>::zeros(&[2, 2]);
    /// assert_eq!(t.to_vec(), vec![0.0; 4]);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, T::zero())
    }

    /// Create a tensor filled with ones
    pub fn ones(shape: &[usize]) -> Self {
        Self::full(shape, T::one())
    }

    /// Create an identity matrix (2D tensor with ones on the diagonal)
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_core::Tensor;
    ///
    /// let identity = Tensor::<f64>::eye(3);
    /// assert_eq!(identity.shape(), &[3, 3]);
    /// assert_eq!(identity.get(&[1, 1])?, 1.0);
    /// assert_eq!(identity.get(&[0, 1])?, 0.0);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn eye(n: usize) -> Self {
        Self::from_fn(&[n, n], |idx| if idx[0] == idx[1] { T::one() } else { T::zero() })
    }
}

impl<T: Copy + NumCast> Tensor<T> {
    /// Coordinate grid: a tensor of shape `shape ++ [shape.len()]` whose entry
    /// at `[i0, .., ik, j]` is `ij`.
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_core::Tensor;
    ///
    /// let grid = Tensor::<i64>::indices(&[2, 3])?;
    /// assert_eq!(grid.shape(), &[2, 3, 2]);
    /// assert_eq!(grid.get(&[1, 2, 0])?, 1);
    /// assert_eq!(grid.get(&[1, 2, 1])?, 2);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn indices(shape: &[usize]) -> TensorResult<Self> {
        let rank = shape.len();
        let mut full_shape = shape.to_vec();
        full_shape.push(rank);

        let mut data = Vec::with_capacity(full_shape.iter().product());
        for idx in IndexIter::new(shape) {
            for &i in &idx {
                data.push(cast(i as f64)?);
            }
        }
        Self::from_vec(data, &full_shape)
    }

    /// Create a tensor with random values from a uniform distribution over
    /// `[low, high)`, using the thread-local generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use einarray_core::Tensor;
    ///
    /// let t = Tensor::<f64>::random_uniform(&[2, 3], 0.0, 1.0)?;
    /// assert_eq!(t.shape(), &[2, 3]);
    /// assert!(t.to_vec().iter().all(|&x| (0.0..1.0).contains(&x)));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn random_uniform(shape: &[usize], low: f64, high: f64) -> TensorResult<Self> {
        Self::random_uniform_with_rng(shape, low, high, &mut rand::thread_rng())
    }

    /// [`Tensor::random_uniform`] drawing from a caller-supplied generator.
    pub fn random_uniform_with_rng<R>(
        shape: &[usize],
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> TensorResult<Self>
    where
        R: Rng + ?Sized,
    {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(TensorError::InvalidDistribution {
                reason: format!("uniform bounds must be finite with low < high, got [{low}, {high})"),
            });
        }
        Self::sample(shape, Uniform::new(low, high), rng)
    }

    /// Create a tensor with random values from a normal distribution, using the
    /// thread-local generator.
    pub fn random_normal(shape: &[usize], mean: f64, std: f64) -> TensorResult<Self> {
        Self::random_normal_with_rng(shape, mean, std, &mut rand::thread_rng())
    }

    /// [`Tensor::random_normal`] drawing from a caller-supplied generator.
    ///
    /// ```
    /// use einarray_core::Tensor;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let a = Tensor::<f64>::random_normal_with_rng(&[4], 0.0, 1.0, &mut StdRng::seed_from_u64(7))?;
    /// let b = Tensor::<f64>::random_normal_with_rng(&[4], 0.0, 1.0, &mut StdRng::seed_from_u64(7))?;
    /// assert_eq!(a, b);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn random_normal_with_rng<R>(
        shape: &[usize],
        mean: f64,
        std: f64,
        rng: &mut R,
    ) -> TensorResult<Self>
    where
        R: Rng + ?Sized,
    {
        let normal = Normal::new(mean, std).map_err(|e| TensorError::InvalidDistribution {
            reason: e.to_string(),
        })?;
        Self::sample(shape, normal, rng)
    }

    fn sample<D, R>(shape: &[usize], dist: D, rng: &mut R) -> TensorResult<Self>
    where
        D: Distribution<f64>,
        R: Rng + ?Sized,
    {
        let total: usize = shape.iter().product();
        let data = (0..total)
            .map(|_| cast(dist.sample(rng)))
            .collect::<TensorResult<Vec<T>>>()?;
        Self::from_vec(data, shape)
    }
}

fn cast<T: NumCast>(value: f64) -> TensorResult<T> {
    <T as NumCast>::from(value).ok_or(TensorError::NumericCast { value })
}
