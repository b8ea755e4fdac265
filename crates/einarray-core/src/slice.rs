//! Slice values and indexing keys
//!
//! A [`Slice`] is the `start:stop:step` part of Python-style indexing. A [`Key`]
//! is one entry of an indexing key: an integer (collapses the axis), a slice
//! (keeps the axis), or [`Key::Full`] (takes the whole axis). Keys shorter than
//! the tensor rank are padded with [`Key::Full`].
//!
//! # Resolution rules
//!
//! For an axis of size `n`:
//!
//! - a negative `start` counts from the end (`n + start`);
//! - with `step > 0`, a missing `stop` means `n`, otherwise `stop` is capped at `n`;
//! - with `step < 0`, a missing `stop` means `-1` (one before the first element),
//!   otherwise `stop` is raised to at least `-1`;
//! - the resulting length is `floor((stop - start) / step)`, never negative.
//!
//! # Examples
//!
//! ```
//! use einarray_core::Slice;
//!
//! let s = Slice::new(2, Some(8), 2)?;
//! let r = s.resolve(10);
//! assert_eq!((r.start, r.len, r.step), (2, 3, 2));
//!
//! // Negative start counts from the end
//! let r = Slice::from(-3..).resolve(5);
//! assert_eq!((r.start, r.len), (2, 3));
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{TensorError, TensorResult};

/// A `start:stop:step` range with NumPy-like defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSlice"))]
pub struct Slice {
    start: isize,
    stop: Option<isize>,
    step: isize,
}

/// Wire form of [`Slice`]; deserialized values go back through [`Slice::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSlice {
    start: isize,
    stop: Option<isize>,
    step: isize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSlice> for Slice {
    type Error = TensorError;

    fn try_from(raw: RawSlice) -> TensorResult<Self> {
        Slice::new(raw.start, raw.stop, raw.step)
    }
}

/// A slice resolved against a concrete axis size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlice {
    /// First position along the axis
    pub start: isize,
    /// Number of selected positions
    pub len: usize,
    /// Distance between consecutive positions
    pub step: isize,
}

impl Slice {
    /// Create a slice. Fails when `step` is zero.
    pub fn new(start: isize, stop: Option<isize>, step: isize) -> TensorResult<Self> {
        if step == 0 {
            return Err(TensorError::InvalidSlice {
                reason: "slice step cannot be zero".into(),
            });
        }
        Ok(Self { start, stop, step })
    }

    /// The whole axis, `[:]`.
    pub const fn full() -> Self {
        Self {
            start: 0,
            stop: None,
            step: 1,
        }
    }

    /// `[start:stop]` with unit step.
    pub const fn range(start: isize, stop: isize) -> Self {
        Self {
            start,
            stop: Some(stop),
            step: 1,
        }
    }

    /// `[start:]` with unit step.
    pub const fn from_start(start: isize) -> Self {
        Self {
            start,
            stop: None,
            step: 1,
        }
    }

    /// Build a slice from the 1–3 element list form `[stop]`, `[start, stop]`
    /// or `[start, stop, step]`, where `None` leaves an entry at its default.
    ///
    /// ```
    /// use einarray_core::Slice;
    ///
    /// assert_eq!(Slice::from_parts(&[Some(4)])?, Slice::range(0, 4));
    /// assert_eq!(Slice::from_parts(&[Some(-3), None, Some(1)])?, Slice::from_start(-3));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_parts(parts: &[Option<isize>]) -> TensorResult<Self> {
        match *parts {
            [] => Ok(Self::full()),
            [stop] => Self::new(0, stop, 1),
            [start, stop] => Self::new(start.unwrap_or(0), stop, 1),
            [start, stop, step] => Self::new(start.unwrap_or(0), stop, step.unwrap_or(1)),
            _ => Err(TensorError::InvalidSlice {
                reason: format!("expected at most 3 slice parts, got {}", parts.len()),
            }),
        }
    }

    /// Replace the step. Fails when `step` is zero.
    pub fn with_step(self, step: isize) -> TensorResult<Self> {
        Self::new(self.start, self.stop, step)
    }

    pub fn start(&self) -> isize {
        self.start
    }

    pub fn stop(&self) -> Option<isize> {
        self.stop
    }

    pub fn step(&self) -> isize {
        self.step
    }

    /// Resolve against an axis of `size` elements.
    ///
    /// A start that still lies outside the axis after negative resolution is
    /// clamped (`[0, size]` for positive steps, `[-1, size - 1]` for negative
    /// ones), so the selected positions always lie inside the axis. The stop
    /// is clamped to `[-1, size]` either way.
    pub fn resolve(&self, size: usize) -> ResolvedSlice {
        let n = size as isize;
        let start = if self.start < 0 {
            n + self.start
        } else {
            self.start
        };
        let (start, stop) = if self.step > 0 {
            let stop = self.stop.map_or(n, |s| s.clamp(-1, n));
            (start.clamp(0, n), stop)
        } else {
            let stop = self.stop.map_or(-1, |s| s.clamp(-1, n));
            (start.clamp(-1, n - 1), stop)
        };
        let len = floor_div(stop - start, self.step).max(0) as usize;
        ResolvedSlice {
            start,
            len,
            step: self.step,
        }
    }
}

impl Default for Slice {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.start)?;
        if let Some(stop) = self.stop {
            write!(f, "{}", stop)?;
        }
        if self.step != 1 {
            write!(f, ":{}", self.step)?;
        }
        Ok(())
    }
}

impl From<Range<isize>> for Slice {
    fn from(r: Range<isize>) -> Self {
        Slice::range(r.start, r.end)
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(r: RangeFrom<isize>) -> Self {
        Slice::from_start(r.start)
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(r: RangeTo<isize>) -> Self {
        Slice::range(0, r.end)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::full()
    }
}

/// Floor division; `step` is never zero here.
fn floor_div(a: isize, b: isize) -> isize {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// One entry of an indexing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Key {
    /// Select one position; the axis disappears from the result.
    Index(isize),
    /// Select a strided range; the axis is kept.
    Slice(Slice),
    /// Take the whole axis.
    #[default]
    Full,
}

impl Key {
    /// Resolve an integer key against an axis, counting negatives from the end.
    pub(crate) fn resolve_index(index: isize, axis: usize, size: usize) -> TensorResult<usize> {
        let resolved = if index < 0 {
            size as isize + index
        } else {
            index
        };
        if resolved < 0 || resolved >= size as isize {
            return Err(TensorError::IndexOutOfBounds { axis, index, size });
        }
        Ok(resolved as usize)
    }
}

impl From<Slice> for Key {
    fn from(s: Slice) -> Self {
        Key::Slice(s)
    }
}

macro_rules! impl_index_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(i: $t) -> Self {
                    Key::Index(i as isize)
                }
            }
        )*
    };
}

impl_index_key!(isize, i32, i64, usize);

macro_rules! impl_range_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(r: $t) -> Self {
                    Key::Slice(Slice::from(r))
                }
            }
        )*
    };
}

impl_range_key!(Range<isize>, RangeFrom<isize>, RangeTo<isize>, RangeFull);
