//! Index-tuple iteration
//!
//! [`IndexIter`] walks every index tuple of a shape in row-major order (last
//! axis fastest). A shape with no axes yields exactly one empty tuple; a shape
//! with a zero-sized axis yields nothing.
//!
//! ```
//! use einarray_core::IndexIter;
//!
//! let all: Vec<Vec<usize>> = IndexIter::new(&[2, 2]).collect();
//! assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
//!
//! assert_eq!(IndexIter::new(&[]).count(), 1);
//! assert_eq!(IndexIter::new(&[3, 0]).count(), 0);
//! ```

use crate::types::Shape;

/// Iterator over all index tuples of a shape.
#[derive(Debug, Clone)]
pub struct IndexIter {
    shape: Shape,
    current: Vec<usize>,
    done: bool,
}

impl IndexIter {
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: Shape::from_slice(shape),
            current: vec![0; shape.len()],
            done: shape.contains(&0),
        }
    }

    fn advance(&mut self) {
        for i in (0..self.current.len()).rev() {
            self.current[i] += 1;
            if self.current[i] < self.shape[i] {
                return;
            }
            self.current[i] = 0;
        }
        self.done = true;
    }

    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        let mut consumed = 0;
        let mut multiplier = 1;
        for i in (0..self.shape.len()).rev() {
            consumed += self.current[i] * multiplier;
            multiplier *= self.shape[i];
        }
        multiplier - consumed
    }
}

impl Iterator for IndexIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current.clone();
        self.advance();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for IndexIter {}
