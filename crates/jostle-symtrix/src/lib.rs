#![forbid(unsafe_code)]

//! Compact storage for a symmetric relation without a diagonal.
//!
//! A [`SymMatrix`] of order `n` keeps one `f64` per unordered pair `{i, j}`, `i != j`, in a flat
//! buffer of `n * (n - 1) / 2` entries. Reading or writing `(i, j)` and `(j, i)` touches the same
//! cell, so symmetry holds by construction.

pub mod error;

pub use error::{Error, Result};

use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// Number of stored cells for a matrix of order `n`.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Physical offset of the unordered pair `{i, j}`.
///
/// Indices are 0-based. The larger index selects the row of the lower triangle, so the pair
/// `(i, j)` with `i > j` maps to `i * (i - 1) / 2 + j`. Callers must ensure `i != j`.
#[inline]
pub fn triangular_offset(i: usize, j: usize) -> usize {
    let (hi, lo) = if i > j { (i, j) } else { (j, i) };
    debug_assert!(hi != lo, "diagonal has no storage");
    hi * (hi - 1) / 2 + lo
}

/// Symmetric matrix of `f64` over `order` items, without a diagonal.
///
/// ```
/// use jostle_symtrix::SymMatrix;
///
/// let mut m = SymMatrix::new(3);
/// m.set(2, 0, 1.5);
/// assert_eq!(m.get(0, 2), 1.5);
/// assert_eq!(m.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SymMatrix {
    order: usize,
    data: Vec<f64>,
}

impl SymMatrix {
    /// Allocates a zero-filled matrix over `order` items.
    pub fn new(order: usize) -> Self {
        Self {
            order,
            data: vec![0.0; pair_count(order)],
        }
    }

    /// Builds a matrix of `order` items by evaluating `f(i, j)` for every pair with `i > j`.
    pub fn from_fn(order: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(pair_count(order));
        for i in 1..order {
            for j in 0..i {
                data.push(f(i, j));
            }
        }
        Self { order, data }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of stored cells (not `order * order`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn try_offset(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.order || j >= self.order {
            return Err(Error::OutOfRange {
                i,
                j,
                order: self.order,
            });
        }
        if i == j {
            return Err(Error::Diagonal { index: i });
        }
        Ok(triangular_offset(i, j))
    }

    /// Offset of `(i, j)` in the backing buffer.
    ///
    /// # Panics
    ///
    /// Panics when `i == j` or either index is not below [`order`](Self::order).
    pub fn offset(&self, i: usize, j: usize) -> usize {
        match self.try_offset(i, j) {
            Ok(offset) => offset,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_get(&self, i: usize, j: usize) -> Result<f64> {
        self.try_offset(i, j).map(|o| self.data[o])
    }

    pub fn try_set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        let o = self.try_offset(i, j)?;
        self.data[o] = value;
        Ok(())
    }

    /// Reads the value shared by `(i, j)` and `(j, i)`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`offset`](Self::offset).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    /// Writes `value` to both `(i, j)` and `(j, i)`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`offset`](Self::offset).
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let o = self.offset(i, j);
        self.data[o] = value;
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Iterates `(i, j, value)` with `i > j`, in storage order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (1..self.order)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .zip(self.data.iter().copied())
            .map(|((i, j), v)| (i, j, v))
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        let (&first, rest) = self.data.split_first()?;
        let mut min = first;
        let mut max = first;
        for &v in rest {
            if v > max {
                max = v;
            }
            if v < min {
                min = v;
            }
        }
        Some((min, max))
    }

    /// Rescales every cell to `(v - min) / (max - min)` and returns the `(min, max)` observed.
    ///
    /// A matrix whose cells are all equal has no spread; every cell becomes `0.0` instead of
    /// dividing by zero. An empty matrix is left untouched and yields `None`.
    pub fn normalize(&mut self) -> Option<(f64, f64)> {
        let (min, max) = self.min_max()?;
        let spread = max - min;
        if spread > 0.0 && spread.is_finite() {
            for v in &mut self.data {
                *v = (*v - min) / spread;
            }
        } else {
            self.data.fill(0.0);
        }
        Some((min, max))
    }

    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            order: self.order,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combines two matrices cell by cell into a new one.
    pub fn zip_with(&self, other: &Self, mut f: impl FnMut(f64, f64) -> f64) -> Result<Self> {
        if self.order != other.order {
            return Err(Error::OrderMismatch {
                left: self.order,
                right: other.order,
            });
        }
        Ok(Self {
            order: self.order,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl Index<(usize, usize)> for SymMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[self.offset(i, j)]
    }
}

impl IndexMut<(usize, usize)> for SymMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        let o = self.offset(i, j);
        &mut self.data[o]
    }
}

macro_rules! elementwise_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&SymMatrix> for &SymMatrix {
            type Output = SymMatrix;

            fn $method(self, rhs: &SymMatrix) -> SymMatrix {
                match self.zip_with(rhs, |a, b| a $op b) {
                    Ok(m) => m,
                    Err(err) => panic!("{err}"),
                }
            }
        }

        impl $trait<SymMatrix> for SymMatrix {
            type Output = SymMatrix;

            fn $method(self, rhs: SymMatrix) -> SymMatrix {
                (&self).$method(&rhs)
            }
        }
    };
}

elementwise_op!(Add, add, +);
elementwise_op!(Sub, sub, -);
elementwise_op!(Mul, mul, *);
elementwise_op!(Div, div, /);

#[cfg(test)]
mod tests {
    use super::{pair_count, triangular_offset};

    #[test]
    fn pair_count_handles_trivial_orders() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(5), 10);
    }

    #[test]
    fn triangular_offset_matches_one_based_formula() {
        // (i' - 1)(i' - 2) / 2 + (j' - 1) with i' = i + 1, j' = j + 1.
        for i in 1..8usize {
            for j in 0..i {
                let (ib, jb) = (i + 1, j + 1);
                assert_eq!(triangular_offset(i, j), (ib - 1) * (ib - 2) / 2 + (jb - 1));
                assert_eq!(triangular_offset(j, i), triangular_offset(i, j));
            }
        }
    }
}
