//! Dense row-major integer matrix.
//!
//! Matrices hold fixed-point words as plain integers. They are built once (by the generator,
//! the golden model, or from literal rows in tests) and never mutated afterwards.

use crate::common::error::{Result, VectorError};

/// A fixed-point word as stored in a memory image.
///
/// Every 16-bit word, signed or unsigned, fits without loss.
pub type Word = i32;

/// Immutable `rows × cols` matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Word>,
}

impl Matrix {
    /// Builds a matrix from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ShapeMismatch`] if the rows are ragged.
    ///
    /// # Examples
    ///
    /// ```
    /// use sysvec_core::matrix::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
    /// assert_eq!(m.shape(), (3, 2));
    /// assert_eq!(m.get(2, 1), 6);
    /// assert_eq!(m.as_row_major(), &[1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn from_rows(rows: Vec<Vec<Word>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for row in rows {
            if row.len() != cols {
                return Err(VectorError::ShapeMismatch {
                    what: "row length",
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols,
            data,
        })
    }

    /// Wraps an already flattened buffer.
    pub(crate) fn from_row_major(rows: usize, cols: usize, data: Vec<Word>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Number of rows.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Element at `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Word {
        assert!(r < self.rows && c < self.cols, "index ({r}, {c}) out of bounds");
        self.data[r * self.cols + c]
    }

    /// Row `r` as a slice.
    #[inline]
    pub fn row(&self, r: usize) -> &[Word] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Iterates over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Word]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Column `c`, top to bottom.
    pub fn column(&self, c: usize) -> impl Iterator<Item = Word> + '_ {
        (0..self.rows).map(move |r| self.data[r * self.cols + c])
    }

    /// All elements, row-major.
    #[inline]
    pub fn as_row_major(&self) -> &[Word] {
        &self.data
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
