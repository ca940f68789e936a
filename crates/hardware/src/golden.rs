//! Fixed-point golden model of the systolic array.
//!
//! Each output cell is a dot product over the array width:
//!
//! ```text
//! acc = Σ_k (A[r][k] * B[k][c]) >> frac_bits      k = 0..SYSTOLIC_WIDTH
//! ```
//!
//! The shift is arithmetic (floor division by `2^frac_bits`), applied to each product before
//! it is added. The accumulator is saturated either after every addition or once at the end,
//! depending on [`SaturationMode`].

use tracing::trace;

use crate::common::constants::SYSTOLIC_WIDTH;
use crate::common::error::{Result, VectorError};
use crate::fixed::{FixedPointFormat, SaturationMode, is_saturating, saturate};
use crate::matrix::{Matrix, Word};

/// Result of one block multiply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// The expected output matrix.
    pub matrix: Matrix,
    /// Number of times the accumulator was clamped.
    pub clamp_events: u64,
    /// Number of output cells in which at least one clamp occurred.
    pub saturated_cells: u64,
}

/// Bit-true model of the array's multiply-accumulate datapath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoldenModel {
    format: FixedPointFormat,
    mode: SaturationMode,
}

impl GoldenModel {
    /// Creates a model for the given word format and saturation discipline.
    pub const fn new(format: FixedPointFormat, mode: SaturationMode) -> Self {
        Self { format, mode }
    }

    /// Word format.
    pub const fn format(&self) -> FixedPointFormat {
        self.format
    }

    /// Saturation discipline.
    pub const fn mode(&self) -> SaturationMode {
        self.mode
    }

    /// Multiplies `a` (`rows × 4`) by `b` (`4 × cols`).
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ShapeMismatch`] if `a` does not have [`SYSTOLIC_WIDTH`] columns
    /// or `b` does not have [`SYSTOLIC_WIDTH`] rows.
    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Product> {
        if a.cols() != SYSTOLIC_WIDTH {
            return Err(VectorError::ShapeMismatch {
                what: "A columns",
                expected: SYSTOLIC_WIDTH,
                actual: a.cols(),
            });
        }
        if b.rows() != SYSTOLIC_WIDTH {
            return Err(VectorError::ShapeMismatch {
                what: "B rows",
                expected: SYSTOLIC_WIDTH,
                actual: b.rows(),
            });
        }

        let (rows, cols) = (a.rows(), b.cols());
        let mut data = Vec::with_capacity(rows * cols);
        let mut clamp_events = 0;
        let mut saturated_cells = 0;

        for r in 0..rows {
            let a_row = a.row(r);
            for c in 0..cols {
                let (value, clamps) = self.dot(a_row, b.column(c));
                if clamps > 0 {
                    trace!(r, c, clamps, "accumulator saturated");
                    saturated_cells += 1;
                }
                clamp_events += u64::from(clamps);
                data.push(value);
            }
        }

        Ok(Product {
            matrix: Matrix::from_row_major(rows, cols, data),
            clamp_events,
            saturated_cells,
        })
    }

    /// Computes one output cell, returning the saturated word and the number of clamps.
    pub fn dot(&self, a_row: &[Word], b_col: impl IntoIterator<Item = Word>) -> (Word, u32) {
        let shift = self.format.frac_bits();
        let mut acc: i64 = 0;
        let mut clamps = 0;

        for (&x, y) in a_row.iter().zip(b_col) {
            // Arithmetic shift on i64: floor, sign preserved.
            acc += (i64::from(x) * i64::from(y)) >> shift;
            if self.mode == SaturationMode::PerStep && is_saturating(acc, self.format) {
                clamps += 1;
                acc = saturate(acc, self.format);
            }
        }
        if is_saturating(acc, self.format) {
            clamps += 1;
        }
        (saturate(acc, self.format) as Word, clamps)
    }
}

/// Multiplies two operand blocks under `format` and `mode`, discarding saturation counts.
///
/// # Errors
///
/// See [`GoldenModel::multiply`].
///
/// # Examples
///
/// ```
/// use sysvec_core::fixed::{FixedPointFormat, SaturationMode};
/// use sysvec_core::golden::multiply;
/// use sysvec_core::matrix::Matrix;
///
/// let format = FixedPointFormat::new(0, true).unwrap();
/// let a = Matrix::from_rows(vec![vec![1, 2, 3, 4]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5], vec![6], vec![7], vec![8]]).unwrap();
/// let c = multiply(&a, &b, format, SaturationMode::PerStep).unwrap();
/// assert_eq!(c.as_row_major(), &[70]);
/// ```
pub fn multiply(
    a: &Matrix,
    b: &Matrix,
    format: FixedPointFormat,
    mode: SaturationMode,
) -> Result<Matrix> {
    GoldenModel::new(format, mode)
        .multiply(a, b)
        .map(|product| product.matrix)
}
