//! Seeded random operand generation.
//!
//! The generator owns the only PRNG in the crate. Callers thread it through by `&mut`, so
//! the sequence of draws is fixed by program order: the first block's `A` is drawn, then
//! its `B`, then the next block's `A`, and so on. Within a matrix, draws run row by row,
//! column by column. Reordering any of this changes every later value.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::fixed::{FixedPointFormat, ValueRange};
use crate::matrix::{Matrix, Word};

/// Deterministic matrix generator.
///
/// # Examples
///
/// ```
/// use sysvec_core::fixed::{FixedPointFormat, ValueRange};
/// use sysvec_core::generator::MatrixGenerator;
///
/// let format = FixedPointFormat::new(8, true).unwrap();
/// let range = ValueRange::derive(format);
///
/// let mut a = MatrixGenerator::new(7);
/// let mut b = MatrixGenerator::new(7);
/// assert_eq!(a.generate(2, 4, range, format), b.generate(2, 4, range, format));
/// ```
#[derive(Debug, Clone)]
pub struct MatrixGenerator {
    seed: u64,
    rng: StdRng,
    draws: u64,
}

impl MatrixGenerator {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Seed this generator was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far.
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Draws a `rows × cols` matrix uniformly from the operand range of `format`.
    pub fn generate(
        &mut self,
        rows: usize,
        cols: usize,
        range: ValueRange,
        format: FixedPointFormat,
    ) -> Matrix {
        let (lo, hi) = range.limits(format);
        let mut data: Vec<Word> = Vec::with_capacity(rows * cols);
        for _ in 0..rows {
            for _ in 0..cols {
                data.push(self.rng.random_range(lo..=hi));
            }
        }
        self.draws += (rows * cols) as u64;
        Matrix::from_row_major(rows, cols, data)
    }
}
