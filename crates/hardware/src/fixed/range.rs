//! Operand value range.

use super::format::FixedPointFormat;
use crate::common::constants::{VALUE_RANGE_CEILING, VALUE_RANGE_HEADROOM};
use crate::common::error::{Result, VectorError};
use crate::matrix::Word;

/// Inclusive bound `R` for randomly generated operands.
///
/// Signed formats draw from `[-R, R]`, unsigned formats from `[0, R]`. `R` is always at
/// least 1 and never exceeds the format's largest word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    bound: Word,
}

impl ValueRange {
    /// Uses an explicitly supplied bound.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidValueRange`] if `bound` is below 1 or larger than the
    /// largest word of `format`.
    pub fn new(bound: i64, format: FixedPointFormat) -> Result<Self> {
        let max = format.max_value();
        if bound < 1 || bound > max {
            return Err(VectorError::InvalidValueRange { range: bound, max });
        }
        Ok(Self {
            bound: bound as Word,
        })
    }

    /// Derives the bound from the fractional width.
    ///
    /// `R = clamp(floor(5.6 * 2^frac_bits), 1, 0x7FFF)`, which keeps operands within
    /// roughly ±5.6 in real terms.
    ///
    /// # Examples
    ///
    /// ```
    /// use sysvec_core::fixed::{FixedPointFormat, ValueRange};
    ///
    /// let bound = |frac| ValueRange::derive(FixedPointFormat::new(frac, true).unwrap()).bound();
    /// assert_eq!(bound(0), 5);
    /// assert_eq!(bound(8), 1433);
    /// assert_eq!(bound(15), 0x7FFF);
    /// ```
    pub fn derive(format: FixedPointFormat) -> Self {
        let scale = f64::from(1u32 << format.frac_bits());
        // Positive, so truncation is floor.
        let raw = (VALUE_RANGE_HEADROOM * scale) as i64;
        Self {
            bound: raw.clamp(1, i64::from(VALUE_RANGE_CEILING)) as Word,
        }
    }

    /// Uses `bound` if given, otherwise derives one from `format`.
    ///
    /// # Errors
    ///
    /// Propagates [`ValueRange::new`] errors for an explicit bound.
    pub fn resolve(bound: Option<i64>, format: FixedPointFormat) -> Result<Self> {
        bound.map_or_else(|| Ok(Self::derive(format)), |r| Self::new(r, format))
    }

    /// The bound `R`.
    #[inline]
    pub const fn bound(&self) -> Word {
        self.bound
    }

    /// Inclusive `(low, high)` limits for operands of `format`.
    #[inline]
    pub const fn limits(&self, format: FixedPointFormat) -> (Word, Word) {
        if format.is_signed() {
            (-self.bound, self.bound)
        } else {
            (0, self.bound)
        }
    }
}
