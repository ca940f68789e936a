//! Fixed-point word format.

use crate::common::constants::ACCUMULATOR_WIDTH_BITS;
use crate::common::error::{Result, VectorError};

/// Fixed-point word format of the accelerator's operands and accumulator.
///
/// The word width is fixed at [`ACCUMULATOR_WIDTH_BITS`]; only the fractional width and
/// signedness vary. The fractional width is always strictly less than the word width.
///
/// # Examples
///
/// ```
/// use sysvec_core::fixed::FixedPointFormat;
///
/// let q15 = FixedPointFormat::new(15, true).unwrap();
/// assert_eq!(q15.min_value(), -32768);
/// assert_eq!(q15.max_value(), 32767);
///
/// let u8_8 = FixedPointFormat::new(8, false).unwrap();
/// assert_eq!(u8_8.max_value(), 65535);
///
/// assert!(FixedPointFormat::new(16, true).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPointFormat {
    frac_bits: u32,
    signed: bool,
}

impl FixedPointFormat {
    /// Word width in bits.
    pub const WIDTH_BITS: u32 = ACCUMULATOR_WIDTH_BITS;

    /// Creates a format, rejecting fractional widths that leave no integer bit.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::FractionalBitsOutOfRange`] if `frac_bits >= WIDTH_BITS`.
    pub fn new(frac_bits: u32, signed: bool) -> Result<Self> {
        if frac_bits >= Self::WIDTH_BITS {
            return Err(VectorError::FractionalBitsOutOfRange {
                frac_bits,
                width_bits: Self::WIDTH_BITS,
            });
        }
        Ok(Self { frac_bits, signed })
    }

    /// Number of fractional bits; products are shifted right by this amount.
    #[inline]
    pub const fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    /// Whether words are two's-complement signed.
    #[inline]
    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// Word width in bits.
    #[inline]
    pub const fn width_bits(&self) -> u32 {
        Self::WIDTH_BITS
    }

    /// Smallest representable word.
    #[inline]
    pub const fn min_value(&self) -> i64 {
        if self.signed {
            -(1 << (Self::WIDTH_BITS - 1))
        } else {
            0
        }
    }

    /// Largest representable word.
    #[inline]
    pub const fn max_value(&self) -> i64 {
        if self.signed {
            (1 << (Self::WIDTH_BITS - 1)) - 1
        } else {
            (1 << Self::WIDTH_BITS) - 1
        }
    }
}
