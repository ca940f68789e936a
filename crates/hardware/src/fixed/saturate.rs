//! Saturation policy.
//!
//! Out-of-range accumulator values are clamped to the nearest representable word. There is
//! no wraparound and no rounding: this is the behavior of the accelerator's saturating
//! accumulator register and must be reproduced exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::format::FixedPointFormat;
use crate::common::error::VectorError;

/// Clamps `value` into the representable range of `format`.
///
/// Signed 16-bit values clamp to `[-32768, 32767]`; unsigned ones to `[0, 65535]`.
/// In-range values are returned unchanged.
///
/// # Examples
///
/// ```
/// use sysvec_core::fixed::{FixedPointFormat, saturate};
///
/// let q15 = FixedPointFormat::new(15, true).unwrap();
/// assert_eq!(saturate(40_000, q15), 32767);
/// assert_eq!(saturate(-40_000, q15), -32768);
/// assert_eq!(saturate(-7, q15), -7);
/// ```
#[inline]
pub const fn saturate(value: i64, format: FixedPointFormat) -> i64 {
    let (lo, hi) = (format.min_value(), format.max_value());
    if value > hi {
        hi
    } else if value < lo {
        lo
    } else {
        value
    }
}

/// Returns `true` if [`saturate`] would change `value`.
#[inline]
pub const fn is_saturating(value: i64, format: FixedPointFormat) -> bool {
    value > format.max_value() || value < format.min_value()
}

/// When the accumulator is clamped during a dot product.
///
/// The two disciplines agree whenever no partial sum leaves the representable range; they
/// diverge when an intermediate sum overflows and a later term brings it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaturationMode {
    /// Clamp after every partial sum (saturating accumulator register).
    #[default]
    #[serde(alias = "PerStep", alias = "per_step")]
    PerStep,
    /// Accumulate at full precision and clamp once after the last term.
    #[serde(alias = "Final")]
    Final,
}

impl SaturationMode {
    /// Stable lowercase name, as accepted by [`FromStr`] and written to metadata.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerStep => "per-step",
            Self::Final => "final",
        }
    }
}

impl fmt::Display for SaturationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaturationMode {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-step" | "per_step" | "perstep" | "step" => Ok(Self::PerStep),
            "final" => Ok(Self::Final),
            _ => Err(VectorError::UnknownSaturationMode(s.to_string())),
        }
    }
}
