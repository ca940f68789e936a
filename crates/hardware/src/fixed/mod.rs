//! Fixed-point arithmetic rules of the accelerator.
//!
//! This module captures the bit-true behavior the golden model must reproduce:
//! 1. **Format:** Word width, fractional width, and signedness ([`FixedPointFormat`]).
//! 2. **Saturation:** Clamping of accumulator values and the per-step/final discipline.
//! 3. **Operand Range:** The inclusive bound for randomly generated operands ([`ValueRange`]).

/// Word format (width, fractional bits, signedness).
pub mod format;

/// Operand value range.
pub mod range;

/// Saturation policy and accumulation discipline.
pub mod saturate;

pub use format::FixedPointFormat;
pub use range::ValueRange;
pub use saturate::{SaturationMode, is_saturating, saturate};
