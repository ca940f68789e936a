//! Golden-model test-vector generator for a 4-wide systolic matrix-multiply array.
//!
//! This crate produces deterministic fixed-point stimulus and expected results for
//! verifying the array's RTL against a bit-true software model:
//! 1. **Fixed Point:** 16-bit word format, saturation policy, and operand range.
//! 2. **Generation:** Seeded random operand matrices drawn in a fixed order.
//! 3. **Golden Model:** Shift-then-accumulate dot products with per-step or final saturation.
//! 4. **Assembly:** Block layout into instruction, `A`, `B`, and expected memory images plus
//!    an address book.
//! 5. **Output:** `.mem` text images and a JSON metadata document, written all-or-nothing.

/// Common constants and error types.
pub mod common;
/// Run configuration (defaults, JSON loading, validation).
pub mod config;
/// Fixed-point format, saturation, and operand range.
pub mod fixed;
/// Seeded matrix generator.
pub mod generator;
/// Bit-true multiply-accumulate model.
pub mod golden;
/// Memory-image rendering and bundle output.
pub mod image;
/// Dense integer matrix.
pub mod matrix;
/// Block assembly and address book.
pub mod payload;
/// Generation statistics.
pub mod stats;

/// Crate-wide error and result types.
pub use crate::common::{Result, VectorError};
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Word format and saturation discipline.
pub use crate::fixed::{FixedPointFormat, SaturationMode, ValueRange};
/// Assembly entry points.
pub use crate::payload::{PayloadAssembler, TestVectorBundle, build_bundle};
