//! Common types and constants shared by every stage of the generator.
//!
//! This module provides:
//! 1. **Constants:** Array geometry, word width, operand headroom, and output file names.
//! 2. **Error Handling:** The crate-wide [`VectorError`] and [`Result`] alias.

/// Target-format constants.
pub mod constants;

/// Error types.
pub mod error;

pub use constants::{ACCUMULATOR_WIDTH_BITS, PROGRAM_TERMINATOR, SYSTOLIC_WIDTH};
pub use error::{Result, VectorError};
