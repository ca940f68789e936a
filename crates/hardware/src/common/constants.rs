//! Target-Format Constants.
//!
//! This module defines the fixed parameters of the accelerator the vectors are generated for.
//! It includes:
//! 1. **Array Geometry:** The systolic width shared by every operand block.
//! 2. **Word Format:** The accumulator/output width in bits.
//! 3. **Operand Range:** Headroom and ceiling used when deriving the random value range.
//! 4. **Output Layout:** The instruction-stream terminator and the memory-image file names.

/// Width of the systolic array (inner dimension of every block multiply).
///
/// Block `A` operands are `size × SYSTOLIC_WIDTH` and `B` operands are
/// `SYSTOLIC_WIDTH × size`; every block size must be a multiple of this value.
pub const SYSTOLIC_WIDTH: usize = 4;

/// Width of a stored word and of the saturating accumulator, in bits.
pub const ACCUMULATOR_WIDTH_BITS: u32 = 16;

/// Real-valued operand limit used when the value range is derived from the fractional width.
///
/// Keeps four-term dot products of random operands mostly inside the representable range.
pub const VALUE_RANGE_HEADROOM: f64 = 5.6;

/// Upper clamp for a derived value range (largest signed 16-bit value).
pub const VALUE_RANGE_CEILING: i32 = 0x7FFF;

/// Instruction word that marks the end of the program.
pub const PROGRAM_TERMINATOR: usize = 0;

/// Default fractional width (Q1.15).
pub const DEFAULT_FRAC_BITS: u32 = 15;

/// Default PRNG seed.
pub const DEFAULT_SEED: u64 = 1;

/// Memory image holding the instruction stream.
pub const INSTRUCTIONS_FILE: &str = "instructions.mem";

/// Memory image holding the concatenated `A` operands.
pub const DATA_A_FILE: &str = "dataA.mem";

/// Memory image holding the concatenated `B` operands.
pub const DATA_B_FILE: &str = "dataB.mem";

/// Memory image holding the concatenated expected products.
pub const EXPECTED_FILE: &str = "expected.mem";

/// JSON document describing the block layout.
pub const METADATA_FILE: &str = "vectors_meta.json";
