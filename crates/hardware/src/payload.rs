//! Payload assembly.
//!
//! Turns an ordered list of block sizes into the four linear memory images the testbench
//! loads, plus the address book describing where each block lives. It performs:
//! 1. **Validation:** Every size must be a positive multiple of the systolic width. The
//!    whole list is checked before the first random draw, so an invalid list produces
//!    nothing.
//! 2. **Generation:** For each size, draws `A` (`size × 4`) then `B` (`4 × size`) and
//!    computes the expected product with the golden model.
//! 3. **Layout:** Appends the row-major blocks to the running images and records each
//!    block's base offsets (in words) before advancing them.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::common::constants::{PROGRAM_TERMINATOR, SYSTOLIC_WIDTH};
use crate::common::error::{Result, VectorError};
use crate::config::Config;
use crate::fixed::{FixedPointFormat, SaturationMode, ValueRange};
use crate::generator::MatrixGenerator;
use crate::golden::{GoldenModel, Product};
use crate::matrix::{Matrix, Word};
use crate::stats::GenerationStats;

/// One `(size × 4) · (4 × size)` multiply task and where its data lives.
///
/// Offsets are in words from the start of the respective memory image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstructionBlock {
    /// Block size; a positive multiple of the systolic width.
    pub size: usize,
    /// First word of this block in the `A` image.
    pub a_base: usize,
    /// First word of this block in the `B` image.
    pub b_base: usize,
    /// First word of this block's output region in device memory.
    pub o_base: usize,
    /// First word of this block in the expected-output image.
    pub expected_base: usize,
}

impl InstructionBlock {
    /// Words occupied by this block's `A` operand.
    pub const fn a_words(&self) -> usize {
        self.size * SYSTOLIC_WIDTH
    }

    /// Words occupied by this block's `B` operand.
    pub const fn b_words(&self) -> usize {
        self.size * SYSTOLIC_WIDTH
    }

    /// Words occupied by this block's output.
    pub const fn output_words(&self) -> usize {
        self.size * self.size
    }

    /// The block that would follow this one, with bases advanced past it.
    const fn next(&self, size: usize) -> Self {
        Self {
            size,
            a_base: self.a_base + self.a_words(),
            b_base: self.b_base + self.b_words(),
            o_base: self.o_base + self.output_words(),
            expected_base: self.expected_base + self.output_words(),
        }
    }
}

/// Block sizes in program order, terminated by [`PROGRAM_TERMINATOR`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstructionStream {
    words: Vec<usize>,
}

impl InstructionStream {
    /// Builds a terminated stream from block sizes.
    pub fn new(sizes: impl IntoIterator<Item = usize>) -> Self {
        let mut words: Vec<usize> = sizes.into_iter().collect();
        words.push(PROGRAM_TERMINATOR);
        Self { words }
    }

    /// All instruction words, including the terminator.
    pub fn words(&self) -> &[usize] {
        &self.words
    }

    /// Block sizes, without the terminator.
    pub fn sizes(&self) -> &[usize] {
        &self.words[..self.words.len() - 1]
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.words.len() - 1
    }
}

/// Format parameters and address book written alongside the memory images.
///
/// Serialized as `vectors_meta.json`; field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatMetadata {
    /// Fractional bits of the fixed-point format.
    pub frac_width: u32,
    /// Operand bound `R`.
    pub value_range: Word,
    /// Whether words are signed.
    pub signed: bool,
    /// Accumulator saturation discipline used for the expected outputs.
    pub saturation: SaturationMode,
    /// PRNG seed.
    pub seed: u64,
    /// Number of blocks (excluding the terminator).
    pub instruction_count: usize,
    /// Length of the `A` image.
    pub total_a_words: usize,
    /// Length of the `B` image.
    pub total_b_words: usize,
    /// Length of the expected-output image.
    pub total_expected_words: usize,
    /// Per-block addressing.
    pub instructions: Vec<InstructionBlock>,
}

impl FormatMetadata {
    /// Renders the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Json`] if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document previously produced by [`to_json_pretty`](Self::to_json_pretty).
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Json`] if the text is not a valid document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Everything one generation run produces.
#[derive(Debug, Clone)]
pub struct TestVectorBundle {
    instructions: InstructionStream,
    data_a: Vec<Word>,
    data_b: Vec<Word>,
    expected: Vec<Word>,
    metadata: FormatMetadata,
    stats: GenerationStats,
}

impl TestVectorBundle {
    /// The terminated instruction stream.
    pub const fn instructions(&self) -> &InstructionStream {
        &self.instructions
    }

    /// Concatenated `A` operands.
    pub fn data_a(&self) -> &[Word] {
        &self.data_a
    }

    /// Concatenated `B` operands.
    pub fn data_b(&self) -> &[Word] {
        &self.data_b
    }

    /// Concatenated expected products.
    pub fn expected(&self) -> &[Word] {
        &self.expected
    }

    /// Format parameters and address book.
    pub const fn metadata(&self) -> &FormatMetadata {
        &self.metadata
    }

    /// Run statistics.
    pub const fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// The block at `index`.
    pub fn block(&self, index: usize) -> Option<&InstructionBlock> {
        self.metadata.instructions.get(index)
    }

    /// Expected output of block `index`, row-major.
    pub fn expected_for(&self, index: usize) -> Option<&[Word]> {
        let block = self.block(index)?;
        self.expected
            .get(block.expected_base..block.expected_base + block.output_words())
    }
}

/// Operands and expected output of a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockVectors {
    /// Block size.
    pub size: usize,
    /// `size × 4` left operand.
    pub a: Matrix,
    /// `4 × size` right operand.
    pub b: Matrix,
    /// Golden-model product.
    pub product: Product,
}

/// Checks that `sizes` is non-empty and every entry is a positive multiple of the array width.
///
/// # Errors
///
/// Returns [`VectorError::EmptySizes`] or [`VectorError::InvalidSize`] naming the first
/// offending size.
pub fn validate_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.is_empty() {
        return Err(VectorError::EmptySizes);
    }
    match sizes
        .iter()
        .find(|&&size| size == 0 || size % SYSTOLIC_WIDTH != 0)
    {
        Some(&size) => Err(VectorError::InvalidSize {
            size,
            width: SYSTOLIC_WIDTH,
        }),
        None => Ok(()),
    }
}

/// Drives generation and the golden model over a list of block sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadAssembler {
    model: GoldenModel,
    range: ValueRange,
}

impl PayloadAssembler {
    /// Creates an assembler for one format, operand range, and saturation discipline.
    pub const fn new(format: FixedPointFormat, range: ValueRange, mode: SaturationMode) -> Self {
        Self {
            model: GoldenModel::new(format, mode),
            range,
        }
    }

    /// Word format.
    pub const fn format(&self) -> FixedPointFormat {
        self.model.format()
    }

    /// Operand range.
    pub const fn range(&self) -> ValueRange {
        self.range
    }

    /// Draws and multiplies the operands of one block.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidSize`] if `size` is not a positive multiple of the
    /// array width.
    pub fn build_block(&self, size: usize, generator: &mut MatrixGenerator) -> Result<BlockVectors> {
        validate_sizes(&[size])?;
        let format = self.format();
        let a = generator.generate(size, SYSTOLIC_WIDTH, self.range, format);
        let b = generator.generate(SYSTOLIC_WIDTH, size, self.range, format);
        let product = self.model.multiply(&a, &b)?;
        Ok(BlockVectors { size, a, b, product })
    }

    /// Assembles the full bundle for `sizes`, drawing from `generator` in order.
    ///
    /// # Errors
    ///
    /// Fails before drawing anything if [`validate_sizes`] rejects the list.
    pub fn assemble(
        &self,
        sizes: &[usize],
        generator: &mut MatrixGenerator,
    ) -> Result<TestVectorBundle> {
        validate_sizes(sizes)?;

        let format = self.format();
        info!(
            blocks = sizes.len(),
            frac_bits = format.frac_bits(),
            signed = format.is_signed(),
            saturation = %self.model.mode(),
            value_range = self.range.bound(),
            seed = generator.seed(),
            "assembling test vectors"
        );

        let operand_words: usize = sizes.iter().map(|s| s * SYSTOLIC_WIDTH).sum();
        let output_words: usize = sizes.iter().map(|s| s * s).sum();
        let mut data_a = Vec::with_capacity(operand_words);
        let mut data_b = Vec::with_capacity(operand_words);
        let mut expected = Vec::with_capacity(output_words);
        let mut blocks = Vec::with_capacity(sizes.len());
        let mut stats = GenerationStats::default();

        let mut cursor = InstructionBlock {
            size: sizes[0],
            a_base: 0,
            b_base: 0,
            o_base: 0,
            expected_base: 0,
        };

        for (index, &size) in sizes.iter().enumerate() {
            if index > 0 {
                cursor = cursor.next(size);
            }
            let block = self.build_block(size, generator)?;

            data_a.extend_from_slice(block.a.as_row_major());
            data_b.extend_from_slice(block.b.as_row_major());
            expected.extend_from_slice(block.product.matrix.as_row_major());

            stats.record_block(
                size,
                block.a.len(),
                block.b.len(),
                block.product.matrix.len(),
                block.product.clamp_events,
                block.product.saturated_cells,
            );
            debug!(
                index,
                size,
                a_base = cursor.a_base,
                b_base = cursor.b_base,
                o_base = cursor.o_base,
                expected_base = cursor.expected_base,
                saturated_cells = block.product.saturated_cells,
                "block assembled"
            );
            blocks.push(cursor);
        }

        let end = cursor.next(0);
        stats.finish();
        stats.log();

        let metadata = FormatMetadata {
            frac_width: format.frac_bits(),
            value_range: self.range.bound(),
            signed: format.is_signed(),
            saturation: self.model.mode(),
            seed: generator.seed(),
            instruction_count: sizes.len(),
            total_a_words: end.a_base,
            total_b_words: end.b_base,
            total_expected_words: end.expected_base,
            instructions: blocks,
        };

        Ok(TestVectorBundle {
            instructions: InstructionStream::new(sizes.iter().copied()),
            data_a,
            data_b,
            expected,
            metadata,
            stats,
        })
    }
}

/// Validates `config`, seeds a generator, and assembles its bundle.
///
/// # Errors
///
/// Returns the first configuration error found; see [`Config::validate`].
///
/// # Examples
///
/// ```
/// use sysvec_core::config::Config;
/// use sysvec_core::payload::build_bundle;
///
/// let config = Config {
///     sizes: vec![4, 8],
///     ..Config::default()
/// };
/// let bundle = build_bundle(&config).unwrap();
/// assert_eq!(bundle.instructions().words(), &[4, 8, 0]);
/// assert_eq!(bundle.metadata().total_a_words, 48);
/// ```
pub fn build_bundle(config: &Config) -> Result<TestVectorBundle> {
    config.validate()?;
    let format = config.format()?;
    let range = config.value_range(format)?;
    let mut generator = MatrixGenerator::new(config.seed);
    PayloadAssembler::new(format, range, config.saturation).assemble(&config.sizes, &mut generator)
}
