//! Configuration for a generation run.
//!
//! This module defines the run configuration and its defaults. It provides:
//! 1. **Defaults:** Block sizes, fractional width, seed, and output location.
//! 2. **Structure:** A flat, serde-deserializable [`Config`] with per-field defaults, so a
//!    JSON file only needs the keys it changes.
//! 3. **Validation:** Derivation of the [`FixedPointFormat`] and [`ValueRange`] with all
//!    configuration errors raised up front.
//!
//! Configuration is read from a JSON file or built with `Config::default()`; the CLI
//! overrides individual fields from its flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::error::{Result, VectorError};
use crate::fixed::{FixedPointFormat, SaturationMode, ValueRange};
use crate::payload::validate_sizes;

/// Default configuration constants.
mod defaults {
    use crate::common::constants;

    /// Block sizes generated when none are given.
    pub const SIZES: [usize; 3] = [4, 8, 16];

    /// Fractional bits (Q1.15).
    pub const FRAC_BITS: u32 = constants::DEFAULT_FRAC_BITS;

    /// PRNG seed.
    pub const SEED: u64 = constants::DEFAULT_SEED;

    /// Output directory, relative to the working directory.
    pub const OUTPUT_DIR: &str = "build";
}

/// Root configuration of a generation run.
///
/// # Examples
///
/// ```
/// use sysvec_core::config::Config;
/// use sysvec_core::fixed::SaturationMode;
///
/// let config = Config::default();
/// assert_eq!(config.sizes, vec![4, 8, 16]);
/// assert_eq!(config.frac_bits, 15);
/// assert_eq!(config.saturation, SaturationMode::PerStep);
///
/// let json = r#"{
///     "sizes": [8, 8],
///     "frac_bits": 8,
///     "signed": false,
///     "saturation": "final"
/// }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.sizes, vec![8, 8]);
/// assert!(!config.signed);
/// assert_eq!(config.saturation, SaturationMode::Final);
/// assert_eq!(config.seed, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Block sizes in program order; each a positive multiple of 4.
    #[serde(default = "Config::default_sizes")]
    pub sizes: Vec<usize>,

    /// Fractional bits of the fixed-point format.
    #[serde(default = "Config::default_frac_bits", alias = "frac_width")]
    pub frac_bits: u32,

    /// Operand bound `R`; derived from `frac_bits` when absent.
    #[serde(default)]
    pub value_range: Option<i64>,

    /// PRNG seed.
    #[serde(default = "Config::default_seed")]
    pub seed: u64,

    /// Signed (two's-complement) words when true, unsigned otherwise.
    #[serde(default = "Config::default_signed")]
    pub signed: bool,

    /// Accumulator saturation discipline.
    #[serde(default)]
    pub saturation: SaturationMode,

    /// Write `vectors_meta.json` next to the memory images.
    #[serde(default = "Config::default_emit_metadata")]
    pub emit_metadata: bool,

    /// Directory receiving the output files; created if absent.
    #[serde(default = "Config::default_output_dir")]
    pub output_dir: PathBuf,
}

impl Config {
    /// Returns the default block sizes.
    fn default_sizes() -> Vec<usize> {
        defaults::SIZES.to_vec()
    }

    /// Returns the default fractional width.
    const fn default_frac_bits() -> u32 {
        defaults::FRAC_BITS
    }

    /// Returns the default seed.
    const fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Signed words unless asked otherwise.
    const fn default_signed() -> bool {
        true
    }

    /// Metadata is emitted unless disabled.
    const fn default_emit_metadata() -> bool {
        true
    }

    /// Returns the default output directory.
    fn default_output_dir() -> PathBuf {
        PathBuf::from(defaults::OUTPUT_DIR)
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidConfig`] if the text is not a valid configuration.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(VectorError::InvalidConfig)
    }

    /// Reads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Io`] if the file cannot be read and [`VectorError::Config`]
    /// if it does not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| VectorError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| VectorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Word format described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::FractionalBitsOutOfRange`] if `frac_bits` is 16 or more.
    pub fn format(&self) -> Result<FixedPointFormat> {
        FixedPointFormat::new(self.frac_bits, self.signed)
    }

    /// Operand range for `format`: the explicit bound if set, the derived one otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidValueRange`] for an explicit bound outside
    /// `1..=format.max_value()`.
    pub fn value_range(&self, format: FixedPointFormat) -> Result<ValueRange> {
        ValueRange::resolve(self.value_range, format)
    }

    /// Checks every field, returning the first configuration error.
    ///
    /// # Errors
    ///
    /// Returns an error for which [`VectorError::is_configuration`] holds.
    pub fn validate(&self) -> Result<()> {
        validate_sizes(&self.sizes)?;
        let format = self.format()?;
        let _range = self.value_range(format)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sizes: Self::default_sizes(),
            frac_bits: defaults::FRAC_BITS,
            value_range: None,
            seed: defaults::SEED,
            signed: true,
            saturation: SaturationMode::default(),
            emit_metadata: true,
            output_dir: Self::default_output_dir(),
        }
    }
}
