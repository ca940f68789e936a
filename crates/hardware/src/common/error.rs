//! Error definitions.
//!
//! Every fallible operation in the crate returns [`VectorError`]. Failures fall into two
//! families:
//! 1. **Configuration:** Invalid sizes, formats, value ranges, or operand shapes. These are
//!    detected before any file is written.
//! 2. **I/O and encoding:** Reading a configuration file, writing memory images, or
//!    encoding JSON. The underlying error is carried verbatim.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring, assembling, or writing a test-vector bundle.
#[derive(Debug, Error)]
pub enum VectorError {
    /// A block size is zero or not a multiple of the systolic width.
    #[error("size {size} is not supported (must be a positive multiple of {width})")]
    InvalidSize {
        /// The offending size.
        size: usize,
        /// Required divisor (the systolic width).
        width: usize,
    },

    /// No block sizes were requested.
    #[error("no block sizes given")]
    EmptySizes,

    /// The fractional width does not leave room for an integer bit.
    #[error("fractional bits {frac_bits} must be less than the word width {width_bits}")]
    FractionalBitsOutOfRange {
        /// Requested fractional bits.
        frac_bits: u32,
        /// Word width of the format.
        width_bits: u32,
    },

    /// A directly supplied value range is zero, negative, or not representable.
    #[error("value range {range} is out of bounds (must be in 1..={max})")]
    InvalidValueRange {
        /// Requested bound.
        range: i64,
        /// Largest accepted bound for the format.
        max: i64,
    },

    /// Operand matrices do not have the shape the systolic array requires.
    #[error("shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Which dimension was checked.
        what: &'static str,
        /// Required extent.
        expected: usize,
        /// Observed extent.
        actual: usize,
    },

    /// A saturation mode name could not be parsed.
    #[error("unknown saturation mode '{0}' (expected 'per-step' or 'final')")]
    UnknownSaturationMode(String),

    /// A memory-image line is not a decimal integer.
    #[error("line {line}: '{text}' is not a decimal word")]
    MalformedImage {
        /// One-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    /// JSON encoding or decoding of a metadata document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VectorError {
    /// Returns `true` for errors caused by an invalid run configuration.
    ///
    /// These are raised before any generation or file output takes place.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidSize { .. }
                | Self::EmptySizes
                | Self::FractionalBitsOutOfRange { .. }
                | Self::InvalidValueRange { .. }
                | Self::ShapeMismatch { .. }
                | Self::UnknownSaturationMode(_)
                | Self::Config { .. }
                | Self::InvalidConfig(_)
        )
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T, E = VectorError> = std::result::Result<T, E>;
