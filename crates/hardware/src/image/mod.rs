//! Memory images and bundle output.
//!
//! This module turns an assembled bundle into files the testbench can load:
//! 1. **Text Images:** One decimal word per line (`$readmemd`-style `.mem` files).
//! 2. **Bundle Writer:** Renders every file in memory, then stages and persists them into
//!    the output directory so a failed run never leaves partial images behind.

/// `.mem` text rendering and parsing.
pub mod mem;

/// Output-directory writer.
pub mod writer;

pub use mem::{parse_mem, render_mem};
pub use writer::{RenderedFile, WrittenFiles, render_bundle, write_bundle};
