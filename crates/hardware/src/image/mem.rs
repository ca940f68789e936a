//! Text memory images.
//!
//! Each value occupies one line, written in base 10 with no padding, no separators, and no
//! header. Negative values carry a leading `-`. Every line, including the last, ends in `\n`.

use std::fmt::Display;

use crate::common::error::{Result, VectorError};

/// Renders `values` as a memory image.
///
/// # Examples
///
/// ```
/// use sysvec_core::image::render_mem;
///
/// assert_eq!(render_mem(&[4, -17, 0]), "4\n-17\n0\n");
/// assert_eq!(render_mem::<i32>(&[]), "");
/// ```
pub fn render_mem<T: Display>(values: &[T]) -> String {
    let mut out = String::with_capacity(values.len() * 7);
    for value in values {
        out.push_str(&value.to_string());
        out.push('\n');
    }
    out
}

/// Parses a memory image back into words.
///
/// Blank lines are skipped; surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`VectorError::MalformedImage`] for the first line that is not a decimal integer.
pub fn parse_mem(text: &str) -> Result<Vec<i64>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let line = line.trim();
            line.parse::<i64>().map_err(|_| VectorError::MalformedImage {
                line: index + 1,
                text: line.to_string(),
            })
        })
        .collect()
}
