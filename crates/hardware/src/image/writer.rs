//! Bundle writer.
//!
//! Every file is rendered before the directory is touched and staged in a temporary file
//! inside the output directory. Only once all of them are staged are they renamed into
//! place, so a rendering or staging failure leaves existing output untouched.
//!
//! The renames themselves are per-file. If one fails, the files renamed before it keep
//! their new contents and the rest keep their old ones; the error names the path that
//! failed. A successful run never leaves a metadata document from an earlier run behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::mem::render_mem;
use crate::common::constants::{
    DATA_A_FILE, DATA_B_FILE, EXPECTED_FILE, INSTRUCTIONS_FILE, METADATA_FILE,
};
use crate::common::error::{Result, VectorError};
use crate::payload::TestVectorBundle;

/// A file name and its full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// File name inside the output directory.
    pub name: &'static str,
    /// Text to write.
    pub contents: String,
}

/// Paths written by [`write_bundle`], in write order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WrittenFiles {
    /// Absolute or directory-relative paths of every persisted file.
    pub paths: Vec<PathBuf>,
}

impl WrittenFiles {
    /// Total number of files written.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Renders every output file of `bundle` in memory.
///
/// The four `.mem` images always come first, in the order instructions, `A`, `B`, expected;
/// the metadata document follows when `emit_metadata` is set.
///
/// # Errors
///
/// Returns [`VectorError::Json`] if the metadata cannot be encoded.
pub fn render_bundle(bundle: &TestVectorBundle, emit_metadata: bool) -> Result<Vec<RenderedFile>> {
    let mut files = vec![
        RenderedFile {
            name: INSTRUCTIONS_FILE,
            contents: render_mem(bundle.instructions().words()),
        },
        RenderedFile {
            name: DATA_A_FILE,
            contents: render_mem(bundle.data_a()),
        },
        RenderedFile {
            name: DATA_B_FILE,
            contents: render_mem(bundle.data_b()),
        },
        RenderedFile {
            name: EXPECTED_FILE,
            contents: render_mem(bundle.expected()),
        },
    ];
    if emit_metadata {
        let mut json = bundle.metadata().to_json_pretty()?;
        json.push('\n');
        files.push(RenderedFile {
            name: METADATA_FILE,
            contents: json,
        });
    }
    Ok(files)
}

/// Writes `bundle` into `dir`, creating it if needed.
///
/// When `emit_metadata` is false, an existing metadata document in `dir` is deleted.
///
/// # Errors
///
/// Returns [`VectorError::Io`] naming the path that could not be created, staged, or
/// persisted. Nothing is renamed into place unless every file was staged successfully.
pub fn write_bundle(dir: &Path, bundle: &TestVectorBundle, emit_metadata: bool) -> Result<WrittenFiles> {
    let files = render_bundle(bundle, emit_metadata)?;

    fs::create_dir_all(dir).map_err(|e| VectorError::io(dir, e))?;

    let mut staged = Vec::with_capacity(files.len());
    for file in &files {
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| VectorError::io(dir, e))?;
        let staging = tmp.path().to_path_buf();
        tmp.write_all(file.contents.as_bytes())
            .map_err(|e| VectorError::io(staging, e))?;
        debug!(file = file.name, bytes = file.contents.len(), "staged");
        staged.push((tmp, dir.join(file.name)));
    }

    let mut written = WrittenFiles::default();
    for (tmp, path) in staged {
        let _file = tmp
            .persist(&path)
            .map_err(|e| VectorError::io(&path, e.error))?;
        written.paths.push(path);
    }

    if !emit_metadata {
        remove_stale(&dir.join(METADATA_FILE))?;
    }

    info!(dir = %dir.display(), files = written.len(), "test vectors written");
    Ok(written)
}

/// Deletes `path` if it exists.
fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale file");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(VectorError::io(path, e)),
    }
}
