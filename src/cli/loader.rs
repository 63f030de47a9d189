//! Source file loading.
//!
//! Turns a path into a [`SourceFile`] the lexer can consume. The whole file is read at once so edits made while the
//! compiler runs cannot tear the buffer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rotate_syntax::source::SourceFile;
use thiserror::Error;

/// Required source file extension, without the dot.
pub const SOURCE_EXTENSION: &str = "vr";

/// Maximum source file size (100 MiB)
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Why a source file was rejected.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file name `{}` must end with .{ext}", .0.display(), ext = SOURCE_EXTENSION)]
    BadExtension(PathBuf),

    #[error("file `{}` does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file `{}` is empty", .0.display())]
    Empty(PathBuf),

    #[error("file `{}` is too large ({size} bytes, max {max} bytes)", path.display(), max = MAX_SOURCE_SIZE)]
    TooLarge { path: PathBuf, size: u64 },

    #[error("file `{}` is not a text file; only ASCII/UTF-8 sources are supported", .0.display())]
    NotText(PathBuf),
}

/// Read and validate a `.vr` source file.
///
/// ## Errors
///
/// Returns an error if:
/// - The path has no file stem or does not end in `.vr`
/// - The file does not exist or cannot be read
/// - The file is empty or larger than [`MAX_SOURCE_SIZE`]
/// - The first byte is neither whitespace nor printable ASCII, or the contents are not UTF-8
pub fn read_source(path: &Path) -> Result<SourceFile, LoadError> {
    if !has_source_extension(path) {
        return Err(LoadError::BadExtension(path.to_path_buf()));
    }

    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let size = metadata.len();
    if size == 0 {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    if size > MAX_SOURCE_SIZE {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size,
        });
    }

    let bytes = fs::read(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Re-checked after the read; the file may have been truncated in between.
    let Some(&first) = bytes.first() else {
        return Err(LoadError::Empty(path.to_path_buf()));
    };
    if !(first.is_ascii_whitespace() || first.is_ascii_graphic()) {
        return Err(LoadError::NotText(path.to_path_buf()));
    }

    let contents = String::from_utf8(bytes).map_err(|_| LoadError::NotText(path.to_path_buf()))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "loaded source");

    Ok(SourceFile::new(path.to_string_lossy(), contents))
}

/// `true` for `name.vr`; a bare `.vr` has no stem and is rejected.
fn has_source_extension(path: &Path) -> bool {
    let has_stem = path.file_stem().is_some_and(|stem| !stem.is_empty());
    has_stem && path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
