//! Scoped temporary files for tool interop.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempPath};

const PREFIX: &str = "texpack-";

/// A uniquely named file that is deleted when dropped.
///
/// The file is created empty on acquisition so the name cannot be taken
/// by a concurrent caller. Deletion happens on every exit path, including
/// early returns and unwinding.
#[derive(Debug)]
pub struct ScopedTempFile {
    path: TempPath,
}

impl ScopedTempFile {
    /// Create a temporary file in the system temp directory.
    ///
    /// `extension` includes the leading dot (e.g. `".png"`).
    pub fn new(extension: &str) -> io::Result<Self> {
        Self::new_in(std::env::temp_dir(), extension)
    }

    /// Create a temporary file inside `dir`.
    pub fn new_in(dir: impl AsRef<Path>, extension: &str) -> io::Result<Self> {
        let file = Builder::new()
            .prefix(PREFIX)
            .suffix(extension)
            .tempfile_in(dir)?;

        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Owned copy of the path, for diagnostics.
    pub fn to_path_buf(&self) -> PathBuf {
        self.path.to_path_buf()
    }
}
