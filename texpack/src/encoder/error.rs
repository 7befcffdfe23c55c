//! Error types for encoder invocations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::process::ProcessStatus;

/// Result type for encoder operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Why an encode call produced no output.
///
/// Every variant is terminal for the image; callers decide whether to fall
/// back to the original data.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A scoped temporary file could not be created.
    #[error("failed to create temporary file: {0}")]
    TempFile(#[source] io::Error),

    /// The image could not be written to the temporary input file.
    /// No process was started.
    #[error("failed to write encoder input {}: {source}", path.display())]
    WriteInput { path: PathBuf, source: io::Error },

    /// The encoder did not exit with status 0.
    #[error("`{command}` failed with status {status}")]
    ProcessFailed {
        command: String,
        status: ProcessStatus,
    },

    /// The encoder reported success but its output could not be read.
    #[error("failed to read encoder output {}: {source}", path.display())]
    ReadOutput { path: PathBuf, source: io::Error },
}

impl EncodeError {
    /// True if an external process was started for this job.
    pub fn process_started(&self) -> bool {
        matches!(
            self,
            EncodeError::ProcessFailed { .. } | EncodeError::ReadOutput { .. }
        )
    }
}
