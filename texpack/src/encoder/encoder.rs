//! TextureEncoder trait for abstracting over external encoder backends.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use std::sync::Arc;
//! use texpack::encoder::{EncodeJob, TextureEncoder, ToktxEncoder};
//! use texpack::process::SystemRunner;
//!
//! let encoder: Arc<dyn TextureEncoder> = Arc::new(ToktxEncoder::new(Arc::new(SystemRunner)));
//!
//! let job = EncodeJob::new(b"", "image/png").with_quality(100);
//! let cmd = encoder.command_line(&job, Path::new("in.png"), Path::new("out.ktx2"));
//! assert_eq!(cmd.value_of("--qlevel"), Some("255"));
//! assert_eq!(encoder.extension(), "ktx2");
//! ```

use std::path::Path;
use std::sync::Arc;

use super::{EncodeJob, EncodeResult};
use crate::process::CommandLine;

/// Trait for external texture encoders.
///
/// Every implementation follows the same contract: the job's bytes go into
/// a scoped temporary input file, the tool writes a scoped temporary output
/// file, and the result is that file's content. No retries are made.
/// Implementations must be `Send + Sync` so one encoder can serve several
/// worker threads, each call using its own temp files.
///
/// # Implementors
///
/// - [`BasisuEncoder`](super::BasisuEncoder) - `basisu`, `.basis` output
/// - [`ToktxEncoder`](super::ToktxEncoder) - `toktx`, `.ktx2` output
pub trait TextureEncoder: Send + Sync {
    /// Encode one image.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if:
    /// - the temporary input cannot be created or written (no process runs)
    /// - the tool exits with a non-zero status
    /// - the tool's output cannot be read back
    fn encode(&self, job: &EncodeJob<'_>) -> EncodeResult<Vec<u8>>;

    /// Check that the tool can be run at all.
    fn is_available(&self) -> bool;

    /// Command line that [`encode`](Self::encode) runs for `job` with the
    /// given temp file paths.
    fn command_line(&self, job: &EncodeJob<'_>, input: &Path, output: &Path) -> CommandLine;

    /// File extension of the encoded output, without the leading dot.
    fn extension(&self) -> &str;

    /// Human-readable encoder name.
    fn name(&self) -> &str;
}

/// Blanket implementation for Arc-wrapped encoders.
impl<T: TextureEncoder + ?Sized> TextureEncoder for Arc<T> {
    fn encode(&self, job: &EncodeJob<'_>) -> EncodeResult<Vec<u8>> {
        (**self).encode(job)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn command_line(&self, job: &EncodeJob<'_>, input: &Path, output: &Path) -> CommandLine {
        (**self).command_line(job, input, output)
    }

    fn extension(&self) -> &str {
        (**self).extension()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock encoder for testing trait object behavior.
    struct EchoEncoder;

    impl TextureEncoder for EchoEncoder {
        fn encode(&self, job: &EncodeJob<'_>) -> EncodeResult<Vec<u8>> {
            Ok(job.data().to_vec())
        }

        fn is_available(&self) -> bool {
            true
        }

        fn command_line(&self, _job: &EncodeJob<'_>, input: &Path, output: &Path) -> CommandLine {
            CommandLine::new("cp").path_arg(input).path_arg(output)
        }

        fn extension(&self) -> &str {
            "echo"
        }

        fn name(&self) -> &str {
            "Echo"
        }
    }

    #[test]
    fn test_arc_delegates() {
        let encoder: Arc<dyn TextureEncoder> = Arc::new(EchoEncoder);
        let shared = Arc::clone(&encoder);

        assert_eq!(shared.name(), "Echo");
        assert_eq!(shared.extension(), "echo");
        assert!(shared.is_available());

        let job = EncodeJob::new(b"abc", "image/png");
        assert_eq!(shared.encode(&job).unwrap(), b"abc");

        let cmd = shared.command_line(&job, Path::new("a"), Path::new("b"));
        assert_eq!(cmd.to_string(), "cp a b");
    }

    #[test]
    fn test_is_object_safe_and_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TextureEncoder>();
    }
}
