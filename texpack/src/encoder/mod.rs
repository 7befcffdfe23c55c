//! External texture encoders.
//!
//! This module turns an image plus its inferred [`ImageUsage`] into a
//! GPU-ready compressed texture by driving `basisu` or `toktx`. It only
//! computes policy (flags, quality mapping, output format); the pixels are
//! handled entirely by the external tool.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │   caller (CLI pack)  │
//! │ Arc<dyn TextureEncoder>
//! └──────────┬───────────┘
//!            │ EncodeJob
//!            ▼
//! ┌──────────────────────┐
//! │   TextureEncoder     │ (trait)
//! └──────────┬───────────┘
//!       ┌────┴─────┐
//!       ▼          ▼
//! ┌──────────┐ ┌──────────┐
//! │ Basisu   │ │ Toktx    │  build CommandLine
//! │ Encoder  │ │ Encoder  │
//! └────┬─────┘ └────┬─────┘
//!      └─────┬──────┘
//!            ▼
//!  ToolInvoker: temp in/out files → ProcessRunner → read back
//! ```
//!
//! Each encode call moves through `Idle → InputWritten → ProcessRan →
//! {Success, Failed}` with no retries.
//!
//! [`ImageUsage`]: crate::usage::ImageUsage

mod backend;
mod basisu;
#[allow(clippy::module_inception)]
mod encoder;
mod error;
mod invoke;
mod job;
mod probe;
mod toktx;

use std::path::PathBuf;
use std::sync::Arc;

pub use backend::Backend;
pub use basisu::BasisuEncoder;
pub use encoder::TextureEncoder;
pub use error::{EncodeError, EncodeResult};
pub use job::{native_quality, ColorSpace, EncodeJob, DEFAULT_QUALITY, MAX_QUALITY};
pub use probe::{is_encoder_available, version_command};
pub use toktx::ToktxEncoder;

use crate::config::ToolConfig;
use crate::process::ProcessRunner;

/// Settings shared by every encoder instance.
#[derive(Debug, Clone, Default)]
pub struct EncoderSettings {
    /// Executable override for the selected backend.
    pub tool: ToolConfig,
    /// Directory for temporary files, system default when `None`.
    pub temp_dir: Option<PathBuf>,
    /// Log each command and its exit status at info level.
    pub verbose: bool,
}

/// Create the encoder for `backend`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use texpack::encoder::{create_encoder, Backend, EncoderSettings};
/// use texpack::process::SystemRunner;
///
/// let encoder = create_encoder(Backend::Toktx, Arc::new(SystemRunner), EncoderSettings::default());
/// assert_eq!(encoder.extension(), "ktx2");
/// ```
pub fn create_encoder(
    backend: Backend,
    runner: Arc<dyn ProcessRunner>,
    settings: EncoderSettings,
) -> Arc<dyn TextureEncoder> {
    match backend {
        Backend::Basisu => {
            let mut encoder = BasisuEncoder::new(runner)
                .with_tool(settings.tool)
                .with_verbose(settings.verbose);
            if let Some(dir) = settings.temp_dir {
                encoder = encoder.with_temp_dir(dir);
            }
            Arc::new(encoder)
        }
        Backend::Toktx => {
            let mut encoder = ToktxEncoder::new(runner)
                .with_tool(settings.tool)
                .with_verbose(settings.verbose);
            if let Some(dir) = settings.temp_dir {
                encoder = encoder.with_temp_dir(dir);
            }
            Arc::new(encoder)
        }
    }
}
