//! `basisu` encoder backend.
//!
//! Produces `.basis` files. Command shape:
//!
//! ```text
//! basisu -q <0-255> -mipmap [-normal_map | -linear] [-uastc] -file <in> -output_file <out>
//! ```
//!
//! sRGB is the tool's default, so perceptual images get no color flag.
//! UASTC is additive: quality and normal-map flags are still passed.
//! `basisu` cannot resize, so the job's scale is ignored.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::invoke::ToolInvoker;
use super::{Backend, ColorSpace, EncodeJob, EncodeResult, TextureEncoder};
use crate::config::ToolConfig;
use crate::process::{CommandLine, ProcessRunner};

/// Encoder driving the Basis Universal command line tool.
#[derive(Debug, Clone)]
pub struct BasisuEncoder {
    invoker: ToolInvoker,
}

impl BasisuEncoder {
    /// Create an encoder running `basisu` through `runner`.
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            invoker: ToolInvoker::new(Backend::Basisu, runner),
        }
    }

    /// Use an explicit executable instead of `basisu` from `PATH`.
    pub fn with_tool(mut self, tool: ToolConfig) -> Self {
        self.invoker.set_tool(tool);
        self
    }

    /// Create temporary files in `dir` instead of the system temp dir.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.invoker.set_temp_dir(dir.into());
        self
    }

    /// Log every command and its exit status at info level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.invoker.set_verbose(verbose);
        self
    }

    pub fn tool(&self) -> &ToolConfig {
        self.invoker.tool()
    }
}

impl TextureEncoder for BasisuEncoder {
    fn encode(&self, job: &EncodeJob<'_>) -> EncodeResult<Vec<u8>> {
        self.invoker
            .invoke(job, |input, output| self.command_line(job, input, output))
    }

    fn is_available(&self) -> bool {
        self.invoker.is_available()
    }

    fn command_line(&self, job: &EncodeJob<'_>, input: &Path, output: &Path) -> CommandLine {
        let mut cmd = CommandLine::new(self.invoker.program())
            .arg("-q")
            .arg(job.native_quality().to_string())
            .arg("-mipmap");

        match job.color_space() {
            // TODO: pass -separate_rg_to_color_alpha once renderers sample normals from RG/A
            ColorSpace::NormalMap => cmd = cmd.arg("-normal_map"),
            ColorSpace::Linear => cmd = cmd.arg("-linear"),
            ColorSpace::Perceptual => {}
        }

        if job.uastc() {
            cmd = cmd.arg("-uastc");
        }

        cmd.arg("-file")
            .path_arg(input)
            .arg("-output_file")
            .path_arg(output)
    }

    fn extension(&self) -> &str {
        Backend::Basisu.extension()
    }

    fn name(&self) -> &str {
        "Basis Universal (basisu)"
    }
}
