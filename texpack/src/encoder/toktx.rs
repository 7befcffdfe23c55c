//! `toktx` encoder backend.
//!
//! Produces `.ktx2` files. Command shape:
//!
//! ```text
//! toktx --2d --t2 --automipmap [--scale <g>]
//!       (--uastc 2 | --bcmp --qlevel <0-255> [--normal_map])
//!       [--srgb | --linear] <out> <in>
//! ```
//!
//! UASTC mode replaces the ETC1S quality and normal-map flags. When
//! `--normal_map` is emitted no color-space flag follows it; a normal map
//! in UASTC mode is marked `--linear` instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::invoke::ToolInvoker;
use super::job::format_general;
use super::{Backend, ColorSpace, EncodeJob, EncodeResult, TextureEncoder};
use crate::config::ToolConfig;
use crate::process::{CommandLine, ProcessRunner};

/// UASTC quality level passed to `--uastc`.
const UASTC_LEVEL: &str = "2";

/// Encoder driving KTX-Software's `toktx`.
#[derive(Debug, Clone)]
pub struct ToktxEncoder {
    invoker: ToolInvoker,
}

impl ToktxEncoder {
    /// Create an encoder running `toktx` through `runner`.
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            invoker: ToolInvoker::new(Backend::Toktx, runner),
        }
    }

    /// Use an explicit executable instead of `toktx` from `PATH`.
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

impl TextureEncoder for ToktxEncoder {
    fn encode(&self, job: &EncodeJob<'_>) -> EncodeResult<Vec<u8>> {
        self.invoker
            .invoke(job, |input, output| self.command_line(job, input, output))
    }

    fn is_available(&self) -> bool {
        self.invoker.is_available()
    }

    fn command_line(&self, job: &EncodeJob<'_>, input: &Path, output: &Path) -> CommandLine {
        let mut cmd = CommandLine::new(self.invoker.program()).args(["--2d", "--t2", "--automipmap"]);

        if job.wants_downscale() {
            cmd = cmd.arg("--scale").arg(format_general(job.scale()));
        }

        let color_space = job.color_space();
        let mut normal_map_flag = false;

        if job.uastc() {
            cmd = cmd.arg("--uastc").arg(UASTC_LEVEL);
        } else {
            cmd = cmd
                .arg("--bcmp")
                .arg("--qlevel")
                .arg(job.native_quality().to_string());

            if color_space == ColorSpace::NormalMap {
                cmd = cmd.arg("--normal_map");
                normal_map_flag = true;
            }
        }

        if !normal_map_flag {
            cmd = match color_space {
                ColorSpace::Perceptual => cmd.arg("--srgb"),
                ColorSpace::Linear | ColorSpace::NormalMap => cmd.arg("--linear"),
            };
        }

        cmd.path_arg(output).path_arg(input)
    }

    fn extension(&self) -> &str {
        Backend::Toktx.extension()
    }

    fn name(&self) -> &str {
        "KTX-Software (toktx)"
    }
}
