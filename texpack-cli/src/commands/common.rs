//! Common types and utilities shared across CLI commands.

use std::sync::Arc;

use clap::{Args, ValueEnum};
use texpack::config::ConfigFile;
use texpack::encoder::{create_encoder, Backend, EncoderSettings, TextureEncoder, MAX_QUALITY};
use texpack::process::SystemRunner;

use crate::error::CliError;

/// Encoder selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BackendArg {
    /// Basis Universal (`basisu`), writes .basis files
    Basisu,
    /// KTX-Software (`toktx`), writes .ktx2 files
    Toktx,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Basisu => Backend::Basisu,
            BackendArg::Toktx => Backend::Toktx,
        }
    }
}

// Encode flags for `encode` and `pack`; unset flags fall back to the
// config file, then built-in defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct EncodeArgs {
    /// Encoder to use
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Quality from 0 to 100
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: Option<u8>,

    /// Downscale factor (toktx only; values below 1.0 shrink the image)
    #[arg(long)]
    pub scale: Option<f32>,

    /// Use UASTC instead of ETC1S
    #[arg(long)]
    pub uastc: bool,
}

/// Encode parameters after applying config defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEncodeArgs {
    pub backend: Backend,
    pub quality: u8,
    pub scale: f32,
    pub uastc: bool,
}

impl EncodeArgs {
    /// Resolve against the config file (CLI takes precedence).
    pub fn resolve(&self, config: &ConfigFile) -> Result<ResolvedEncodeArgs, CliError> {
        let scale = self.scale.unwrap_or(config.texture.scale);
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(CliError::InvalidArgument(format!(
                "scale must be a positive number, got {}",
                scale
            )));
        }

        Ok(ResolvedEncodeArgs {
            backend: self.backend.map(Backend::from).unwrap_or(config.texture.backend),
            quality: self.quality.unwrap_or(config.texture.quality).min(MAX_QUALITY),
            scale,
            uastc: self.uastc || config.texture.uastc,
        })
    }
}

/// Load the config file from `path`, or the default location.
pub fn load_config(path: Option<&std::path::Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Build an encoder for `backend` that spawns real processes.
pub fn build_encoder(
    backend: Backend,
    config: &ConfigFile,
    verbose: bool,
) -> Arc<dyn TextureEncoder> {
    let settings = EncoderSettings {
        tool: config.resolve_tool(backend),
        temp_dir: None,
        verbose,
    };
    create_encoder(backend, Arc::new(SystemRunner::new()), settings)
}
