//! Configuration: executable overrides and default encode parameters.
//!
//! Precedence, highest first: command line flags, environment variables
//! (`BASISU_PATH`, `TOKTX_PATH`), `~/.texpack/config.ini`, built-in
//! defaults. Library code receives resolved values explicitly and never
//! reads the environment on its own, except through
//! [`ToolConfig::from_env`].

mod file;
mod tool;

pub use file::{
    config_directory, config_file_path, ConfigFile, ConfigFileError, TextureSettings,
    ToolsSettings,
};
pub use tool::ToolConfig;
