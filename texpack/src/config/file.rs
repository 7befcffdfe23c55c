//! Configuration file handling for ~/.texpack/config.ini.
//!
//! ```ini
//! [texture]
//! backend = toktx
//! quality = 80
//! scale = 0.5
//! uastc = false
//!
//! [tools]
//! basisu = /opt/basis_universal/bin/basisu
//! toktx = /opt/ktx/bin/toktx
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::ToolConfig;
use crate::encoder::{Backend, DEFAULT_QUALITY, MAX_QUALITY};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read or parse the config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// `[texture]` section: default encode parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSettings {
    pub backend: Backend,
    /// Quality on the 0-100 scale.
    pub quality: u8,
    /// Downscale factor in (0, 1].
    pub scale: f32,
    pub uastc: bool,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            backend: Backend::Basisu,
            quality: DEFAULT_QUALITY,
            scale: 1.0,
            uastc: false,
        }
    }
}

/// `[tools]` section: executable overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolsSettings {
    pub basisu: Option<String>,
    pub toktx: Option<String>,
}

impl ToolsSettings {
    /// Override configured for `backend`, as a [`ToolConfig`].
    pub fn tool_config(&self, backend: Backend) -> ToolConfig {
        let path = match backend {
            Backend::Basisu => &self.basisu,
            Backend::Toktx => &self.toktx,
        };
        ToolConfig {
            override_path: path.clone(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub texture: TextureSettings,
    pub tools: ToolsSettings,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.texpack/config.ini).
    ///
    /// A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn from_ini_str(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content).map_err(ini::Error::Parse)?;
        parse_ini(&ini)
    }

    /// Tool config for `backend`: environment variable first, then file.
    pub fn resolve_tool(&self, backend: Backend) -> ToolConfig {
        ToolConfig::from_env(backend.env_var()).or(self.tools.tool_config(backend))
    }
}

/// Get the path to the config directory (~/.texpack).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".texpack")
}

/// Get the path to the config file (~/.texpack/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Overlay INI values on top of the defaults.
fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [texture] section
    if let Some(section) = ini.section(Some("texture")) {
        if let Some(v) = section.get("backend") {
            config.texture.backend = Backend::from_config_str(v)
                .ok_or_else(|| invalid("texture", "backend", v, "must be one of: basisu, toktx"))?;
        }
        if let Some(v) = section.get("quality") {
            config.texture.quality = v
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|q| *q <= MAX_QUALITY)
                .ok_or_else(|| invalid("texture", "quality", v, "must be an integer from 0 to 100"))?;
        }
        if let Some(v) = section.get("scale") {
            config.texture.scale = v
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|s| *s > 0.0 && *s <= 1.0)
                .ok_or_else(|| invalid("texture", "scale", v, "must be a number in (0, 1]"))?;
        }
        if let Some(v) = section.get("uastc") {
            config.texture.uastc = match v.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => true,
                "false" | "no" | "0" | "off" => false,
                _ => return Err(invalid("texture", "uastc", v, "must be true or false")),
            };
        }
    }

    // [tools] section
    if let Some(section) = ini.section(Some("tools")) {
        if let Some(v) = section.get("basisu") {
            config.tools.basisu = non_empty(v);
        }
        if let Some(v) = section.get("toktx") {
            config.tools.toktx = non_empty(v);
        }
    }

    Ok(config)
}
