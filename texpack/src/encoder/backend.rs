//! Supported external encoders.

use std::fmt;

use crate::process::StreamPolicy;

/// An external compressed-texture encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Basis Universal command line tool, writes `.basis` files.
    Basisu,
    /// KTX-Software `toktx`, writes `.ktx2` files.
    Toktx,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Basisu, Backend::Toktx];

    /// Executable name looked up through `PATH`.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Backend::Basisu => "basisu",
            Backend::Toktx => "toktx",
        }
    }

    /// Environment variable overriding the executable.
    pub fn env_var(&self) -> &'static str {
        match self {
            Backend::Basisu => "BASISU_PATH",
            Backend::Toktx => "TOKTX_PATH",
        }
    }

    /// Flag that makes the tool print its version and exit 0.
    pub fn version_flag(&self) -> &'static str {
        match self {
            Backend::Basisu => "-version",
            Backend::Toktx => "--version",
        }
    }

    /// Output file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Backend::Basisu => "basis",
            Backend::Toktx => "ktx2",
        }
    }

    /// Which streams are discarded while encoding.
    ///
    /// `basisu` is chatty on stdout; `toktx` is quiet and its output is
    /// left untouched.
    pub fn stream_policy(&self) -> StreamPolicy {
        match self {
            Backend::Basisu => StreamPolicy::ERRORS_ONLY,
            Backend::Toktx => StreamPolicy::INHERIT,
        }
    }

    /// Parse a backend name as used in config files.
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basisu" | "basis" => Some(Backend::Basisu),
            "toktx" | "ktx" | "ktx2" => Some(Backend::Toktx),
            _ => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_and_env_vars() {
        assert_eq!(Backend::Basisu.tool_name(), "basisu");
        assert_eq!(Backend::Basisu.env_var(), "BASISU_PATH");
        assert_eq!(Backend::Toktx.tool_name(), "toktx");
        assert_eq!(Backend::Toktx.env_var(), "TOKTX_PATH");
    }

    #[test]
    fn test_version_flags() {
        assert_eq!(Backend::Basisu.version_flag(), "-version");
        assert_eq!(Backend::Toktx.version_flag(), "--version");
    }

    #[test]
    fn test_stream_policies_differ() {
        assert_eq!(Backend::Basisu.stream_policy(), StreamPolicy::ERRORS_ONLY);
        assert_eq!(Backend::Toktx.stream_policy(), StreamPolicy::INHERIT);
    }

    #[test]
    fn test_from_config_str() {
        assert_eq!(Backend::from_config_str("basisu"), Some(Backend::Basisu));
        assert_eq!(Backend::from_config_str(" TokTx "), Some(Backend::Toktx));
        assert_eq!(Backend::from_config_str("ktx2"), Some(Backend::Toktx));
        assert_eq!(Backend::from_config_str("astcenc"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Backend::Toktx.to_string(), "toktx");
    }
}
