//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use texpack::config::ConfigFileError;
use texpack::encoder::{Backend, EncodeError};
use texpack::scene::SceneError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// Invalid combination or value of arguments
    InvalidArgument(String),
    /// The requested encoder could not be run
    EncoderUnavailable(Backend),
    /// Failed to load a scene
    Scene(SceneError),
    /// Failed to encode an image
    Encode(EncodeError),
    /// Failed to read an input file
    FileRead { path: PathBuf, error: std::io::Error },
    /// Failed to write an output file
    FileWrite { path: PathBuf, error: std::io::Error },
    /// Some images of a pack run failed to encode
    PackIncomplete { failed: usize },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::EncoderUnavailable(backend) => {
                eprintln!();
                eprintln!("Make sure that:");
                eprintln!(
                    "  1. `{}` is installed and on your PATH, or",
                    backend.tool_name()
                );
                eprintln!(
                    "  2. {} points to the executable, or",
                    backend.env_var()
                );
                eprintln!(
                    "  3. [tools] {} is set in {}",
                    backend.tool_name(),
                    texpack::config::config_file_path().display()
                );
            }
            CliError::Encode(EncodeError::TempFile(_)) => {
                eprintln!();
                eprintln!("Check that the temporary directory exists and is writable.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::EncoderUnavailable(backend) => {
                write!(f, "Encoder `{}` is not available", backend)
            }
            CliError::Scene(e) => write!(f, "Failed to load scene: {}", e),
            CliError::Encode(e) => write!(f, "Encoding failed: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path.display(), error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
            CliError::PackIncomplete { failed } => {
                write!(f, "{} image(s) could not be encoded", failed)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Scene(e) => Some(e),
            CliError::Encode(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<SceneError> for CliError {
    fn from(e: SceneError) -> Self {
        CliError::Scene(e)
    }
}

impl From<EncodeError> for CliError {
    fn from(e: EncodeError) -> Self {
        CliError::Encode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_unavailable_encoder() {
        let err = CliError::EncoderUnavailable(Backend::Toktx);
        assert_eq!(err.to_string(), "Encoder `toktx` is not available");
    }

    #[test]
    fn test_display_pack_incomplete() {
        let err = CliError::PackIncomplete { failed: 2 };
        assert_eq!(err.to_string(), "2 image(s) could not be encoded");
    }

    #[test]
    fn test_file_write_has_source() {
        let err = CliError::FileWrite {
            path: PathBuf::from("out/a.ktx2"),
            error: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/a.ktx2"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_encode_error() {
        let err: CliError = EncodeError::TempFile(std::io::Error::other("full")).into();
        assert!(matches!(err, CliError::Encode(_)));
    }
}
