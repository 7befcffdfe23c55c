//! `texpack encode`: compress a single image file.

use std::fs;
use std::path::Path;

use texpack::config::ConfigFile;
use texpack::encoder::EncodeJob;
use texpack::mime::{mime_type_from_path, sniff_mime_type};
use texpack::usage::ImageUsage;
use tracing::info;

use super::common::{build_encoder, EncodeArgs};
use crate::error::CliError;

/// Color flags given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageFlags {
    pub srgb: bool,
    pub normal_map: bool,
}

impl From<UsageFlags> for ImageUsage {
    fn from(flags: UsageFlags) -> Self {
        ImageUsage {
            is_perceptual: flags.srgb,
            is_normal_map: flags.normal_map,
        }
    }
}

pub fn run(
    input: &Path,
    output: &Path,
    args: &EncodeArgs,
    flags: UsageFlags,
    config: &ConfigFile,
    verbose: bool,
) -> Result<(), CliError> {
    let settings = args.resolve(config)?;
    let encoder = build_encoder(settings.backend, config, verbose);

    if !encoder.is_available() {
        return Err(CliError::EncoderUnavailable(settings.backend));
    }

    let data = fs::read(input).map_err(|error| CliError::FileRead {
        path: input.to_path_buf(),
        error,
    })?;
    let mime_type = detect_mime_type(input, &data);

    let job = EncodeJob::new(&data, mime_type)
        .with_usage(flags.into())
        .with_quality(settings.quality)
        .with_scale(settings.scale)
        .with_uastc(settings.uastc);

    let encoded = encoder.encode(&job)?;

    fs::write(output, &encoded).map_err(|error| CliError::FileWrite {
        path: output.to_path_buf(),
        error,
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes_in = data.len(),
        bytes_out = encoded.len(),
        "Encoded with {}",
        encoder.name()
    );

    Ok(())
}

/// MIME type from the file extension, else from the content.
///
/// Empty when neither is recognized; the encoder then names its input
/// file with the fallback extension.
pub(crate) fn detect_mime_type(path: &Path, data: &[u8]) -> &'static str {
    let from_path = mime_type_from_path(&path.to_string_lossy());
    if !from_path.is_empty() {
        return from_path;
    }
    sniff_mime_type(data).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn test_detect_mime_type_prefers_extension() {
        assert_eq!(detect_mime_type(Path::new("a.JPG"), PNG_MAGIC), "image/jpeg");
    }

    #[test]
    fn test_detect_mime_type_sniffs_unknown_extension() {
        assert_eq!(detect_mime_type(Path::new("a.bin"), PNG_MAGIC), "image/png");
        assert_eq!(detect_mime_type(Path::new("noext"), b"garbage"), "");
    }

    #[test]
    fn test_usage_flags_conversion() {
        let usage: ImageUsage = UsageFlags {
            srgb: true,
            normal_map: false,
        }
        .into();
        assert_eq!(usage, ImageUsage::perceptual());
    }
}
