//! Encode job description and the numeric policy shared by backends.

use crate::usage::ImageUsage;

/// Default caller quality on the 0-100 scale.
pub const DEFAULT_QUALITY: u8 = 50;

/// Highest caller quality.
pub const MAX_QUALITY: u8 = 100;

/// One image to encode, with everything that shapes the command line.
///
/// # Example
///
/// ```
/// use texpack::encoder::EncodeJob;
/// use texpack::usage::ImageUsage;
///
/// let png = [0x89, b'P', b'N', b'G'];
/// let job = EncodeJob::new(&png, "image/png")
///     .with_usage(ImageUsage::perceptual())
///     .with_quality(100)
///     .with_scale(0.5);
///
/// assert_eq!(job.native_quality(), 255);
/// assert!(job.wants_downscale());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EncodeJob<'a> {
    data: &'a [u8],
    mime_type: &'a str,
    usage: ImageUsage,
    quality: u8,
    scale: f32,
    uastc: bool,
}

impl<'a> EncodeJob<'a> {
    /// Job for `data` declared as `mime_type`, with default settings:
    /// linear color, quality 50, no downscale, ETC1S/BasisLZ mode.
    pub fn new(data: &'a [u8], mime_type: &'a str) -> Self {
        Self {
            data,
            mime_type,
            usage: ImageUsage::default(),
            quality: DEFAULT_QUALITY,
            scale: 1.0,
            uastc: false,
        }
    }

    pub fn with_usage(mut self, usage: ImageUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Set the quality on the 0-100 scale; larger values are clamped.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(MAX_QUALITY);
        self
    }

    /// Set the downscale factor. Only values below 1.0 have an effect.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Select the high-fidelity UASTC mode.
    pub fn with_uastc(mut self, uastc: bool) -> Self {
        self.uastc = uastc;
        self
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn mime_type(&self) -> &'a str {
        self.mime_type
    }

    pub fn usage(&self) -> ImageUsage {
        self.usage
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn uastc(&self) -> bool {
        self.uastc
    }

    /// Quality on the encoders' native 0-255 scale.
    pub fn native_quality(&self) -> u32 {
        native_quality(self.quality)
    }

    pub fn wants_downscale(&self) -> bool {
        self.scale < 1.0
    }

    pub fn color_space(&self) -> ColorSpace {
        ColorSpace::for_usage(self.usage)
    }
}

/// Rescale a 0-100 quality to the encoders' 0-255 range, rounding to
/// nearest.
///
/// ```
/// use texpack::encoder::native_quality;
///
/// assert_eq!(native_quality(0), 0);
/// assert_eq!(native_quality(50), 128);
/// assert_eq!(native_quality(100), 255);
/// ```
pub fn native_quality(quality: u8) -> u32 {
    (u32::from(quality) * 255 + 50) / 100
}

/// How the encoder must interpret the image's values.
///
/// Normal-map usage wins over perceptual usage: an image tagged both ways
/// is encoded as a normal map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Tangent-space vectors, never sRGB.
    NormalMap,
    /// Linear data (masks, roughness, occlusion...).
    Linear,
    /// sRGB color.
    Perceptual,
}

impl ColorSpace {
    pub fn for_usage(usage: ImageUsage) -> Self {
        if usage.is_normal_map {
            ColorSpace::NormalMap
        } else if usage.is_perceptual {
            ColorSpace::Perceptual
        } else {
            ColorSpace::Linear
        }
    }
}

/// Format a float like C's `%g`: six significant digits, trailing zeros
/// dropped, exponent notation for very small or large magnitudes.
pub(crate) fn format_general(value: f32) -> String {
    const PRECISION: i32 = 6;

    let value = f64::from(value);
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // exponent after rounding to the target precision
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
