//! Source image MIME type registry.
//!
//! A fixed, ordered table mapping the image formats a scene may reference
//! to file extensions. Lookups are linear and the first match wins, so
//! `image/jpeg` always maps back to `.jpg` even though `.jpeg` is also
//! accepted on the way in.

use image::ImageFormat;

/// `(mime type, lowercase extension)` pairs, first match wins.
const MIME_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/jpeg", ".jpeg"),
    ("image/png", ".png"),
];

/// Extension used for temporary files when the MIME type is unknown.
pub const FALLBACK_EXTENSION: &str = ".raw";

/// Infer the MIME type of an image from its path.
///
/// Only the text after the last `.` is considered, compared
/// case-insensitively. Returns an empty string when the path has no
/// extension or the extension is not in the registry.
///
/// # Example
///
/// ```
/// use texpack::mime::mime_type_from_path;
///
/// assert_eq!(mime_type_from_path("textures/albedo.PNG"), "image/png");
/// assert_eq!(mime_type_from_path("noext"), "");
/// ```
pub fn mime_type_from_path(path: &str) -> &'static str {
    let Some(dot) = path.rfind('.') else {
        return "";
    };

    let extension = path[dot..].to_ascii_lowercase();

    MIME_TYPES
        .iter()
        .find(|(_, ext)| *ext == extension)
        .map(|(mime, _)| *mime)
        .unwrap_or("")
}

/// Return the file extension (with leading dot) for a MIME type.
///
/// Unknown MIME types map to [`FALLBACK_EXTENSION`] rather than an empty
/// string: temporary input files always need some extension, and the
/// encoder gets the chance to reject the content itself.
pub fn extension_from_mime_type(mime_type: &str) -> &'static str {
    MIME_TYPES
        .iter()
        .find(|(mime, _)| *mime == mime_type)
        .map(|(_, ext)| *ext)
        .unwrap_or(FALLBACK_EXTENSION)
}

/// Detect a registry MIME type from the leading bytes of an image.
///
/// Returns `None` for anything that is not PNG or JPEG.
pub fn sniff_mime_type(data: &[u8]) -> Option<&'static str> {
    match image::guess_format(data).ok()? {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_mime_type_from_path_png() {
        assert_eq!(mime_type_from_path("tex.png"), "image/png");
    }

    #[test]
    fn test_mime_type_from_path_is_case_insensitive() {
        assert_eq!(mime_type_from_path("tex.PNG"), "image/png");
        assert_eq!(mime_type_from_path("photo.JpEg"), "image/jpeg");
    }

    #[test]
    fn test_mime_type_from_path_both_jpeg_extensions() {
        assert_eq!(mime_type_from_path("a.jpg"), "image/jpeg");
        assert_eq!(mime_type_from_path("a.jpeg"), "image/jpeg");
    }

    #[test]
    fn test_mime_type_from_path_no_extension() {
        assert_eq!(mime_type_from_path("noext"), "");
    }

    #[test]
    fn test_mime_type_from_path_unknown_extension() {
        assert_eq!(mime_type_from_path("tex.tga"), "");
    }

    #[test]
    fn test_mime_type_from_path_uses_last_dot() {
        assert_eq!(mime_type_from_path("archive.png.bak"), "");
        assert_eq!(mime_type_from_path("dir.v2/albedo.png"), "image/png");
    }

    #[test]
    fn test_extension_from_mime_type() {
        assert_eq!(extension_from_mime_type("image/png"), ".png");
        // first registry entry wins
        assert_eq!(extension_from_mime_type("image/jpeg"), ".jpg");
    }

    #[test]
    fn test_extension_from_unknown_mime_type_falls_back() {
        let ext = extension_from_mime_type("unknown/type");
        assert!(!ext.is_empty());
        assert_eq!(ext, FALLBACK_EXTENSION);
        assert_eq!(extension_from_mime_type(""), FALLBACK_EXTENSION);
    }

    #[test]
    fn test_sniff_mime_type() {
        assert_eq!(sniff_mime_type(PNG_MAGIC), Some("image/png"));
        assert_eq!(sniff_mime_type(JPEG_MAGIC), Some("image/jpeg"));
        assert_eq!(sniff_mime_type(b"not an image"), None);
        assert_eq!(sniff_mime_type(&[]), None);
    }
}
