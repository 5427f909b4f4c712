//! # Ingest Module
//!
//! Upload hygiene applied before bytes reach the scoring engine:
//! size bounds, extension whitelist, magic-byte signature validation,
//! and filename sanitization.
//!
//! The engine itself tolerates anything (bad input degrades to an error
//! finding); this layer exists so callers get actionable errors for inputs
//! that were never going to be analyzable.

use crate::error::ValidationError;
use regex::Regex;

/// Maximum accepted upload size (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Anything below this cannot be a real image
pub const MIN_FILE_SIZE: u64 = 100;

/// Maximum length of a sanitized filename
pub const MAX_FILENAME_LENGTH: usize = 100;

/// Accepted file extensions (lowercase)
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Known image signatures (magic bytes)
const MAGIC_BYTES: &[&[u8]] = &[
    &[0xFF, 0xD8, 0xFF],                              // JPEG
    &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], // PNG
    b"GIF87a",                                         // GIF
    b"GIF89a",                                         // GIF
    b"RIFF",                                           // WebP container
    b"BM",                                             // BMP
];

/// Validate a candidate upload before analysis.
///
/// Checks, in order: size bounds, extension whitelist, magic-byte
/// signature. Returns the first failure.
pub fn validate_upload(bytes: &[u8], filename: &str) -> Result<(), ValidationError> {
    let size = bytes.len() as u64;

    if size > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge {
            size,
            max: MAX_FILE_SIZE,
        });
    }
    if size < MIN_FILE_SIZE {
        return Err(ValidationError::TooSmall { size });
    }

    let extension = filename
        .rsplit('.')
        .next()
        .filter(|ext| *ext != filename)
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::UnsupportedExtension { extension });
    }

    if !has_valid_signature(bytes) {
        return Err(ValidationError::BadSignature);
    }

    Ok(())
}

/// Check the byte buffer against known image signatures
pub fn has_valid_signature(bytes: &[u8]) -> bool {
    MAGIC_BYTES.iter().any(|magic| bytes.starts_with(magic))
}

/// Sanitize a user-supplied filename.
///
/// Strips path components, drops everything outside word characters,
/// whitespace, dots and dashes, and truncates to [`MAX_FILENAME_LENGTH`].
/// Empty input becomes `unknown`.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let scrub = Regex::new(r"[^\w\s.-]").unwrap();
    let cleaned: String = scrub
        .replace_all(basename, "")
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .collect();

    if cleaned.trim().is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_payload(size: usize) -> Vec<u8> {
        let mut bytes = PNG_HEADER.to_vec();
        bytes.resize(size, 0);
        bytes
    }

    #[test]
    fn accepts_valid_png_upload() {
        let bytes = png_payload(500);
        assert!(validate_upload(&bytes, "photo.png").is_ok());
    }

    #[test]
    fn rejects_oversized_upload() {
        let bytes = png_payload((MAX_FILE_SIZE + 1) as usize);
        assert!(matches!(
            validate_upload(&bytes, "photo.png"),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn rejects_tiny_upload() {
        let bytes = png_payload(50);
        assert!(matches!(
            validate_upload(&bytes, "photo.png"),
            Err(ValidationError::TooSmall { .. })
        ));
    }

    #[test]
    fn rejects_unknown_extension() {
        let bytes = png_payload(500);
        assert!(matches!(
            validate_upload(&bytes, "archive.zip"),
            Err(ValidationError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn rejects_missing_extension() {
        let bytes = png_payload(500);
        assert!(matches!(
            validate_upload(&bytes, "photo"),
            Err(ValidationError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn rejects_spoofed_signature() {
        let mut bytes = vec![0u8; 500];
        bytes[0] = b'Z';
        assert!(matches!(
            validate_upload(&bytes, "photo.png"),
            Err(ValidationError::BadSignature)
        ));
    }

    #[test]
    fn sanitize_strips_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd.png"), "passwd.png");
        assert_eq!(sanitize_filename("C:\\Users\\me\\pic.jpg"), "pic.jpg");
    }

    #[test]
    fn sanitize_drops_shell_characters() {
        assert_eq!(sanitize_filename("pho$to;<>.png"), "photo.png");
    }

    #[test]
    fn sanitize_truncates_long_names() {
        let long = format!("{}.png", "a".repeat(500));
        assert_eq!(sanitize_filename(&long).len(), MAX_FILENAME_LENGTH);
    }

    #[test]
    fn sanitize_empty_becomes_unknown() {
        assert_eq!(sanitize_filename(""), "unknown");
        assert_eq!(sanitize_filename("$$$"), "unknown");
    }
}
