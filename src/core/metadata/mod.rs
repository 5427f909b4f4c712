//! # Metadata Module
//!
//! Extracts EXIF metadata from image bytes as a flat tag-name → value map,
//! and sanitizes it before it may appear in an analysis result.
//!
//! ## Privacy contract
//! Sanitization removes location, ownership, and serial-number tags and
//! truncates every retained value to 200 characters. Sensitive keys must
//! never reach the output regardless of source data.

use exif::{In, Reader, Value};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Flat EXIF tag-name → rendered-value map
pub type ExifMap = BTreeMap<String, String>;

/// Maximum length of a sanitized metadata value
pub const MAX_VALUE_LENGTH: usize = 200;

/// EXIF keys that are stripped before results leave the engine
const SENSITIVE_KEYS: &[&str] = &[
    "GPSInfo",
    "GPSLatitude",
    "GPSLongitude",
    "GPSAltitude",
    "GPSLatitudeRef",
    "GPSLongitudeRef",
    "GPSAltitudeRef",
    "Artist",
    "Copyright",
    "OwnerName",
    "CameraOwnerName",
    "SerialNumber",
    "BodySerialNumber",
    "LensSerialNumber",
];

/// Extract EXIF metadata from raw image bytes.
///
/// Any failure (no EXIF container, parse error) yields an empty map rather
/// than an error; missing metadata is itself a detector signal.
pub fn extract_metadata(bytes: &[u8]) -> ExifMap {
    let mut metadata = ExifMap::new();

    let mut cursor = Cursor::new(bytes);
    let exif_reader = match Reader::new().read_from_container(&mut cursor) {
        Ok(r) => r,
        Err(_) => return metadata,
    };

    for field in exif_reader.fields() {
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        let key = field.tag.to_string();
        let value = render_value(&field.value)
            .unwrap_or_else(|| field.display_value().to_string());
        metadata.insert(key, value);
    }

    metadata
}

/// Remove sensitive keys and truncate values for safe output
pub fn sanitize_metadata(metadata: &ExifMap) -> ExifMap {
    metadata
        .iter()
        .filter(|(key, _)| !SENSITIVE_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), truncate_value(value)))
        .collect()
}

fn truncate_value(value: &str) -> String {
    value.chars().take(MAX_VALUE_LENGTH).collect()
}

/// Render ASCII values as plain trimmed strings; other types fall back to
/// the library's display formatting
fn render_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_from_garbage_returns_empty() {
        let metadata = extract_metadata(b"not an image at all");
        assert!(metadata.is_empty());
    }

    #[test]
    fn extract_from_plain_png_returns_empty() {
        // PNG without an eXIf chunk carries no EXIF container
        let png_header: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        let metadata = extract_metadata(png_header);
        assert!(metadata.is_empty());
    }

    #[test]
    fn sanitize_removes_every_sensitive_key() {
        let mut metadata = ExifMap::new();
        for key in SENSITIVE_KEYS {
            metadata.insert(key.to_string(), "secret".to_string());
        }
        metadata.insert("Make".to_string(), "Canon".to_string());

        let sanitized = sanitize_metadata(&metadata);

        for key in SENSITIVE_KEYS {
            assert!(!sanitized.contains_key(*key), "{} leaked through", key);
        }
        assert_eq!(sanitized.get("Make"), Some(&"Canon".to_string()));
    }

    #[test]
    fn sanitize_truncates_adversarial_values() {
        let mut metadata = ExifMap::new();
        metadata.insert("UserComment".to_string(), "x".repeat(5000));

        let sanitized = sanitize_metadata(&metadata);

        assert_eq!(sanitized.get("UserComment").unwrap().len(), MAX_VALUE_LENGTH);
    }

    #[test]
    fn sanitize_keeps_short_values_intact() {
        let mut metadata = ExifMap::new();
        metadata.insert("Model".to_string(), "EOS R5".to_string());

        let sanitized = sanitize_metadata(&metadata);

        assert_eq!(sanitized.get("Model"), Some(&"EOS R5".to_string()));
    }

    #[test]
    fn sanitize_of_empty_map_is_empty() {
        assert!(sanitize_metadata(&ExifMap::new()).is_empty());
    }
}
