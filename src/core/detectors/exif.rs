//! EXIF presence analysis.
//!
//! Generated images usually carry no camera metadata at all, while real
//! photographs from cameras carry both device identification and exposure
//! settings. The two bands are mutually exclusive by definition: an empty
//! map cannot also contain camera fields.

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::metadata::ExifMap;

/// Tags identifying the capturing device
const CAMERA_TAGS: &[&str] = &["Make", "Model"];

/// Tags recording exposure settings (name variants across EXIF writers)
const EXPOSURE_TAGS: &[&str] = &[
    "ExposureTime",
    "FNumber",
    "ISOSpeedRatings",
    "ISO",
    "PhotographicSensitivity",
];

pub fn analyze(metadata: &ExifMap, weights: &WeightTable) -> Option<Finding> {
    if metadata.is_empty() {
        return Some(
            Finding::new(
                Category::Warning,
                "No EXIF metadata",
                "Generated images usually carry no camera data.",
                Polarity::Synthetic,
                scale_weight(weights.exif, 0.4),
            )
            .with_boost(15),
        );
    }

    let has_camera = CAMERA_TAGS.iter().any(|tag| metadata.contains_key(*tag));
    let has_exposure = EXPOSURE_TAGS.iter().any(|tag| metadata.contains_key(*tag));

    if has_camera && has_exposure {
        let camera = format!(
            "{} {}",
            metadata.get("Make").map(String::as_str).unwrap_or(""),
            metadata.get("Model").map(String::as_str).unwrap_or(""),
        )
        .trim()
        .to_string();

        return Some(
            Finding::new(
                Category::Good,
                "Genuine camera metadata",
                format!("Camera data from a real device: {}", camera),
                Polarity::Authentic,
                weights.exif,
            )
            .with_boost(25),
        );
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, &str)]) -> ExifMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_metadata_fires_synthetic() {
        let weights = WeightTable::default();
        let finding = analyze(&ExifMap::new(), &weights).unwrap();

        assert_eq!(finding.polarity, Polarity::Synthetic);
        assert_eq!(finding.weight, 48);
        assert_eq!(finding.confidence_boost, 15);
    }

    #[test]
    fn camera_and_exposure_fire_authentic() {
        let weights = WeightTable::default();
        let metadata = map_of(&[("Make", "Canon"), ("Model", "EOS5D"), ("ISO", "400")]);
        let finding = analyze(&metadata, &weights).unwrap();

        assert_eq!(finding.polarity, Polarity::Authentic);
        assert_eq!(finding.weight, 120);
        assert_eq!(finding.confidence_boost, 25);
        assert!(finding.explanation.contains("Canon EOS5D"));
    }

    #[test]
    fn photographic_sensitivity_counts_as_exposure() {
        let weights = WeightTable::default();
        let metadata = map_of(&[("Model", "X100V"), ("PhotographicSensitivity", "200")]);
        let finding = analyze(&metadata, &weights).unwrap();
        assert_eq!(finding.polarity, Polarity::Authentic);
    }

    #[test]
    fn camera_without_exposure_abstains() {
        let weights = WeightTable::default();
        let metadata = map_of(&[("Make", "Canon"), ("Model", "EOS5D")]);
        assert!(analyze(&metadata, &weights).is_none());
    }

    #[test]
    fn exposure_without_camera_abstains() {
        let weights = WeightTable::default();
        let metadata = map_of(&[("ExposureTime", "1/250"), ("FNumber", "2.8")]);
        assert!(analyze(&metadata, &weights).is_none());
    }

    #[test]
    fn unrelated_metadata_abstains() {
        let weights = WeightTable::default();
        let metadata = map_of(&[("Software", "Photoshop")]);
        assert!(analyze(&metadata, &weights).is_none());
    }
}
