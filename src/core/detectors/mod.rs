//! # Detectors Module
//!
//! The twelve heuristic analyzers and the finding model they share.
//!
//! Every detector is a pure function over read-only input that returns at
//! most one [`Finding`]: a measurement landing in a synthetic-leaning or
//! authentic-leaning band fires, the ambiguous middle band abstains, and
//! a measurement that cannot be computed abstains too. Bands within one
//! detector are disjoint by construction, so at most one can match.
//!
//! ## Evaluation order (fixed)
//! filename, exif, frequency, gan_blocks, sharpness, jpeg_grid, noise,
//! color, gradients, chromatic, edges, saturation.

use serde::{Deserialize, Serialize};

pub mod chromatic;
pub mod color;
pub mod edges;
pub mod exif;
pub mod filename;
pub mod frequency;
pub mod gan_blocks;
pub mod gradients;
pub mod jpeg_grid;
pub mod noise;
pub mod saturation;
pub mod sharpness;

/// Confidence boost applied when a detector fires without a specific value
pub const DEFAULT_CONFIDENCE_BOOST: u32 = 15;

/// Severity label for presentation; not used in scoring math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Critical,
    High,
    Warning,
    Good,
    Error,
}

/// Which accumulator a finding's weight feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Synthetic,
    Authentic,
}

/// One detector's fired verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub category: Category,
    pub title: String,
    pub explanation: String,
    pub polarity: Polarity,
    pub weight: u32,
    pub confidence_boost: u32,
}

impl Finding {
    /// Create a finding with the default confidence boost
    pub fn new(
        category: Category,
        title: impl Into<String>,
        explanation: impl Into<String>,
        polarity: Polarity,
        weight: u32,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            explanation: explanation.into(),
            polarity,
            weight,
            confidence_boost: DEFAULT_CONFIDENCE_BOOST,
        }
    }

    /// Override the confidence boost
    pub fn with_boost(mut self, boost: u32) -> Self {
        self.confidence_boost = boost;
        self
    }
}

/// Per-detector base weights.
///
/// Process-wide immutable configuration: constructed once, passed by
/// reference into the aggregator, never mutated. Band multipliers are
/// applied by the detectors themselves via [`scale_weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightTable {
    pub filename: u32,
    pub exif: u32,
    pub frequency: u32,
    pub gan_blocks: u32,
    pub sharpness: u32,
    pub jpeg_grid: u32,
    pub noise: u32,
    pub color: u32,
    pub gradients: u32,
    pub chromatic: u32,
    pub edges: u32,
    pub saturation: u32,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            filename: 180,
            exif: 120,
            frequency: 100,
            gan_blocks: 95,
            sharpness: 90,
            jpeg_grid: 85,
            noise: 80,
            color: 75,
            gradients: 70,
            chromatic: 65,
            edges: 60,
            saturation: 55,
        }
    }
}

/// Apply a band multiplier to a base weight.
///
/// Rounds to nearest: this reproduces every documented band weight,
/// including 90 x 0.7 = 63 where float truncation would give 62.
pub fn scale_weight(base: u32, multiplier: f64) -> u32 {
    (base as f64 * multiplier).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_defaults_to_standard_boost() {
        let finding = Finding::new(
            Category::High,
            "Test",
            "Explanation",
            Polarity::Synthetic,
            100,
        );
        assert_eq!(finding.confidence_boost, DEFAULT_CONFIDENCE_BOOST);
    }

    #[test]
    fn with_boost_overrides_default() {
        let finding = Finding::new(Category::Good, "Test", "E", Polarity::Authentic, 50)
            .with_boost(25);
        assert_eq!(finding.confidence_boost, 25);
    }

    #[test]
    fn scale_weight_reproduces_the_band_table() {
        assert_eq!(scale_weight(180, 0.6), 108);
        assert_eq!(scale_weight(120, 0.4), 48);
        assert_eq!(scale_weight(100, 0.85), 85);
        assert_eq!(scale_weight(95, 0.75), 71);
        assert_eq!(scale_weight(90, 0.7), 63);
        assert_eq!(scale_weight(85, 0.6), 51);
        assert_eq!(scale_weight(85, 0.8), 68);
        assert_eq!(scale_weight(80, 0.8), 64);
        assert_eq!(scale_weight(75, 0.75), 56);
        assert_eq!(scale_weight(70, 0.7), 49);
        assert_eq!(scale_weight(65, 0.6), 39);
        assert_eq!(scale_weight(60, 0.7), 42);
        assert_eq!(scale_weight(55, 0.6), 33);
    }

    #[test]
    fn finding_serializes_camel_case() {
        let finding = Finding::new(Category::Critical, "T", "E", Polarity::Synthetic, 180)
            .with_boost(30);
        let json = serde_json::to_string(&finding).unwrap();
        assert!(json.contains("\"confidenceBoost\":30"));
        assert!(json.contains("\"polarity\":\"synthetic\""));
        assert!(json.contains("\"category\":\"critical\""));
    }
}
