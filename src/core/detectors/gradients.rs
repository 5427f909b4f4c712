//! Gradient-complexity analysis.
//!
//! Sobel magnitudes summarize how transitions behave across the frame:
//! over-smooth generated images produce a low, narrow gradient
//! distribution, while real scenes produce strong, varied transitions.

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::DecodedImage;
use crate::core::ops;

/// Bins of the gradient-magnitude histogram
const HISTOGRAM_BINS: usize = 50;

/// Synthetic band: gradients both weak and uniform
const SYNTHETIC_MAX_STD: f64 = 10.0;
const SYNTHETIC_MAX_ENTROPY: f64 = 3.0;

/// Authentic band: gradients both strong and varied
const AUTHENTIC_MIN_STD: f64 = 30.0;
const AUTHENTIC_MIN_ENTROPY: f64 = 4.0;

struct GradientStats {
    std: f64,
    entropy: f64,
}

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let stats = measure(image)?;
    decide(&stats, weights)
}

fn measure(image: &DecodedImage) -> Option<GradientStats> {
    let magnitudes = ops::sobel_magnitude(&image.luma);
    if magnitudes.is_empty() {
        return None;
    }

    Some(GradientStats {
        std: ops::std_dev(&magnitudes),
        entropy: ops::shannon_entropy(&ops::histogram(&magnitudes, HISTOGRAM_BINS)),
    })
}

fn decide(stats: &GradientStats, weights: &WeightTable) -> Option<Finding> {
    if stats.std < SYNTHETIC_MAX_STD && stats.entropy < SYNTHETIC_MAX_ENTROPY {
        Some(
            Finding::new(
                Category::Warning,
                "Smooth gradients",
                "Transitions are unusually uniform. May indicate generation.",
                Polarity::Synthetic,
                weights.gradients,
            )
            .with_boost(15),
        )
    } else if stats.std > AUTHENTIC_MIN_STD && stats.entropy > AUTHENTIC_MIN_ENTROPY {
        Some(
            Finding::new(
                Category::Good,
                "Complex gradients",
                "Transitions vary the way real scenes do.",
                Polarity::Authentic,
                scale_weight(weights.gradients, 0.7),
            )
            .with_boost(15),
        )
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn decoded(rgb: RgbImage) -> DecodedImage {
        DecodedImage::from_rgb(rgb)
    }

    #[test]
    fn flat_image_fires_synthetic() {
        let weights = WeightTable::default();
        let image = decoded(ImageBuffer::from_fn(64, 64, |_, _| Rgb([128, 128, 128])));
        let finding = analyze(&image, &weights).unwrap();

        assert_eq!(finding.polarity, Polarity::Synthetic);
        assert_eq!(finding.weight, 70);
        assert_eq!(finding.confidence_boost, 15);
    }

    #[test]
    fn tiny_image_abstains() {
        let weights = WeightTable::default();
        let image = decoded(ImageBuffer::from_fn(2, 2, |_, _| Rgb([0, 0, 0])));
        assert!(analyze(&image, &weights).is_none());
    }

    #[test]
    fn authentic_band_fires_on_strong_varied_gradients() {
        let weights = WeightTable::default();
        let stats = GradientStats {
            std: 45.0,
            entropy: 4.5,
        };
        let finding = decide(&stats, &weights).unwrap();
        assert_eq!(finding.polarity, Polarity::Authentic);
        assert_eq!(finding.weight, 49);
    }

    #[test]
    fn middle_band_abstains() {
        let weights = WeightTable::default();
        let stats = GradientStats {
            std: 20.0,
            entropy: 3.5,
        };
        assert!(decide(&stats, &weights).is_none());
    }

    #[test]
    fn bands_are_disjoint_by_std_thresholds() {
        assert!(SYNTHETIC_MAX_STD < AUTHENTIC_MIN_STD);
        assert!(SYNTHETIC_MAX_ENTROPY < AUTHENTIC_MIN_ENTROPY);
    }
}
