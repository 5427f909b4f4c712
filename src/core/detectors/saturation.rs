//! Saturation analysis.
//!
//! Generators favor vibrant, evenly saturated palettes; real photographs
//! sit lower on the saturation scale with much more spread. Measured on
//! the HSV saturation channel (0-255).

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::DecodedImage;
use crate::core::ops;

/// Synthetic band: saturation both very high and very even
const SYNTHETIC_MIN_MEAN: f64 = 180.0;
const SYNTHETIC_MAX_STD: f64 = 30.0;

/// Authentic band: moderate mean with wide spread
const AUTHENTIC_MIN_MEAN: f64 = 80.0;
const AUTHENTIC_MAX_MEAN: f64 = 150.0;
const AUTHENTIC_MIN_STD: f64 = 40.0;

struct SaturationStats {
    mean: f64,
    std: f64,
}

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let stats = measure(image)?;
    decide(&stats, weights)
}

fn measure(image: &DecodedImage) -> Option<SaturationStats> {
    let saturation = ops::saturation_channel(&image.rgb);
    if saturation.is_empty() {
        return None;
    }

    Some(SaturationStats {
        mean: ops::mean(&saturation),
        std: ops::std_dev(&saturation),
    })
}

fn decide(stats: &SaturationStats, weights: &WeightTable) -> Option<Finding> {
    if stats.mean > SYNTHETIC_MIN_MEAN && stats.std < SYNTHETIC_MAX_STD {
        Some(
            Finding::new(
                Category::Warning,
                "Oversaturated colors",
                "Saturation is uniformly vivid. Generators overdo vibrancy.",
                Polarity::Synthetic,
                weights.saturation,
            )
            .with_boost(10),
        )
    } else if stats.mean > AUTHENTIC_MIN_MEAN
        && stats.mean < AUTHENTIC_MAX_MEAN
        && stats.std > AUTHENTIC_MIN_STD
    {
        Some(
            Finding::new(
                Category::Good,
                "Natural saturation",
                "Saturation spreads the way real photographs do.",
                Polarity::Authentic,
                scale_weight(weights.saturation, 0.6),
            )
            .with_boost(10),
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
    fn vivid_uniform_image_fires_synthetic() {
        let weights = WeightTable::default();
        // S = (255 - 20) * 255 / 255 = 235 for every pixel
        let image = decoded(ImageBuffer::from_fn(32, 32, |_, _| Rgb([255, 20, 20])));
        let finding = analyze(&image, &weights).unwrap();

        assert_eq!(finding.polarity, Polarity::Synthetic);
        assert_eq!(finding.weight, 55);
        assert_eq!(finding.confidence_boost, 10);
    }

    #[test]
    fn mixed_saturation_fires_authentic() {
        let weights = WeightTable::default();
        // Halves at S = 60 and S = 170: mean 115, spread 55
        let image = decoded(ImageBuffer::from_fn(32, 32, |x, _| {
            if x < 16 {
                Rgb([255, 195, 195])
            } else {
                Rgb([255, 85, 85])
            }
        }));
        let finding = analyze(&image, &weights).unwrap();

        assert_eq!(finding.polarity, Polarity::Authentic);
        assert_eq!(finding.weight, 33);
        assert_eq!(finding.confidence_boost, 10);
    }

    #[test]
    fn gray_image_abstains() {
        let weights = WeightTable::default();
        // Zero saturation lands in neither band
        let image = decoded(ImageBuffer::from_fn(16, 16, |_, _| Rgb([128, 128, 128])));
        assert!(analyze(&image, &weights).is_none());
    }

    #[test]
    fn middle_band_abstains() {
        let weights = WeightTable::default();
        let stats = SaturationStats {
            mean: 160.0,
            std: 35.0,
        };
        assert!(decide(&stats, &weights).is_none());
    }

    #[test]
    fn bands_are_disjoint_by_mean_ranges() {
        // Synthetic needs mean > 180, authentic needs mean < 150
        assert!(AUTHENTIC_MAX_MEAN < SYNTHETIC_MIN_MEAN);
    }
}
