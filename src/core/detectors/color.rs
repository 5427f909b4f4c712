//! Color-distribution analysis.
//!
//! Generators tend to produce over-harmonized palettes where the R/G/B
//! channels move in lockstep; real scenes mix independent light sources.
//! Channels are compared over a deterministic pixel sample (an even stride
//! rather than a random draw, so repeated analysis of the same image
//! always measures the same thing).

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::DecodedImage;
use crate::core::ops;

/// Upper bound on sampled pixels
const SAMPLE_SIZE: usize = 10_000;

/// Synthetic band: channels near-lockstep with a narrow red histogram
const SYNTHETIC_MIN_CORRELATION: f64 = 0.95;
const SYNTHETIC_MAX_ENTROPY: f64 = 6.0;

/// Authentic band: channels decorrelated with a wide red histogram
const AUTHENTIC_MAX_CORRELATION: f64 = 0.75;
const AUTHENTIC_MIN_ENTROPY: f64 = 7.0;

struct ColorStats {
    mean_correlation: f64,
    red_entropy: f64,
}

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let stats = measure(image)?;
    decide(&stats, weights)
}

fn measure(image: &DecodedImage) -> Option<ColorStats> {
    let rgb = &image.rgb;
    let total = (rgb.width() * rgb.height()) as usize;
    if total == 0 {
        return None;
    }

    let stride = (total / SAMPLE_SIZE).max(1);
    let mut red = Vec::with_capacity(SAMPLE_SIZE.min(total));
    let mut green = Vec::with_capacity(SAMPLE_SIZE.min(total));
    let mut blue = Vec::with_capacity(SAMPLE_SIZE.min(total));

    for pixel in rgb.pixels().step_by(stride) {
        red.push(pixel[0] as f64);
        green.push(pixel[1] as f64);
        blue.push(pixel[2] as f64);
    }

    let corr_rg = ops::pearson_correlation(&red, &green)?;
    let corr_rb = ops::pearson_correlation(&red, &blue)?;
    let corr_gb = ops::pearson_correlation(&green, &blue)?;
    let mean_correlation = (corr_rg + corr_rb + corr_gb) / 3.0;

    // 256-bin histogram of the full red channel (fixed value range)
    let mut red_hist = [0u64; 256];
    for pixel in rgb.pixels() {
        red_hist[pixel[0] as usize] += 1;
    }
    let red_entropy = ops::shannon_entropy(&red_hist);

    Some(ColorStats {
        mean_correlation,
        red_entropy,
    })
}

fn decide(stats: &ColorStats, weights: &WeightTable) -> Option<Finding> {
    if stats.mean_correlation > SYNTHETIC_MIN_CORRELATION
        && stats.red_entropy < SYNTHETIC_MAX_ENTROPY
    {
        Some(
            Finding::new(
                Category::High,
                "Artificially correlated colors",
                "Channels move in lockstep. Generated palettes are over-harmonized.",
                Polarity::Synthetic,
                weights.color,
            )
            .with_boost(20),
        )
    } else if stats.mean_correlation < AUTHENTIC_MAX_CORRELATION
        && stats.red_entropy > AUTHENTIC_MIN_ENTROPY
    {
        Some(
            Finding::new(
                Category::Good,
                "Natural color distribution",
                "Channels vary independently, as mixed real lighting does.",
                Polarity::Authentic,
                scale_weight(weights.color, 0.75),
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
    fn lockstep_gradient_fires_synthetic() {
        let weights = WeightTable::default();
        // R = G = B everywhere: perfect correlation, concentrated histogram
        let image = decoded(ImageBuffer::from_fn(100, 100, |x, _| {
            let v = (x % 100) as u8;
            Rgb([v, v, v])
        }));
        let finding = analyze(&image, &weights).unwrap();

        assert_eq!(finding.polarity, Polarity::Synthetic);
        assert_eq!(finding.weight, 75);
        assert_eq!(finding.confidence_boost, 20);
    }

    #[test]
    fn flat_image_abstains() {
        let weights = WeightTable::default();
        // Constant channels have no defined correlation
        let image = decoded(ImageBuffer::from_fn(32, 32, |_, _| Rgb([128, 128, 128])));
        assert!(analyze(&image, &weights).is_none());
    }

    #[test]
    fn authentic_band_fires_on_decorrelated_wide_histogram() {
        let weights = WeightTable::default();
        let stats = ColorStats {
            mean_correlation: 0.5,
            red_entropy: 7.5,
        };
        let finding = decide(&stats, &weights).unwrap();
        assert_eq!(finding.polarity, Polarity::Authentic);
        assert_eq!(finding.weight, 56);
    }

    #[test]
    fn middle_band_abstains() {
        let weights = WeightTable::default();
        let stats = ColorStats {
            mean_correlation: 0.85,
            red_entropy: 6.5,
        };
        assert!(decide(&stats, &weights).is_none());
    }

    #[test]
    fn bands_are_disjoint_by_correlation_thresholds() {
        assert!(AUTHENTIC_MAX_CORRELATION < SYNTHETIC_MIN_CORRELATION);
    }

    #[test]
    fn sampling_is_deterministic() {
        let image = decoded(ImageBuffer::from_fn(200, 200, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }));
        let first = measure(&image).unwrap();
        let second = measure(&image).unwrap();
        assert_eq!(first.mean_correlation, second.mean_correlation);
        assert_eq!(first.red_entropy, second.red_entropy);
    }
}
