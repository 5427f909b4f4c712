//! Noise-consistency analysis.
//!
//! Camera sensor noise varies across the frame (shadows are noisier than
//! highlights); generated noise is synthesized and comes out eerily even.
//! The Laplacian response spread is measured independently in the four
//! quadrants and compared.

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::DecodedImage;
use crate::core::ops;
use image::imageops;

/// Synthetic band: quadrant noise levels both uniform and low
const SYNTHETIC_MAX_STD: f64 = 1.0;
const SYNTHETIC_MAX_MEAN: f64 = 5.0;

/// Authentic band: quadrant noise levels both varied and substantial
const AUTHENTIC_MIN_STD: f64 = 3.0;
const AUTHENTIC_MIN_MEAN: f64 = 8.0;

struct NoiseStats {
    cross_quadrant_std: f64,
    mean_level: f64,
}

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let stats = measure(image)?;
    decide(&stats, weights)
}

fn measure(image: &DecodedImage) -> Option<NoiseStats> {
    let gray = &image.luma;
    let (width, height) = gray.dimensions();
    let (half_w, half_h) = (width / 2, height / 2);

    if half_w == 0 || half_h == 0 {
        return None;
    }

    let quadrants = [
        (0, 0, half_w, half_h),
        (half_w, 0, width - half_w, half_h),
        (0, half_h, half_w, height - half_h),
        (half_w, half_h, width - half_w, height - half_h),
    ];

    let noise_levels: Vec<f64> = quadrants
        .iter()
        .map(|&(x, y, w, h)| {
            let view = imageops::crop_imm(gray, x, y, w, h).to_image();
            ops::std_dev(&ops::laplacian_map(&view))
        })
        .collect();

    Some(NoiseStats {
        cross_quadrant_std: ops::std_dev(&noise_levels),
        mean_level: ops::mean(&noise_levels),
    })
}

fn decide(stats: &NoiseStats, weights: &WeightTable) -> Option<Finding> {
    if stats.cross_quadrant_std < SYNTHETIC_MAX_STD && stats.mean_level < SYNTHETIC_MAX_MEAN {
        Some(
            Finding::new(
                Category::High,
                "Uniform synthetic noise",
                "Noise is identical in every quadrant. Generators synthesize their grain.",
                Polarity::Synthetic,
                weights.noise,
            )
            .with_boost(20),
        )
    } else if stats.cross_quadrant_std > AUTHENTIC_MIN_STD && stats.mean_level > AUTHENTIC_MIN_MEAN
    {
        Some(
            Finding::new(
                Category::Good,
                "Natural sensor noise",
                "Noise varies across the frame the way real sensors behave.",
                Polarity::Authentic,
                scale_weight(weights.noise, 0.8),
            )
            .with_boost(20),
        )
    } else {
        None
    }
}
