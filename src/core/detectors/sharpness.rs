//! Sharpness analysis.
//!
//! Post-hoc sharpening in generators produces edges that are both very
//! strong and very uniform: high Laplacian variance with a narrow response
//! histogram. Real lenses leave a moderate variance spread across a wide
//! histogram (focus falloff, depth of field).

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::DecodedImage;
use crate::core::ops;

/// Bins of the Laplacian-response histogram
const HISTOGRAM_BINS: usize = 50;

/// Synthetic band: variance above this with entropy below the cap
const SYNTHETIC_MIN_VARIANCE: f64 = 1500.0;
const SYNTHETIC_MAX_ENTROPY: f64 = 2.5;

/// Authentic band: variance inside this range with entropy above the floor
const AUTHENTIC_MIN_VARIANCE: f64 = 200.0;
const AUTHENTIC_MAX_VARIANCE: f64 = 800.0;
const AUTHENTIC_MIN_ENTROPY: f64 = 3.0;

struct SharpnessStats {
    variance: f64,
    entropy: f64,
}

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let stats = measure(image)?;
    decide(&stats, weights)
}

fn measure(image: &DecodedImage) -> Option<SharpnessStats> {
    let laplacian = ops::laplacian_map(&image.luma);
    if laplacian.is_empty() {
        return None;
    }

    let variance = ops::variance(&laplacian);
    let entropy = ops::shannon_entropy(&ops::histogram(&laplacian, HISTOGRAM_BINS));

    Some(SharpnessStats { variance, entropy })
}

fn decide(stats: &SharpnessStats, weights: &WeightTable) -> Option<Finding> {
    if stats.variance > SYNTHETIC_MIN_VARIANCE && stats.entropy < SYNTHETIC_MAX_ENTROPY {
        Some(
            Finding::new(
                Category::High,
                "Artificial sharpness",
                "Edges are uniformly strong everywhere. Real cameras vary with focus.",
                Polarity::Synthetic,
                weights.sharpness,
            )
            .with_boost(20),
        )
    } else if stats.variance > AUTHENTIC_MIN_VARIANCE
        && stats.variance < AUTHENTIC_MAX_VARIANCE
        && stats.entropy > AUTHENTIC_MIN_ENTROPY
    {
        Some(
            Finding::new(
                Category::Good,
                "Natural sharpness",
                "Focus varies across the frame the way camera optics do.",
                Polarity::Authentic,
                scale_weight(weights.sharpness, 0.7),
            )
            .with_boost(20),
        )
    } else {
        None
    }
}
