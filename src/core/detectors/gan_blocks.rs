//! GAN block-artifact analysis.
//!
//! Generator upsampling leaves unnaturally uniform texture statistics:
//! the variance of every local block is about the same. Real scenes mix
//! flat sky, busy foliage, and everything between, so block variances
//! scatter widely.

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::DecodedImage;
use crate::core::ops;

/// Side length of the non-overlapping luma blocks
const BLOCK_SIZE: u32 = 16;

/// Both must hold for the synthetic band
const SYNTHETIC_MAX_VAR_OF_VARS: f64 = 500.0;
const SYNTHETIC_MAX_MEAN_VAR: f64 = 100.0;

/// Var-of-vars above this leans authentic
const AUTHENTIC_MIN_VAR_OF_VARS: f64 = 2000.0;

struct BlockStats {
    var_of_vars: f64,
    mean_var: f64,
}

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let stats = measure(image)?;
    decide(&stats, weights)
}

fn measure(image: &DecodedImage) -> Option<BlockStats> {
    let gray = &image.luma;
    let (width, height) = gray.dimensions();

    let mut block_vars = Vec::new();
    let mut y = 0;
    while y + BLOCK_SIZE < height {
        let mut x = 0;
        while x + BLOCK_SIZE < width {
            let mut pixels = Vec::with_capacity((BLOCK_SIZE * BLOCK_SIZE) as usize);
            for by in y..y + BLOCK_SIZE {
                for bx in x..x + BLOCK_SIZE {
                    pixels.push(gray.get_pixel(bx, by)[0] as f64);
                }
            }
            block_vars.push(ops::variance(&pixels));
            x += BLOCK_SIZE;
        }
        y += BLOCK_SIZE;
    }

    if block_vars.is_empty() {
        return None;
    }

    Some(BlockStats {
        var_of_vars: ops::variance(&block_vars),
        mean_var: ops::mean(&block_vars),
    })
}

fn decide(stats: &BlockStats, weights: &WeightTable) -> Option<Finding> {
    if stats.var_of_vars < SYNTHETIC_MAX_VAR_OF_VARS && stats.mean_var < SYNTHETIC_MAX_MEAN_VAR {
        Some(
            Finding::new(
                Category::High,
                "GAN block artifacts",
                "Uniform texture blocks typical of neural upsampling. Strong synthetic indicator.",
                Polarity::Synthetic,
                weights.gan_blocks,
            )
            .with_boost(25),
        )
    } else if stats.var_of_vars > AUTHENTIC_MIN_VAR_OF_VARS {
        Some(
            Finding::new(
                Category::Good,
                "Natural texture variation",
                "Block statistics scatter irregularly, as real scenes do.",
                Polarity::Authentic,
                scale_weight(weights.gan_blocks, 0.75),
            )
            .with_boost(20),
        )
    } else {
        None
    }
}
