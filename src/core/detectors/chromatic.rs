//! Chromatic-aberration analysis.
//!
//! Real lenses never focus all wavelengths identically, so edges in the
//! red channel land slightly off the edges in green and blue. Generators
//! work in a color space with no optics, leaving the channels perfectly
//! aligned.

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::DecodedImage;
use crate::core::ops;
use image::GrayImage;

/// Mean edge-map difference above this leans authentic
const AUTHENTIC_MIN_DIFF: f64 = 2.0;

/// Mean edge-map difference below this leans synthetic
const SYNTHETIC_MAX_DIFF: f64 = 0.5;

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let aberration = measure(image)?;
    decide(aberration, weights)
}

/// Mean absolute difference between the red edge map and the green/blue ones
fn measure(image: &DecodedImage) -> Option<f64> {
    let rgb = &image.rgb;
    let (width, height) = rgb.dimensions();
    if width < 3 || height < 3 {
        return None;
    }

    let extract = |channel: usize| -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            image::Luma([rgb.get_pixel(x, y)[channel]])
        })
    };

    let edges_r = ops::edge_map(&extract(0));
    let edges_g = ops::edge_map(&extract(1));
    let edges_b = ops::edge_map(&extract(2));

    let diff_rg = mean_abs_diff(&edges_r, &edges_g);
    let diff_rb = mean_abs_diff(&edges_r, &edges_b);

    Some((diff_rg + diff_rb) / 2.0)
}

fn mean_abs_diff(a: &GrayImage, b: &GrayImage) -> f64 {
    let n = (a.width() * a.height()) as f64;
    let sum: f64 = a
        .pixels()
        .zip(b.pixels())
        .map(|(pa, pb)| (pa[0] as f64 - pb[0] as f64).abs())
        .sum();
    sum / n
}

fn decide(aberration: f64, weights: &WeightTable) -> Option<Finding> {
    if aberration > AUTHENTIC_MIN_DIFF {
        Some(
            Finding::new(
                Category::Good,
                "Chromatic aberration",
                "Channel edges are slightly misaligned, as real lens optics produce.",
                Polarity::Authentic,
                weights.chromatic,
            )
            .with_boost(15),
        )
    } else if aberration < SYNTHETIC_MAX_DIFF {
        Some(
            Finding::new(
                Category::Warning,
                "Perfect channel alignment",
                "Color channels align exactly. Rare in photographs taken through glass.",
                Polarity::Synthetic,
                scale_weight(weights.chromatic, 0.6),
            )
            .with_boost(12),
        )
    } else {
        None
    }
}
