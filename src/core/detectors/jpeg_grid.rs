//! JPEG grid analysis.
//!
//! JPEG compression leaves measurable discontinuities along the 8x8 block
//! grid. Their presence argues for a camera-pipeline photograph; their
//! total absence is mildly suspicious, since most generated images are
//! exported without the characteristic grid.

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::DecodedImage;
use crate::core::ops;

/// JPEG block period
const GRID_STEP: u32 = 8;

/// Mean boundary difference below this leans synthetic
const SYNTHETIC_MAX_DIFF: f64 = 0.5;

/// Mean boundary difference above this leans authentic
const AUTHENTIC_MIN_DIFF: f64 = 3.0;

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let avg = measure(image)?;
    decide(avg, weights)
}

/// Mean absolute luma difference across rows at 8-pixel-aligned boundaries
fn measure(image: &DecodedImage) -> Option<f64> {
    let gray = &image.luma;
    let (width, height) = gray.dimensions();

    let mut boundary_diffs = Vec::new();
    let mut y = GRID_STEP;
    while y + GRID_STEP < height {
        let mut row_diffs = Vec::with_capacity(width as usize);
        for x in 0..width {
            let current = gray.get_pixel(x, y)[0] as f64;
            let above = gray.get_pixel(x, y - 1)[0] as f64;
            row_diffs.push((current - above).abs());
        }
        boundary_diffs.push(ops::mean(&row_diffs));
        y += GRID_STEP;
    }

    if boundary_diffs.is_empty() {
        return None;
    }

    Some(ops::mean(&boundary_diffs))
}

fn decide(avg: f64, weights: &WeightTable) -> Option<Finding> {
    if avg > AUTHENTIC_MIN_DIFF {
        Some(
            Finding::new(
                Category::Good,
                "JPEG compression artifacts",
                "The 8x8 compression grid is visible, as in camera-pipeline photos.",
                Polarity::Authentic,
                scale_weight(weights.jpeg_grid, 0.8),
            )
            .with_boost(20),
        )
    } else if avg < SYNTHETIC_MAX_DIFF {
        Some(
            Finding::new(
                Category::Warning,
                "No JPEG artifacts",
                "No trace of the compression grid. May indicate a generated export.",
                Polarity::Synthetic,
                scale_weight(weights.jpeg_grid, 0.6),
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
        assert_eq!(finding.weight, 51);
        assert_eq!(finding.confidence_boost, 15);
    }

    #[test]
    fn banded_image_fires_authentic() {
        let weights = WeightTable::default();
        // Luma jumps at every 8th row, mimicking a strong block grid
        let image = decoded(ImageBuffer::from_fn(64, 64, |_, y| {
            if y % 8 == 0 {
                Rgb([200, 200, 200])
            } else {
                Rgb([100, 100, 100])
            }
        }));
        let finding = analyze(&image, &weights).unwrap();

        assert_eq!(finding.polarity, Polarity::Authentic);
        assert_eq!(finding.weight, 68);
        assert_eq!(finding.confidence_boost, 20);
    }

    #[test]
    fn short_image_abstains() {
        let weights = WeightTable::default();
        let image = decoded(ImageBuffer::from_fn(64, 12, |_, _| Rgb([128, 128, 128])));
        assert!(analyze(&image, &weights).is_none());
    }

    #[test]
    fn middle_band_abstains() {
        let weights = WeightTable::default();
        assert!(decide(1.5, &weights).is_none());
        assert!(decide(0.5, &weights).is_none());
        assert!(decide(3.0, &weights).is_none());
    }

    #[test]
    fn bands_are_disjoint_by_threshold_order() {
        assert!(SYNTHETIC_MAX_DIFF < AUTHENTIC_MIN_DIFF);
    }
}
