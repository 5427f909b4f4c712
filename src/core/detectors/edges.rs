//! Edge-coherence analysis.
//!
//! Real object boundaries produce long connected edge chains of wildly
//! different sizes; generator artifacts tend to fragment into many tiny,
//! similar pieces. The edge map is decomposed into 8-connected components
//! and their areas summarized.

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::DecodedImage;
use crate::core::ops;

/// Synthetic band: components both tiny and uniform
const SYNTHETIC_MAX_STD: f64 = 5.0;
const SYNTHETIC_MAX_MEAN: f64 = 10.0;

/// Authentic band: components both large and varied
const AUTHENTIC_MIN_STD: f64 = 50.0;
const AUTHENTIC_MIN_MEAN: f64 = 30.0;

struct ComponentStats {
    mean_area: f64,
    area_std: f64,
}

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let stats = measure(image)?;
    decide(&stats, weights)
}

fn measure(image: &DecodedImage) -> Option<ComponentStats> {
    let edges = ops::edge_map(&image.luma);
    let sizes = ops::connected_component_sizes(&edges);

    if sizes.is_empty() {
        return None;
    }

    Some(ComponentStats {
        mean_area: ops::mean(&sizes),
        area_std: ops::std_dev(&sizes),
    })
}

fn decide(stats: &ComponentStats, weights: &WeightTable) -> Option<Finding> {
    if stats.area_std < SYNTHETIC_MAX_STD && stats.mean_area < SYNTHETIC_MAX_MEAN {
        Some(
            Finding::new(
                Category::Warning,
                "Fragmented edges",
                "Edges break into many small disconnected pieces. Typical of artifacts.",
                Polarity::Synthetic,
                weights.edges,
            )
            .with_boost(12),
        )
    } else if stats.area_std > AUTHENTIC_MIN_STD && stats.mean_area > AUTHENTIC_MIN_MEAN {
        Some(
            Finding::new(
                Category::Good,
                "Natural edge structure",
                "Edges connect into long, varied boundaries, as real objects produce.",
                Polarity::Authentic,
                scale_weight(weights.edges, 0.7),
            )
            .with_boost(12),
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
    fn flat_image_abstains() {
        let weights = WeightTable::default();
        // Empty edge map: preconditions cannot be computed
        let image = decoded(ImageBuffer::from_fn(64, 64, |_, _| Rgb([128, 128, 128])));
        assert!(analyze(&image, &weights).is_none());
    }

    #[test]
    fn scattered_dots_fire_synthetic() {
        let weights = WeightTable::default();
        // Isolated bright pixels on black: each produces one tiny edge ring,
        // all the same size
        let image = decoded(ImageBuffer::from_fn(64, 64, |x, y| {
            if x % 8 == 4 && y % 8 == 4 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        }));
        let finding = analyze(&image, &weights).unwrap();

        assert_eq!(finding.polarity, Polarity::Synthetic);
        assert_eq!(finding.weight, 60);
        assert_eq!(finding.confidence_boost, 12);
    }

    #[test]
    fn authentic_band_fires_on_large_varied_components() {
        let weights = WeightTable::default();
        let stats = ComponentStats {
            mean_area: 80.0,
            area_std: 120.0,
        };
        let finding = decide(&stats, &weights).unwrap();
        assert_eq!(finding.polarity, Polarity::Authentic);
        assert_eq!(finding.weight, 42);
    }

    #[test]
    fn middle_band_abstains() {
        let weights = WeightTable::default();
        let stats = ComponentStats {
            mean_area: 20.0,
            area_std: 25.0,
        };
        assert!(decide(&stats, &weights).is_none());
    }

    #[test]
    fn bands_are_disjoint_by_threshold_order() {
        assert!(SYNTHETIC_MAX_STD < AUTHENTIC_MIN_STD);
        assert!(SYNTHETIC_MAX_MEAN < AUTHENTIC_MIN_MEAN);
    }
}
