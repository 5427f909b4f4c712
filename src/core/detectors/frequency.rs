//! Frequency-spectrum analysis.
//!
//! Generators produce artificially smooth images whose energy concentrates
//! in low frequencies; camera sensors spread energy further out. The luma
//! plane is resized to a fixed power-of-two grid, transformed with a 2-D
//! FFT, and the mean log-magnitude of a low-frequency center window is
//! compared against the highest-frequency rows.

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use crate::core::decoder::{self, DecodedImage};
use crate::core::ops;

/// FFT input size (power of two for the radix-2 transform)
const SPECTRUM_SIZE: u32 = 256;

/// Half-extent of the low-frequency center window (60x60 total)
const CENTER_HALF: usize = 30;

/// Rows taken from the top and bottom as the high-frequency band
const BAND_ROWS: usize = 30;

/// Low/high ratio above this leans synthetic
const SYNTHETIC_RATIO: f64 = 15.0;

/// Low/high ratio below this leans authentic
const AUTHENTIC_RATIO: f64 = 5.0;

pub fn analyze(image: &DecodedImage, weights: &WeightTable) -> Option<Finding> {
    let ratio = measure(image)?;
    decide(ratio, weights)
}

/// Ratio of mean center-window magnitude to mean top/bottom-band magnitude
fn measure(image: &DecodedImage) -> Option<f64> {
    let resized = decoder::resize_luma(&image.luma, SPECTRUM_SIZE, SPECTRUM_SIZE).ok()?;
    let spectrum = ops::log_magnitude_spectrum(&resized);

    let height = spectrum.len();
    let width = spectrum[0].len();
    let (center_y, center_x) = (height / 2, width / 2);

    let mut low_sum = 0.0;
    for row in spectrum.iter().take(center_y + CENTER_HALF).skip(center_y - CENTER_HALF) {
        for &v in row.iter().take(center_x + CENTER_HALF).skip(center_x - CENTER_HALF) {
            low_sum += v;
        }
    }
    let low_mean = low_sum / (2 * CENTER_HALF * 2 * CENTER_HALF) as f64;

    let mut high_sum = 0.0;
    let mut high_count = 0usize;
    for row in spectrum.iter().take(BAND_ROWS).chain(spectrum.iter().skip(height - BAND_ROWS)) {
        for &v in row {
            high_sum += v;
            high_count += 1;
        }
    }
    let high_mean = high_sum / high_count as f64;

    Some(low_mean / (high_mean + 1e-10))
}

fn decide(ratio: f64, weights: &WeightTable) -> Option<Finding> {
    if ratio > SYNTHETIC_RATIO {
        Some(
            Finding::new(
                Category::High,
                "Artificial frequency spectrum",
                format!(
                    "Low frequencies dominate (ratio: {:.1}). Generated images are artificially smooth.",
                    ratio
                ),
                Polarity::Synthetic,
                weights.frequency,
            )
            .with_boost(25),
        )
    } else if ratio < AUTHENTIC_RATIO {
        Some(
            Finding::new(
                Category::Good,
                "Natural frequency distribution",
                format!(
                    "Balanced spectrum (ratio: {:.1}). Typical of real photographs.",
                    ratio
                ),
                Polarity::Authentic,
                scale_weight(weights.frequency, 0.85),
            )
            .with_boost(25),
        )
    } else {
        None
    }
}
