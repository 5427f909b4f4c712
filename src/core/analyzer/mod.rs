//! # Analyzer Module
//!
//! The aggregator: runs the twelve detectors over one decoded image and
//! folds their findings into a single probabilistic verdict.
//!
//! ## Contract
//! `analyze` never fails. Decode problems degrade to a result carrying a
//! single error finding (probability 50, confidence 0); a detector whose
//! measurement cannot be computed simply contributes nothing. Findings
//! always appear in the fixed evaluation order: filename, exif, frequency,
//! gan_blocks, sharpness, jpeg_grid, noise, color, gradients, chromatic,
//! edges, saturation - detectors may run in parallel, but completion order
//! never leaks into the output.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::decoder::{self, DecodedImage};
use crate::core::detectors::{
    chromatic, color, edges, exif, filename, frequency, gan_blocks, gradients, jpeg_grid, noise,
    saturation, sharpness, Category, Finding, Polarity, WeightTable,
};
use crate::core::ingest;
use crate::core::metadata::{self, ExifMap};

/// Weight accumulators per polarity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub synthetic: u32,
    pub authentic: u32,
}

/// Aggregate output of one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub findings: Vec<Finding>,
    pub scores: Scores,
    pub confidence: u32,
    pub synthetic_probability: f64,
    pub metadata: ExifMap,
}

impl AnalysisResult {
    /// The degenerate result returned when the image cannot be processed.
    ///
    /// Carries no detail about what went wrong: internal failure modes are
    /// not part of the output contract.
    fn processing_error() -> Self {
        let finding = Finding {
            category: Category::Error,
            title: "Processing error".to_string(),
            explanation: "This image could not be analyzed.".to_string(),
            polarity: Polarity::Synthetic,
            weight: 0,
            confidence_boost: 0,
        };
        Self {
            findings: vec![finding],
            scores: Scores::default(),
            confidence: 0,
            synthetic_probability: 50.0,
            metadata: ExifMap::new(),
        }
    }
}

/// Runs the detector bank and aggregates findings.
///
/// Holds the immutable weight table; safe to share across threads and
/// reuse across analyses.
pub struct Analyzer {
    weights: WeightTable,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(WeightTable::default())
    }
}

/// The ten pixel detectors, in evaluation order
type PixelDetector = fn(&DecodedImage, &WeightTable) -> Option<Finding>;

const PIXEL_DETECTORS: [PixelDetector; 10] = [
    frequency::analyze,
    gan_blocks::analyze,
    sharpness::analyze,
    jpeg_grid::analyze,
    noise::analyze,
    color::analyze,
    gradients::analyze,
    chromatic::analyze,
    edges::analyze,
    saturation::analyze,
];

impl Analyzer {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    /// Analyze one image: bytes, sanitized filename, and declared size.
    ///
    /// Never returns an error; any processing failure degrades to the
    /// error-finding result.
    pub fn analyze(&self, bytes: &[u8], filename: &str, size: u64) -> AnalysisResult {
        if size > ingest::MAX_FILE_SIZE {
            warn!(size, "rejecting oversized payload inside the engine");
            return AnalysisResult::processing_error();
        }

        let image = match decoder::decode(bytes) {
            Ok(image) => image,
            Err(e) => {
                warn!(error = %e, "image decoding failed, returning degraded result");
                return AnalysisResult::processing_error();
            }
        };

        let exif_data = metadata::extract_metadata(bytes);

        let mut findings: Vec<Finding> = Vec::new();
        findings.extend(filename::analyze(filename, &self.weights));
        findings.extend(exif::analyze(&exif_data, &self.weights));

        // Fan the pixel detectors out; the indexed collect restores the
        // fixed evaluation order regardless of completion order.
        let pixel_findings: Vec<Option<Finding>> = PIXEL_DETECTORS
            .par_iter()
            .map(|detector| detector(&image, &self.weights))
            .collect();
        findings.extend(pixel_findings.into_iter().flatten());

        let mut scores = Scores::default();
        let mut confidence: u32 = 0;
        for finding in &findings {
            debug!(
                title = %finding.title,
                weight = finding.weight,
                polarity = ?finding.polarity,
                "detector fired"
            );
            match finding.polarity {
                Polarity::Synthetic => scores.synthetic += finding.weight,
                Polarity::Authentic => scores.authentic += finding.weight,
            }
            confidence += finding.confidence_boost;
        }
        let confidence = confidence.min(100);

        let total = scores.synthetic + scores.authentic;
        let synthetic_probability = if total > 0 {
            scores.synthetic as f64 / total as f64 * 100.0
        } else {
            50.0
        };

        info!(
            findings = findings.len(),
            synthetic = scores.synthetic,
            authentic = scores.authentic,
            probability = synthetic_probability,
            confidence,
            "analysis complete"
        );

        AnalysisResult {
            findings,
            scores,
            confidence,
            synthetic_probability,
            metadata: metadata::sanitize_metadata(&exif_data),
        }
    }
}

/// Convenience entry point with the default weight table
pub fn analyze(bytes: &[u8], filename: &str, size: u64) -> AnalysisResult {
    Analyzer::default().analyze(bytes, filename, size)
}
