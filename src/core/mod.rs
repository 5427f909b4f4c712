//! # Core Module
//!
//! The transport-agnostic heuristic scoring engine.
//!
//! ## Modules
//! - `ingest` - Validates uploads before they reach the engine
//! - `decoder` - Decodes bytes into capped pixel grids
//! - `metadata` - Extracts and sanitizes EXIF metadata
//! - `ops` - Shared pixel math (kernels, histograms, FFT)
//! - `detectors` - The twelve heuristic analyzers and the finding model
//! - `analyzer` - Aggregates detector findings into one verdict

pub mod analyzer;
pub mod decoder;
pub mod detectors;
pub mod ingest;
pub mod metadata;
pub mod ops;

// Re-export commonly used types
pub use analyzer::{AnalysisResult, Analyzer, Scores};
pub use decoder::DecodedImage;
pub use detectors::{Category, Finding, Polarity, WeightTable};
pub use metadata::ExifMap;
