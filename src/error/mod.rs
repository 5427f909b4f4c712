//! # Error Module
//!
//! User-friendly error types for the AI-image detector.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - file names, sizes, what went wrong
//! - **User-friendly messages** - non-technical users should understand
//! - **No internal detail leaks** - the scoring core itself never surfaces
//!   raw failure detail to callers; these types belong to the layers around it

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SynthscanError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Output(String),
}

/// Errors that occur while validating an upload before analysis
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("File is too large: {size} bytes (maximum is {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("File is too small to be an image: {size} bytes")]
    TooSmall { size: u64 },

    #[error("Unsupported file extension: {extension}")]
    UnsupportedExtension { extension: String },

    #[error("File content does not match any supported image signature")]
    BadSignature,

    #[error("Filename is missing or empty")]
    MissingFilename,
}

/// Errors that occur while decoding image bytes into a pixel grid
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to decode image: {reason}")]
    Malformed { reason: String },

    #[error("Image is empty")]
    EmptyImage,

    #[error("Image exceeds the pixel budget: {pixels} pixels (maximum is {max})")]
    TooManyPixels { pixels: u64, max: u64 },

    #[error("Failed to resize image: {reason}")]
    ResizeFailed { reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SynthscanError>;
