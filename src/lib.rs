//! # Synthscan
//!
//! An explainable AI-image detector that shows why an image looks generated.
//!
//! ## Core Philosophy
//! - **Never a bare verdict** - every probability comes with the findings behind it
//! - **Weak signals, honest math** - twelve heuristics, each allowed to abstain
//! - **Never crash on user data** - bad input degrades to an error finding
//!
//! ## Architecture
//! The library is split into a core engine (transport-agnostic) and presentation layers:
//! - `core` - The heuristic scoring engine
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{Result, SynthscanError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
