//! # synthscan CLI
//!
//! Command-line interface for the AI-image detector.
//!
//! ## Usage
//! ```bash
//! synthscan analyze photo.jpg
//! synthscan analyze photo.jpg --output json
//! ```

mod cli;

use synthscan::Result;

fn main() -> Result<()> {
    cli::run()
}
