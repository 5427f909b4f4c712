//! Filename analysis.
//!
//! Generator tools stamp their brand into saved filenames, and automated
//! pipelines use recognizable export naming. Brand tokens are checked
//! before the weaker secondary patterns; the first match wins.

use super::{scale_weight, Category, Finding, Polarity, WeightTable};
use regex::Regex;

/// Tokens that identify a specific generator brand
const BRAND_TOKENS: &[&str] = &[
    "chatgpt",
    "gpt",
    "dalle",
    "dall-e",
    "midjourney",
    "stablediffusion",
    "stable-diffusion",
    "leonardo",
    "firefly",
];

/// Weaker naming patterns typical of automated generation
const SECONDARY_PATTERNS: &[(&str, &str)] = &[
    (r"_ai_", "AI"),
    (r"generated", "Generated"),
    (r"output_\d+", "Output"),
];

pub fn analyze(filename: &str, weights: &WeightTable) -> Option<Finding> {
    let lower = filename.to_lowercase();

    for token in BRAND_TOKENS {
        if lower.contains(token) {
            return Some(
                Finding::new(
                    Category::Critical,
                    format!("Filename contains \"{}\"", token.to_uppercase()),
                    "The name points straight at a generator tool. Generators stamp their brand into saved filenames.",
                    Polarity::Synthetic,
                    weights.filename,
                )
                .with_boost(30),
            );
        }
    }

    for (pattern, label) in SECONDARY_PATTERNS {
        let re = Regex::new(pattern).unwrap();
        if re.is_match(&lower) {
            return Some(
                Finding::new(
                    Category::High,
                    format!("\"{}\" naming pattern detected", label),
                    "Automated generation pipelines name their exports this way.",
                    Polarity::Synthetic,
                    scale_weight(weights.filename, 0.6),
                )
                .with_boost(20),
            );
        }
    }

    None
}
