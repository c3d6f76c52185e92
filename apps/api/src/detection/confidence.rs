//! Confidence scoring: pluggable, trait-based scorer for detected ingredients.
//!
//! The Completion Service returns a bare list with no per-item certainty, so the
//! default `PlaceholderConfidence` draws a cosmetic value in [0.7, 1.0]. A scorer
//! backed by a real signal can replace it without touching the extractor.
//!
//! `AppState` holds an `Arc<dyn ConfidenceScorer>`, chosen at startup.

use std::ops::RangeInclusive;

use rand::Rng;

/// Assigns a confidence in [0.0, 1.0] to a detected ingredient name.
pub trait ConfidenceScorer: Send + Sync {
    fn score(&self, ingredient: &str) -> f32;

    /// Reported alongside detection results for transparency.
    fn backend(&self) -> &'static str;
}

/// Uniform random draw. Not derived from the model; do not treat as meaningful.
pub struct PlaceholderConfidence {
    range: RangeInclusive<f32>,
}

impl PlaceholderConfidence {
    pub const DEFAULT_RANGE: RangeInclusive<f32> = 0.7..=1.0;
}

impl Default for PlaceholderConfidence {
    fn default() -> Self {
        Self {
            range: Self::DEFAULT_RANGE,
        }
    }
}

impl ConfidenceScorer for PlaceholderConfidence {
    fn score(&self, _ingredient: &str) -> f32 {
        rand::thread_rng().gen_range(self.range.clone())
    }

    fn backend(&self) -> &'static str {
        "placeholder"
    }
}

/// Always returns the same value. Useful when the threshold filter must be a no-op.
pub struct FixedConfidence(pub f32);

impl ConfidenceScorer for FixedConfidence {
    fn score(&self, _ingredient: &str) -> f32 {
        self.0
    }

    fn backend(&self) -> &'static str {
        "fixed"
    }
}
