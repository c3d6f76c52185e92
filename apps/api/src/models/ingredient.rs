use serde::{Deserialize, Serialize};

/// One item recognised in an uploaded photo.
///
/// `confidence` comes from the configured `ConfidenceScorer`, not from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedIngredient {
    /// Lowercase, trimmed.
    pub name: String,
    /// 0.0 – 1.0
    pub confidence: f32,
}

impl DetectedIngredient {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}
