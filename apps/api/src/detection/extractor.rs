//! Ingredient Extractor: asks the Completion Service what is in a photo and
//! turns the comma-separated answer into `DetectedIngredient`s.

use serde::Serialize;
use tracing::{error, info};

use crate::detection::confidence::ConfidenceScorer;
use crate::detection::prompts::{DETECTION_PROMPT, INGREDIENT_SEPARATOR};
use crate::llm_client::{CompletionService, ImagePayload};
use crate::models::ingredient::DetectedIngredient;

/// Outcome of one detection call. A service failure leaves `ingredients` empty
/// and carries a user-facing message in `error`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionReport {
    pub ingredients: Vec<DetectedIngredient>,
    pub error: Option<String>,
}

/// Sends the detection prompt and image, then parses and scores the reply.
/// Never fails: Completion Service errors degrade to an empty report.
pub async fn detect_ingredients(
    service: &dyn CompletionService,
    image: &ImagePayload,
    scorer: &dyn ConfidenceScorer,
) -> DetectionReport {
    let text = match service.complete(DETECTION_PROMPT, Some(image)).await {
        Ok(text) => text,
        Err(e) => {
            error!("Ingredient detection failed: {e}");
            return DetectionReport {
                ingredients: Vec::new(),
                error: Some(format!("Error detecting ingredients: {e}")),
            };
        }
    };

    let ingredients: Vec<DetectedIngredient> = parse_ingredient_list(&text)
        .into_iter()
        .map(|name| {
            let confidence = scorer.score(&name);
            DetectedIngredient::new(name, confidence)
        })
        .collect();

    info!(
        "Detected {} ingredients (confidence backend: {})",
        ingredients.len(),
        scorer.backend()
    );

    DetectionReport {
        ingredients,
        error: None,
    }
}

/// Lowercases the reply, splits on ", " and drops blank tokens.
pub fn parse_ingredient_list(text: &str) -> Vec<String> {
    text.trim()
        .to_lowercase()
        .split(INGREDIENT_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Keeps ingredients whose confidence is at or above `threshold`, preserving order.
pub fn filter_by_confidence(
    ingredients: Vec<DetectedIngredient>,
    threshold: f32,
) -> Vec<DetectedIngredient> {
    ingredients
        .into_iter()
        .filter(|i| i.confidence >= threshold)
        .collect()
}

/// Joins ingredient names into the string embedded in recipe prompts.
pub fn ingredient_list(ingredients: &[DetectedIngredient]) -> String {
    ingredients
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(INGREDIENT_SEPARATOR)
}
