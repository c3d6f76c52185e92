//! Photo-to-recipes pipeline.
//!
//! Flow: detect_ingredients → filter_by_confidence → ingredient_list →
//!       generate_recipes → notices.
//!
//! Every Completion Service failure degrades to an empty or partial result plus
//! a user-visible notice; nothing here returns an error.

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::detection::confidence::ConfidenceScorer;
use crate::detection::extractor::{detect_ingredients, filter_by_confidence, ingredient_list};
use crate::llm_client::{CompletionService, ImagePayload};
use crate::models::ingredient::DetectedIngredient;
use crate::models::recipe::RecipeDraft;
use crate::recipes::generator::{generate_recipes, GenerationReport};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub ingredients: Vec<DetectedIngredient>,
    pub recipes: Vec<RecipeDraft>,
    pub attempts: usize,
    pub notices: Vec<String>,
}

/// Runs detection and, if any ingredient clears `threshold`, recipe generation.
pub async fn cook_from_photo<R: Rng + Send + ?Sized>(
    service: &dyn CompletionService,
    scorer: &dyn ConfidenceScorer,
    image: &ImagePayload,
    threshold: f32,
    recipe_count: usize,
    rng: &mut R,
) -> PipelineReport {
    let detection = detect_ingredients(service, image, scorer).await;
    let mut report = PipelineReport::default();

    if let Some(error) = detection.error {
        report.notices.push(error);
        return report;
    }

    let detected = detection.ingredients.len();
    report.ingredients = filter_by_confidence(detection.ingredients, threshold);
    info!(
        "{} of {} detected ingredients cleared threshold {threshold}",
        report.ingredients.len(),
        detected
    );

    if report.ingredients.is_empty() {
        report.notices.push(if detected == 0 {
            "No ingredients were detected in the photo.".to_string()
        } else {
            format!(
                "None of the {detected} detected ingredients met the confidence threshold of {threshold}."
            )
        });
        return report;
    }

    let ingredients = ingredient_list(&report.ingredients);
    let generation = generate_recipes(service, &ingredients, recipe_count, rng).await;

    report.attempts = generation.attempts;
    report.notices.extend(generation_notices(&generation, recipe_count));
    report.recipes = generation.recipes;
    report
}

/// User-visible messages for a generation outcome.
pub fn generation_notices(report: &GenerationReport, target_count: usize) -> Vec<String> {
    let mut notices = Vec::new();
    if let Some(error) = &report.error {
        notices.push(error.clone());
    }
    if !report.is_fulfilled(target_count) {
        notices.push(format!(
            "Generated {} of {} requested recipes after {} attempts.",
            report.recipes.len(),
            target_count,
            report.attempts
        ));
    }
    notices
}
