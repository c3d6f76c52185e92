//! Axum route handlers for the Recipes API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ingredient::DetectedIngredient;
use crate::models::recipe::RecipeDraft;
use crate::params::{resolve_confidence_threshold, resolve_recipe_count};
use crate::pipeline::{cook_from_photo, generation_notices};
use crate::recipes::generator::generate_recipes;
use crate::state::AppState;
use crate::upload::UploadForm;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub ingredients: Vec<String>,
    pub recipe_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub request_id: Uuid,
    pub recipes: Vec<RecipeDraft>,
    pub attempts: usize,
    pub generated_at: DateTime<Utc>,
    pub notices: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FromImageResponse {
    pub request_id: Uuid,
    pub ingredients: Vec<DetectedIngredient>,
    pub recipes: Vec<RecipeDraft>,
    pub attempts: usize,
    pub generated_at: DateTime<Utc>,
    pub notices: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recipes/generate
///
/// Generates recipes from an ingredient list the caller already has.
/// Partial batches and Completion Service failures are reported in `notices`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let recipe_count = resolve_recipe_count(request.recipe_count, &state.config)?;
    let ingredients = normalise_ingredients(&request.ingredients)?;
    let request_id = Uuid::new_v4();

    info!("[{request_id}] Generating {recipe_count} recipes from: {ingredients}");

    let mut rng = StdRng::from_entropy();
    let report = generate_recipes(state.llm.as_ref(), &ingredients, recipe_count, &mut rng).await;
    let notices = generation_notices(&report, recipe_count);

    Ok(Json(GenerateResponse {
        request_id,
        recipes: report.recipes,
        attempts: report.attempts,
        generated_at: Utc::now(),
        notices,
    }))
}

/// POST /api/v1/recipes/from-image
///
/// Multipart form: `image` (JPEG/PNG), optional `recipe_count`, optional `confidence_threshold`.
/// Full pipeline: detect → filter → generate.
pub async fn handle_from_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FromImageResponse>, AppError> {
    let form = UploadForm::from_multipart(multipart).await?;
    let recipe_count = resolve_recipe_count(form.recipe_count, &state.config)?;
    let threshold = resolve_confidence_threshold(form.confidence_threshold, &state.config)?;
    let request_id = Uuid::new_v4();

    info!(
        "[{request_id}] Photo pipeline: {recipe_count} recipes, threshold {threshold}, {} byte upload",
        form.image.bytes.len()
    );

    let mut rng = StdRng::from_entropy();
    let report = cook_from_photo(
        state.llm.as_ref(),
        state.confidence.as_ref(),
        &form.image,
        threshold,
        recipe_count,
        &mut rng,
    )
    .await;

    Ok(Json(FromImageResponse {
        request_id,
        ingredients: report.ingredients,
        recipes: report.recipes,
        attempts: report.attempts,
        generated_at: Utc::now(),
        notices: report.notices,
    }))
}

/// Trims and lowercases names, drops blanks, and joins them for the prompt.
fn normalise_ingredients(raw: &[String]) -> Result<String, AppError> {
    let names: Vec<String> = raw
        .iter()
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        return Err(AppError::Validation(
            "ingredients must contain at least one non-empty name".to_string(),
        ));
    }
    Ok(names.join(", "))
}
