//! Axum route handlers for the Detection API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::detection::extractor::{detect_ingredients, filter_by_confidence};
use crate::errors::AppError;
use crate::models::ingredient::DetectedIngredient;
use crate::params::resolve_confidence_threshold;
use crate::state::AppState;
use crate::upload::UploadForm;

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub request_id: Uuid,
    pub ingredients: Vec<DetectedIngredient>,
    pub confidence_threshold: f32,
    /// "placeholder" or "fixed". Confidence is never model-derived.
    pub confidence_backend: &'static str,
    pub notices: Vec<String>,
}

/// POST /api/v1/ingredients/detect
///
/// Multipart form: `image` (JPEG/PNG), optional `confidence_threshold`.
/// A Completion Service failure still returns 200 with an empty list and a notice.
pub async fn handle_detect(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DetectResponse>, AppError> {
    let form = UploadForm::from_multipart(multipart).await?;
    let threshold = resolve_confidence_threshold(form.confidence_threshold, &state.config)?;
    let request_id = Uuid::new_v4();

    info!(
        "[{request_id}] Detecting ingredients in {} byte {} upload",
        form.image.bytes.len(),
        form.image.mime_type
    );

    let report = detect_ingredients(state.llm.as_ref(), &form.image, state.confidence.as_ref()).await;
    let notices = report.error.into_iter().collect();
    let ingredients = filter_by_confidence(report.ingredients, threshold);

    Ok(Json(DetectResponse {
        request_id,
        ingredients,
        confidence_threshold: threshold,
        confidence_backend: state.confidence.backend(),
        notices,
    }))
}
