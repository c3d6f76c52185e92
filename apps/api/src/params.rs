//! User-facing request parameters: recipe count and confidence threshold.
//! Missing values fall back to the configured defaults; out-of-range values are rejected.

use crate::config::{Config, CONFIDENCE_THRESHOLD_RANGE, RECIPE_COUNT_RANGE};
use crate::errors::AppError;

pub fn resolve_recipe_count(requested: Option<usize>, config: &Config) -> Result<usize, AppError> {
    let count = requested.unwrap_or(config.default_recipe_count);
    if !RECIPE_COUNT_RANGE.contains(&count) {
        return Err(AppError::Validation(format!(
            "recipe_count must be between {} and {}, got {count}",
            RECIPE_COUNT_RANGE.start(),
            RECIPE_COUNT_RANGE.end()
        )));
    }
    Ok(count)
}

pub fn resolve_confidence_threshold(
    requested: Option<f32>,
    config: &Config,
) -> Result<f32, AppError> {
    let threshold = requested.unwrap_or(config.default_confidence_threshold);
    if !CONFIDENCE_THRESHOLD_RANGE.contains(&threshold) {
        return Err(AppError::Validation(format!(
            "confidence_threshold must be between {} and {}, got {threshold}",
            CONFIDENCE_THRESHOLD_RANGE.start(),
            CONFIDENCE_THRESHOLD_RANGE.end()
        )));
    }
    Ok(threshold)
}
