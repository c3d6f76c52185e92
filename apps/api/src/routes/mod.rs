pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::detection::handlers as detection;
use crate::recipes::handlers as recipes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Detection API
        .route(
            "/api/v1/ingredients/detect",
            post(detection::handle_detect),
        )
        // Recipes API
        .route("/api/v1/recipes/generate", post(recipes::handle_generate))
        .route(
            "/api/v1/recipes/from-image",
            post(recipes::handle_from_image),
        )
        .layer(body_limit)
        .with_state(state)
}
