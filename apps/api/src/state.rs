use std::sync::Arc;

use crate::config::Config;
use crate::detection::confidence::ConfidenceScorer;
use crate::llm_client::CompletionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide Completion Service client. Built once in `main`.
    pub llm: Arc<dyn CompletionService>,
    pub config: Config,
    /// Pluggable ingredient confidence. Default: PlaceholderConfidence. Swap via FIXED_CONFIDENCE env.
    pub confidence: Arc<dyn ConfidenceScorer>,
}
