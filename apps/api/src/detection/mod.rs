// Ingredient detection: photo -> Completion Service -> DetectedIngredient list.
// All LLM calls go through llm_client::CompletionService.

pub mod confidence;
pub mod extractor;
pub mod handlers;
pub mod prompts;
