// Recipe generation: compose prompt -> Completion Service -> parse -> uniqueness filter.
// All LLM calls go through llm_client::CompletionService.

pub mod composer;
pub mod generator;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod uniqueness;
