//! Recipe Generation: orchestrates the bounded compose/complete/parse/filter loop.
//!
//! Flow: compose_recipe_prompt → CompletionService::complete → parse_recipe →
//!       into_draft → UsedTitles::check → accept.
//!
//! The loop stops once `target_count` recipes are accepted or after
//! `target_count * ATTEMPT_MULTIPLIER` completion requests, whichever comes first.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::llm_client::CompletionService;
use crate::models::recipe::RecipeDraft;
use crate::recipes::composer::compose_recipe_prompt;
use crate::recipes::parser::{parse_recipe, RecipeParse};
use crate::recipes::uniqueness::{Rejection, UsedTitles};

/// Completion requests allowed per requested recipe.
pub const ATTEMPT_MULTIPLIER: usize = 2;

/// Outcome of one generation call.
///
/// `recipes` may be shorter than requested; that is not an error. `error` is
/// set only when the Completion Service failed and the loop was cut short.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub recipes: Vec<RecipeDraft>,
    pub attempts: usize,
    pub rejections: Vec<Rejection>,
    pub error: Option<String>,
}

impl GenerationReport {
    pub fn is_fulfilled(&self, target_count: usize) -> bool {
        self.recipes.len() >= target_count
    }
}

/// Generates up to `target_count` recipes with pairwise-distinct titles.
///
/// `ingredients` is the comma-separated list embedded in every prompt.
/// Calls are issued one at a time; each reply is parsed before the next prompt
/// is composed so style selection can see the titles accepted so far.
pub async fn generate_recipes<R: Rng + Send + ?Sized>(
    service: &dyn CompletionService,
    ingredients: &str,
    target_count: usize,
    rng: &mut R,
) -> GenerationReport {
    let max_attempts = target_count * ATTEMPT_MULTIPLIER;
    let mut used_titles = UsedTitles::new();
    let mut report = GenerationReport::default();

    while report.recipes.len() < target_count && report.attempts < max_attempts {
        let (style, prompt) = compose_recipe_prompt(ingredients, &used_titles, rng);
        report.attempts += 1;

        debug!(
            "Generation attempt {}/{} (style: {})",
            report.attempts,
            max_attempts,
            style.label()
        );

        let text = match service.complete(&prompt, None).await {
            Ok(text) => text,
            Err(e) => {
                error!(
                    "Recipe generation aborted on attempt {}: {e}",
                    report.attempts
                );
                report.error = Some(format!("Error generating recipes: {e}"));
                break;
            }
        };

        match evaluate(&text, &used_titles) {
            Ok(draft) => {
                used_titles.insert(&draft.title);
                info!(
                    "Accepted recipe '{}' ({}/{})",
                    draft.title,
                    used_titles.len(),
                    target_count
                );
                report.recipes.push(draft);
            }
            Err(rejection) => {
                debug!("Attempt {} rejected: {:?}", report.attempts, rejection);
                report.rejections.push(rejection);
            }
        }
    }

    if !report.is_fulfilled(target_count) && report.error.is_none() {
        warn!(
            "Generated {} of {} requested recipes after {} attempts",
            report.recipes.len(),
            target_count,
            report.attempts
        );
    }

    report
}

/// Parses one reply and applies the non-empty and uniqueness checks.
fn evaluate(text: &str, used_titles: &UsedTitles) -> Result<RecipeDraft, Rejection> {
    let parsed = match parse_recipe(text) {
        RecipeParse::Parsed(parsed) => parsed,
        RecipeParse::Malformed => return Err(Rejection::Malformed),
    };

    if parsed.title.is_empty() {
        return Err(Rejection::MissingTitle);
    }
    let draft = parsed
        .into_draft()
        .ok_or(Rejection::MissingInstructions)?;

    used_titles.check(&draft)?;
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::llm_client::{ImagePayload, LlmError};

    /// Replays canned replies in order and records every prompt it receives.
    struct ScriptedService {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedService {
        async fn complete(
            &self,
            prompt: &str,
            image: Option<&ImagePayload>,
        ) -> Result<String, LlmError> {
            assert!(image.is_none(), "recipe prompts never carry an image");
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    fn recipe(title: &str) -> Result<String, LlmError> {
        Ok(format!(
            "**Title**: {title}\n\n**Ingredients**:\n- 2 eggs\n- 100 g flour\n\n**Instructions**:\n1. Mix.\n2. Bake for 20 minutes."
        ))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1234)
    }

    #[tokio::test]
    async fn test_three_distinct_recipes_in_three_attempts() {
        let service = ScriptedService::new(vec![
            recipe("Fluffy Dutch Baby"),
            recipe("Savory Crepe Stack"),
            recipe("Golden Popovers"),
        ]);

        let report = generate_recipes(&service, "eggs, flour, milk", 3, &mut rng()).await;

        let titles: Vec<&str> = report.recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Fluffy Dutch Baby", "Savory Crepe Stack", "Golden Popovers"]
        );
        assert_eq!(report.attempts, 3);
        assert!(report.error.is_none());
        assert!(report.rejections.is_empty());
        assert!(report.is_fulfilled(3));
        assert!(service.prompts.lock().unwrap()[0].contains("eggs, flour, milk"));
    }

    #[tokio::test]
    async fn test_duplicates_are_rejected_and_retried() {
        let service = ScriptedService::new(vec![
            recipe("Spicy Noodles"),
            recipe("spicy noodles"),
            recipe("Spicy Salad"),
            recipe("Lemon Risotto"),
        ]);

        let report = generate_recipes(&service, "noodles, chili", 2, &mut rng()).await;

        let titles: Vec<&str> = report.recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Spicy Noodles", "Lemon Risotto"]);
        assert_eq!(report.attempts, 4);
        assert_eq!(
            report.rejections,
            vec![Rejection::DuplicateTitle, Rejection::SharedFirstWord]
        );
    }

    #[tokio::test]
    async fn test_attempts_are_bounded_by_twice_the_target() {
        let replies = (0..20).map(|_| recipe("Same Every Time")).collect();
        let service = ScriptedService::new(replies);

        let report = generate_recipes(&service, "rice", 3, &mut rng()).await;

        assert_eq!(report.recipes.len(), 1);
        assert_eq!(report.attempts, 6);
        assert_eq!(service.calls(), 6);
        assert!(report.error.is_none(), "under-fulfilment is not an error");
    }

    #[tokio::test]
    async fn test_incomplete_and_malformed_replies_are_rejected() {
        let service = ScriptedService::new(vec![
            Ok("Sorry, I cannot see any food in this picture.".to_string()),
            Ok("**Title**: No Steps\n\n**Ingredients**:\n- 1 apple".to_string()),
            Ok("**Ingredients**:\n- 1 apple\n\n**Instructions**:\n1. Eat.".to_string()),
            recipe("Baked Apple"),
        ]);

        let report = generate_recipes(&service, "apple", 2, &mut rng()).await;

        assert_eq!(report.recipes.len(), 1);
        assert_eq!(report.recipes[0].title, "Baked Apple");
        assert_eq!(report.attempts, 4);
        assert_eq!(
            report.rejections,
            vec![
                Rejection::Malformed,
                Rejection::MissingInstructions,
                Rejection::MissingTitle,
            ]
        );
    }

    #[tokio::test]
    async fn test_service_failure_keeps_accepted_recipes() {
        let service = ScriptedService::new(vec![
            recipe("Charred Corn Salad"),
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
            recipe("Never Requested"),
        ]);

        let report = generate_recipes(&service, "corn", 3, &mut rng()).await;

        assert_eq!(report.recipes.len(), 1);
        assert_eq!(report.recipes[0].title, "Charred Corn Salad");
        assert_eq!(report.attempts, 2);
        assert_eq!(service.calls(), 2);
        let message = report.error.expect("service error should be reported");
        assert!(message.contains("overloaded"));
    }

    #[tokio::test]
    async fn test_zero_target_makes_no_calls() {
        let service = ScriptedService::new(vec![recipe("Unused")]);
        let report = generate_recipes(&service, "salt", 0, &mut rng()).await;
        assert!(report.recipes.is_empty());
        assert_eq!(report.attempts, 0);
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_accepted_batch_has_unique_titles_and_first_words() {
        let titles = [
            "Green Shakshuka",
            "Green Curry",
            "Tomato Tarte Tatin",
            "GREEN SHAKSHUKA",
            "Roasted Tomato Soup",
            "Tomato Confit",
            "Pickled Beet Salad",
            "Smoked Paprika Eggs",
            "Roasted Roots",
            "Miso Glazed Greens",
        ];
        let service = ScriptedService::new(titles.iter().map(|t| recipe(t)).collect());

        let report = generate_recipes(&service, "mixed", 5, &mut rng()).await;

        let mut seen_titles = HashSet::new();
        let mut seen_first = HashSet::new();
        for draft in &report.recipes {
            assert!(seen_titles.insert(draft.title.to_lowercase()));
            assert!(seen_first.insert(draft.first_word().unwrap()));
        }
        assert_eq!(report.recipes.len(), 5);
        assert!(report.attempts <= 10);
    }

    #[tokio::test]
    async fn test_later_prompts_avoid_styles_named_in_titles() {
        let service = ScriptedService::new(vec![
            recipe("Nordic Rye Crumble"),
            recipe("Pan Roasted Pears"),
        ]);

        let _ = generate_recipes(&service, "pears, rye", 2, &mut rng()).await;

        let prompts = service.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(!prompts[1].contains("Create a unique Nordic recipe"));
    }
}
