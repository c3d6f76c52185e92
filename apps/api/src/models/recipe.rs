use serde::{Deserialize, Serialize};

/// A parsed, structured candidate recipe.
///
/// Produced by `ParsedRecipe::into_draft`, which rejects an empty title or an
/// empty instruction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl RecipeDraft {
    /// Lowercased first whitespace-delimited word of the title.
    pub fn first_word(&self) -> Option<String> {
        first_word(&self.title)
    }
}

pub(crate) fn first_word(title: &str) -> Option<String> {
    title.split_whitespace().next().map(str::to_lowercase)
}
