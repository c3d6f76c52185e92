//! Uniqueness filter: the title heuristic that keeps one batch free of near-duplicates.
//!
//! A candidate is rejected when its lowercase title equals an accepted title, or
//! when both titles share a lowercase first word. The first-word rule is a
//! heuristic: "Spicy Noodles" and "Spicy Salad" are distinct dishes, yet the
//! second is rejected once the first is accepted.

use serde::Serialize;

use crate::models::recipe::{first_word, RecipeDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// No section marker was recognised in the reply.
    Malformed,
    MissingTitle,
    MissingInstructions,
    DuplicateTitle,
    SharedFirstWord,
}

/// Titles accepted so far in one generation request, in acceptance order.
/// Never shared between requests.
#[derive(Debug, Default, Clone)]
pub struct UsedTitles {
    titles: Vec<String>,
}

impl UsedTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// True if `needle` occurs, case-insensitively, inside any accepted title.
    pub fn any_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.titles
            .iter()
            .any(|title| title.to_lowercase().contains(&needle))
    }

    /// Checks a draft against every accepted title.
    pub fn check(&self, draft: &RecipeDraft) -> Result<(), Rejection> {
        let title = draft.title.to_lowercase();
        let candidate_first = draft.first_word();

        for existing in &self.titles {
            if existing.to_lowercase() == title {
                return Err(Rejection::DuplicateTitle);
            }
            if candidate_first.is_some() && first_word(existing) == candidate_first {
                return Err(Rejection::SharedFirstWord);
            }
        }
        Ok(())
    }

    /// Records an accepted title. Callers must `check` first.
    pub fn insert(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }
}
