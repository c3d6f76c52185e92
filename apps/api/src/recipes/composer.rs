//! Prompt Composer: picks a cuisine style and fills the recipe template.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::recipes::prompts::RECIPE_PROMPT_TEMPLATE;
use crate::recipes::uniqueness::UsedTitles;

/// Culinary tradition used to bias each recipe prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CuisineStyle {
    Mediterranean,
    AsianFusion,
    LatinAmerican,
    MiddleEastern,
    ModernEuropean,
    IndianFusion,
    PacificRim,
    ContemporaryAmerican,
    CaribbeanInspired,
    Nordic,
}

impl CuisineStyle {
    pub const ALL: [CuisineStyle; 10] = [
        CuisineStyle::Mediterranean,
        CuisineStyle::AsianFusion,
        CuisineStyle::LatinAmerican,
        CuisineStyle::MiddleEastern,
        CuisineStyle::ModernEuropean,
        CuisineStyle::IndianFusion,
        CuisineStyle::PacificRim,
        CuisineStyle::ContemporaryAmerican,
        CuisineStyle::CaribbeanInspired,
        CuisineStyle::Nordic,
    ];

    /// Label as it appears in the prompt.
    pub fn label(self) -> &'static str {
        match self {
            CuisineStyle::Mediterranean => "Mediterranean",
            CuisineStyle::AsianFusion => "Asian fusion",
            CuisineStyle::LatinAmerican => "Latin American",
            CuisineStyle::MiddleEastern => "Middle Eastern",
            CuisineStyle::ModernEuropean => "Modern European",
            CuisineStyle::IndianFusion => "Indian fusion",
            CuisineStyle::PacificRim => "Pacific Rim",
            CuisineStyle::ContemporaryAmerican => "Contemporary American",
            CuisineStyle::CaribbeanInspired => "Caribbean inspired",
            CuisineStyle::Nordic => "Nordic",
        }
    }
}

/// Picks a style at random, skipping styles already named in an accepted title.
/// Falls back to the full list when every style has been used.
pub fn select_style<R: Rng + ?Sized>(used_titles: &UsedTitles, rng: &mut R) -> CuisineStyle {
    let available: Vec<CuisineStyle> = if used_titles.is_empty() {
        CuisineStyle::ALL.to_vec()
    } else {
        CuisineStyle::ALL
            .iter()
            .copied()
            .filter(|style| !used_titles.any_contains(style.label()))
            .collect()
    };

    let pool: &[CuisineStyle] = if available.is_empty() {
        &CuisineStyle::ALL
    } else {
        &available
    };

    // `pool` is never empty, so `choose` always yields a style.
    *pool.choose(rng).unwrap_or(&CuisineStyle::Mediterranean)
}

/// Fills the recipe template with the ingredient string and a freshly selected style.
pub fn compose_recipe_prompt<R: Rng + ?Sized>(
    ingredients: &str,
    used_titles: &UsedTitles,
    rng: &mut R,
) -> (CuisineStyle, String) {
    let style = select_style(used_titles, rng);
    let prompt = RECIPE_PROMPT_TEMPLATE
        .replace("{style}", style.label())
        .replace("{ingredients}", ingredients);
    (style, prompt)
}
