//! Recipe Parser: turns the model's marker-formatted free text into a `ParsedRecipe`.
//!
//! The generator is asked for `**Title**:`, `**Ingredients**:` and `**Instructions**:`
//! sections separated by blank lines, but the reply is free text. The parser is
//! line-oriented and tolerant: a marker may start any line, unmarked lines go to
//! whichever list is currently open, and lines before the first list marker are
//! ignored. A reply with no marker at all is reported as `Malformed`.

use crate::models::recipe::RecipeDraft;
use crate::recipes::prompts::{INGREDIENTS_MARKER, INSTRUCTIONS_MARKER, TITLE_MARKER};

const INSTRUCTIONS_PREFIX: &str = "instructions:";

/// Result of parsing one Completion Service reply.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeParse {
    /// Not a single section marker was recognised.
    Malformed,
    /// At least one marker was recognised. Individual fields may still be empty.
    Parsed(ParsedRecipe),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl ParsedRecipe {
    /// A draft needs a title and at least one instruction; ingredients may be empty.
    pub fn into_draft(self) -> Option<RecipeDraft> {
        if self.title.is_empty() || self.instructions.is_empty() {
            return None;
        }
        Some(RecipeDraft {
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Ingredients,
    Instructions,
}

/// Parses a generated recipe.
pub fn parse_recipe(text: &str) -> RecipeParse {
    let mut recipe = ParsedRecipe::default();
    let mut section = Section::None;
    let mut saw_marker = false;

    for block in split_sections(text) {
        let mut lines = block.iter().copied().peekable();

        while let Some(line) = lines.next() {
            let trimmed = line.trim_start();

            if let Some(rest) = trimmed.strip_prefix(TITLE_MARKER) {
                saw_marker = true;
                // The title owns the rest of its section, up to the next marker.
                let mut title = rest.trim().to_string();
                while let Some(continuation) = lines.next_if(|l| !is_marker(l)) {
                    let continuation = continuation.trim();
                    if !title.is_empty() {
                        title.push(' ');
                    }
                    title.push_str(continuation);
                }
                recipe.title = title;
            } else if trimmed.starts_with(INGREDIENTS_MARKER) {
                saw_marker = true;
                section = Section::Ingredients;
                recipe.ingredients.clear();
            } else if trimmed.starts_with(INSTRUCTIONS_MARKER) {
                saw_marker = true;
                section = Section::Instructions;
                recipe.instructions.clear();
            } else {
                match section {
                    Section::None => {}
                    Section::Ingredients => {
                        if let Some(item) = clean_ingredient_line(line) {
                            recipe.ingredients.push(item);
                        }
                    }
                    Section::Instructions => {
                        if let Some(step) = clean_instruction_line(line) {
                            recipe.instructions.push(step);
                        }
                    }
                }
            }
        }
    }

    if saw_marker {
        RecipeParse::Parsed(recipe)
    } else {
        RecipeParse::Malformed
    }
}

fn is_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    [TITLE_MARKER, INGREDIENTS_MARKER, INSTRUCTIONS_MARKER]
        .iter()
        .any(|marker| trimmed.starts_with(marker))
}

/// Groups consecutive non-blank lines. Whitespace-only lines separate sections.
fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Strips a leading bullet ("- ") and surrounding whitespace.
pub fn clean_ingredient_line(line: &str) -> Option<String> {
    let cleaned = line
        .trim()
        .trim_start_matches(|c: char| c == '-' || c == ' ')
        .trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Strips step numbering ("2.", "-", "10 -") and a stray "Instructions:" prefix.
pub fn clean_instruction_line(line: &str) -> Option<String> {
    let mut cleaned = line
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == '-' || c.is_whitespace());

    let has_prefix = cleaned
        .get(..INSTRUCTIONS_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(INSTRUCTIONS_PREFIX));
    if has_prefix {
        cleaned = &cleaned[INSTRUCTIONS_PREFIX.len()..];
    }

    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "**Title**: Saffron Pancake Stack

**Ingredients**:
- 2 eggs
- 200 g flour (sifted)
- 300 ml milk

**Instructions**:
1. Whisk the eggs and milk together.
2. Fold in the flour until smooth.
3. Cook ladlefuls in a hot pan for 2 minutes per side.";

    fn parsed(text: &str) -> ParsedRecipe {
        match parse_recipe(text) {
            RecipeParse::Parsed(recipe) => recipe,
            RecipeParse::Malformed => panic!("expected a parsed recipe for {text:?}"),
        }
    }

    #[test]
    fn test_well_formed_template() {
        let recipe = parsed(WELL_FORMED);
        assert_eq!(recipe.title, "Saffron Pancake Stack");
        assert_eq!(
            recipe.ingredients,
            vec!["2 eggs", "200 g flour (sifted)", "300 ml milk"]
        );
        assert_eq!(
            recipe.instructions,
            vec![
                "Whisk the eggs and milk together.",
                "Fold in the flour until smooth.",
                "Cook ladlefuls in a hot pan for 2 minutes per side.",
            ]
        );
    }

    #[test]
    fn test_well_formed_template_becomes_draft() {
        let draft = parsed(WELL_FORMED).into_draft().expect("draft");
        assert_eq!(draft.title, "Saffron Pancake Stack");
        assert_eq!(draft.instructions.len(), 3);
    }

    #[test]
    fn test_missing_instructions_marker_yields_no_draft() {
        let text = "**Title**: Plain Omelette\n\n**Ingredients**:\n- 3 eggs\n\n1. Beat eggs.\n2. Cook.";
        let recipe = parsed(text);
        assert!(recipe.instructions.is_empty());
        // Unmarked numbered lines stay in the still-open ingredients list.
        assert_eq!(recipe.ingredients, vec!["3 eggs", "1. Beat eggs.", "2. Cook."]);
        assert!(recipe.into_draft().is_none());
    }

    #[test]
    fn test_missing_title_yields_no_draft() {
        let text = "**Ingredients**:\n- rice\n\n**Instructions**:\n1. Boil.";
        let recipe = parsed(text);
        assert!(recipe.title.is_empty());
        assert!(recipe.into_draft().is_none());
    }

    #[test]
    fn test_text_without_markers_is_malformed() {
        let text = "I'm sorry, I can't help with that image.\n\nPlease try another photo.";
        assert_eq!(parse_recipe(text), RecipeParse::Malformed);
        assert_eq!(parse_recipe(""), RecipeParse::Malformed);
    }

    #[test]
    fn test_unmarked_sections_continue_current_list() {
        let text = "**Title**: Two Part Stew

**Ingredients**:
- 1 onion

- 2 carrots

**Instructions**:
1. Chop everything.

2. Simmer for 40 minutes.";
        let recipe = parsed(text);
        assert_eq!(recipe.ingredients, vec!["1 onion", "2 carrots"]);
        assert_eq!(
            recipe.instructions,
            vec!["Chop everything.", "Simmer for 40 minutes."]
        );
    }

    #[test]
    fn test_markers_without_blank_lines_are_recognised() {
        let text = "**Title**: Quick Salad\n**Ingredients**:\n- lettuce\n**Instructions**:\n1. Toss.";
        let recipe = parsed(text);
        assert_eq!(recipe.title, "Quick Salad");
        assert_eq!(recipe.ingredients, vec!["lettuce"]);
        assert_eq!(recipe.instructions, vec!["Toss."]);
    }

    #[test]
    fn test_multi_line_title_is_joined() {
        let text = "**Title**: Slow-Braised\nLamb Shoulder\n\n**Instructions**:\n1. Braise.";
        assert_eq!(parsed(text).title, "Slow-Braised Lamb Shoulder");
    }

    #[test]
    fn test_title_on_following_line() {
        let text = "**Title**:\nHarissa Roast Carrots\n\n**Instructions**:\n1. Roast.";
        let recipe = parsed(text);
        assert_eq!(recipe.title, "Harissa Roast Carrots");
    }

    #[test]
    fn test_lines_before_any_list_are_ignored() {
        let text = "Here is your recipe!\n\n**Title**: Herb Frittata\n\n**Instructions**:\n1. Bake.";
        let recipe = parsed(text);
        assert_eq!(recipe.title, "Herb Frittata");
        assert_eq!(recipe.instructions, vec!["Bake."]);
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_repeated_marker_restarts_list() {
        let text = "**Title**: Reset\n\n**Instructions**:\n1. Old step.\n\n**Instructions**:\n1. New step.";
        let recipe = parsed(text);
        assert_eq!(recipe.instructions, vec!["New step."]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "**Title**: Windows Waffles\r\n\r\n**Ingredients**:\r\n- batter\r\n\r\n**Instructions**:\r\n1. Pour.\r\n";
        let recipe = parsed(text);
        assert_eq!(recipe.title, "Windows Waffles");
        assert_eq!(recipe.ingredients, vec!["batter"]);
        assert_eq!(recipe.instructions, vec!["Pour."]);
    }

    #[test]
    fn test_clean_instruction_strips_numbering() {
        assert_eq!(
            clean_instruction_line("2. Preheat oven to 200C for 10 minutes").as_deref(),
            Some("Preheat oven to 200C for 10 minutes")
        );
        assert_eq!(
            clean_instruction_line("  12.  - Rest the dough").as_deref(),
            Some("Rest the dough")
        );
    }

    #[test]
    fn test_clean_instruction_strips_instructions_prefix() {
        assert_eq!(
            clean_instruction_line("- Instructions: Mix well").as_deref(),
            Some("Mix well")
        );
        assert_eq!(
            clean_instruction_line("INSTRUCTIONS:serve").as_deref(),
            Some("serve")
        );
    }

    #[test]
    fn test_clean_instruction_drops_numbering_only_lines() {
        assert_eq!(clean_instruction_line("3."), None);
        assert_eq!(clean_instruction_line("Instructions:"), None);
        assert_eq!(clean_instruction_line("   "), None);
    }

    #[test]
    fn test_clean_instruction_handles_multibyte_text() {
        assert_eq!(
            clean_instruction_line("1. Crème fraîche on top").as_deref(),
            Some("Crème fraîche on top")
        );
        assert_eq!(clean_instruction_line("é").as_deref(), Some("é"));
    }

    #[test]
    fn test_clean_ingredient_strips_bullet() {
        assert_eq!(
            clean_ingredient_line("  - 1 tbsp olive oil ").as_deref(),
            Some("1 tbsp olive oil")
        );
        assert_eq!(clean_ingredient_line("-"), None);
    }
}
