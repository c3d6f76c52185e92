// All LLM prompt constants for the Recipes module.

/// Section markers the generation template asks for and the parser looks for.
pub const TITLE_MARKER: &str = "**Title**:";
pub const INGREDIENTS_MARKER: &str = "**Ingredients**:";
pub const INSTRUCTIONS_MARKER: &str = "**Instructions**:";

/// Recipe generation prompt template.
/// Replace: {style}, {ingredients}
pub const RECIPE_PROMPT_TEMPLATE: &str = r#"Create a unique {style} recipe using these ingredients: {ingredients}.
The recipe should be COMPLETELY different from any previous recipes.
Be creative with the title - avoid generic names or similar patterns to existing titles.
Format the response exactly like this:

**Title**: [Unique and Creative Recipe Name]

**Ingredients**:
- [Precise Quantity] [Ingredient] (add any necessary notes)
- [Continue list...]

**Instructions**:
1. [Detailed step with specific temperatures and times]
2. [Continue steps...]

Make sure the recipe approach and cooking method are distinct from other recipes.
Ensure measurements are precise and instructions are clear."#;
