// LLM prompt constants for the Detection module.

/// Sent together with the uploaded photo. The response is expected to be a
/// single lowercase, comma-separated line.
pub const DETECTION_PROMPT: &str = "Analyze this food image and list all visible ingredients. \
    Include quantities where visible. Return only a comma-separated list of unique items in lowercase. \
    Focus on main ingredients and exclude common pantry items unless prominently visible.";

/// Separator the detection prompt asks the model to use between items.
pub const INGREDIENT_SEPARATOR: &str = ", ";
