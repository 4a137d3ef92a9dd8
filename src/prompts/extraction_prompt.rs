//! Ingredient extraction prompt
//!
//! Used when the user hands over a photo without a question: the model lists
//! what it can see and proposes a few recipes built from it.

/// Instruction sent with a photo of the user's ingredients
pub const EXTRACTION_PROMPT: &str = "You are a smart kitchen assistant.

1. First, list all identifiable ingredients from this image.
2. Then, suggest 2\u{2013}3 easy recipes using those ingredients.
Each recipe should have:
- Title
- Ingredient list
- Steps (in bullet points)";

/// Generates the extraction instruction
///
/// The instruction does not depend on user input; the photo carries all of
/// the context.
///
/// # Examples
///
/// ```
/// use fridgechef::prompts::extraction_prompt::generate_extraction_prompt;
///
/// let prompt = generate_extraction_prompt();
/// assert!(prompt.contains("list all identifiable ingredients"));
/// ```
pub fn generate_extraction_prompt() -> String {
    EXTRACTION_PROMPT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_lists_ingredients_then_recipes() {
        let prompt = generate_extraction_prompt();
        let ingredients = prompt
            .find("1. First, list all identifiable ingredients from this image.")
            .unwrap();
        let recipes = prompt
            .find("2. Then, suggest 2\u{2013}3 easy recipes using those ingredients.")
            .unwrap();
        assert!(ingredients < recipes);
    }

    #[test]
    fn test_extraction_prompt_describes_recipe_shape() {
        let prompt = generate_extraction_prompt();
        assert!(prompt.starts_with("You are a smart kitchen assistant."));
        assert!(prompt.contains("- Title"));
        assert!(prompt.contains("- Ingredient list"));
        assert!(prompt.contains("- Steps (in bullet points)"));
    }
}
