//! In-session assistance prompts: chef's tips and ingredient substitutes.

/// Prompt name for cache keys.
pub const CHEFS_TIP_PROMPT_NAME: &str = "chefs_tip";

/// Prompt name for cache keys.
pub const SUBSTITUTE_PROMPT_NAME: &str = "substitute";

pub fn render_chefs_tip_prompt(recipe_name: &str, step_description: &str) -> String {
    format!(
        r#"I am making a recipe called "{name}". I am on the following step: "{step}". Give me a single, concise, and helpful "chef's tip" for this specific step. The tip should be encouraging and easy to understand for a beginner cook. Do not start with "Chef's Tip:". Just provide the tip itself."#,
        name = recipe_name,
        step = step_description,
    )
}

pub fn render_substitute_prompt(
    recipe_name: &str,
    all_ingredients: &[String],
    missing_ingredient: &str,
) -> String {
    format!(
        r#"I am making a recipe called "{name}". The full list of ingredients is: {all}. I do not have "{missing}". Provide a specific ingredient substitute including quantity (e.g., '1 cup vegetable broth'), and a brief explanation of why it works or how to use it.

Respond with JSON only, no other text: {{"substitute": string, "explanation": string}}"#,
        name = recipe_name,
        all = all_ingredients.join(", "),
        missing = missing_ingredient,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tip_prompt_names_recipe_and_step() {
        let prompt = render_chefs_tip_prompt("Biryani", "Layer the rice over the masala.");
        assert!(prompt.contains("Biryani"));
        assert!(prompt.contains("Layer the rice"));
    }

    #[test]
    fn substitute_prompt_names_missing_ingredient() {
        let prompt = render_substitute_prompt(
            "Brownies",
            &["flour".to_string(), "eggs".to_string()],
            "eggs",
        );
        assert!(prompt.contains("flour, eggs"));
        assert!(prompt.contains(r#"I do not have "eggs""#));
        assert!(prompt.contains("explanation"));
    }
}
