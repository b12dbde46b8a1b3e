//! Recipe translation prompt.

use crate::types::{Language, Recipe, Step};
use serde::Serialize;

/// Prompt name for cache keys.
pub const TRANSLATE_PROMPT_NAME: &str = "translate";

/// The subset of a recipe that gets translated. Times ride along so the
/// model can echo them back unchanged.
#[derive(Serialize)]
struct TranslatableContent<'a> {
    name: &'a str,
    description: &'a str,
    ingredients: &'a [String],
    steps: &'a [Step],
}

pub fn render_translate_prompt(recipe: &Recipe, language: Language) -> String {
    let content = TranslatableContent {
        name: &recipe.name,
        description: &recipe.description,
        ingredients: &recipe.ingredients,
        steps: &recipe.steps,
    };
    let content_json =
        serde_json::to_string_pretty(&content).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"Translate the following recipe's text fields ('name', 'description', 'ingredients' array, and 'description' within each step) into {language}.
Maintain the exact JSON structure provided.
Ensure the 'time' value for each step remains an unchanged integer (in seconds).
Do not add any extra explanations or text outside of the JSON object.

Recipe to translate:
{content}"#,
        language = language.display_name(),
        content = content_json,
    )
}
