//! Prompts that rewrite an existing recipe's ingredients or steps.

use crate::types::{Cooktop, Step};

/// Prompt name for cache keys: rewrite around available ingredients.
pub const ADAPT_INGREDIENTS_PROMPT_NAME: &str = "adapt_ingredients";

/// Prompt name for cache keys: rewrite steps for a cooktop.
pub const ADAPT_COOKTOP_PROMPT_NAME: &str = "adapt_cooktop";

fn numbered_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s.description))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_adapt_ingredients_prompt(
    recipe_name: &str,
    original_ingredients: &[String],
    available_ingredients: &[String],
    steps: &[Step],
) -> String {
    format!(
        r#"I am making a recipe called "{name}".
The original ingredients are: {original}.
The original steps are: {steps}.

However, I only have the following ingredients: {available}.

Please update the recipe instructions to work with ONLY the ingredients I have. Also, provide the final list of ingredients that will be used in the updated recipe. The cooking and prep times might change, but focus on adjusting the steps. Make the new instructions clear and complete.

Respond with JSON only, no other text: {{"ingredients": [string], "steps": [{{"description": string, "time": seconds}}]}}. Step times are in SECONDS; use 0 for steps without a specific duration."#,
        name = recipe_name,
        original = original_ingredients.join(", "),
        steps = numbered_steps(steps),
        available = available_ingredients.join(", "),
    )
}

pub fn render_adapt_cooktop_prompt(recipe_name: &str, steps: &[Step], cooktop: Cooktop) -> String {
    let specific_instructions = match cooktop {
        Cooktop::Induction => {
            "Adjust instructions about heat levels and cooking methods. For any instruction about flame or heat level (e.g., 'medium flame', 'low heat'), you MUST replace it with a specific temperature in Celsius AND a power setting in watts, appropriate for a standard home induction cooktop. The format MUST be 'TEMPERATURE°C / POWERW' (e.g., '120°C / 1000W')."
        }
        Cooktop::ElectricKettle => {
            "Adjust the instructions to be achievable using only a simple electric kettle. Focus on steps involving boiling water, steeping, or creating hot water baths. If a step cannot be done with a kettle, modify it to the closest possible alternative."
        }
        // The default cooktop restores the captured baseline instead of prompting.
        Cooktop::Lpg => "",
    };

    format!(
        r#"I am making a recipe called "{name}".
The original instructions are: {steps}.

Please modify these instructions to be suitable for cooking on a '{cooktop}'.
{specific}
Return ONLY the modified steps array in the specified JSON format: {{"steps": [{{"description": string, "time": seconds}}]}}. Keep the JSON structure and preserve the original 'time' values for each step. Do not add any extra commentary."#,
        name = recipe_name,
        steps = numbered_steps(steps),
        cooktop = cooktop.display_name(),
        specific = specific_instructions,
    )
}
