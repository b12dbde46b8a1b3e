//! Prompts that produce whole recipes from scratch.

/// Prompt name for cache keys: single recipe from a search query.
pub const GENERATE_RECIPE_PROMPT_NAME: &str = "generate_recipe";

/// Prompt name for cache keys: single recipe from available ingredients.
pub const GENERATE_FROM_INGREDIENTS_PROMPT_NAME: &str = "generate_from_ingredients";

/// Prompt name for cache keys: batch of recipes for a search term.
pub const SEARCH_RECIPES_PROMPT_NAME: &str = "search_recipes";

/// Prompt name for cache keys: batch of recipes for a category.
pub const CATEGORY_RECIPES_PROMPT_NAME: &str = "category_recipes";

/// The JSON shape every recipe response must follow. Step times are in
/// seconds; 0 marks a step with no specific duration.
pub const RECIPE_JSON_SHAPE: &str = r#"{"name": string, "description": string, "category": string, "prepTime": minutes, "cookTime": minutes, "servings": integer, "ingredients": [string], "steps": [{"description": string, "time": seconds}]}"#;

pub fn render_generate_recipe_prompt(search_term: &str) -> String {
    format!(
        r#"Generate a recipe for "{search_term}". The recipe should be creative and something a home cook can make. Provide all the details needed to be displayed in a recipe app.

Respond with JSON only, no other text, matching this shape exactly:
{shape}

Step times are in SECONDS (a 5-minute step has time 300; use 0 for steps without a specific duration)."#,
        search_term = search_term,
        shape = RECIPE_JSON_SHAPE,
    )
}

pub fn render_generate_from_ingredients_prompt(ingredients: &[String]) -> String {
    format!(
        r#"Generate a creative recipe that primarily uses the following ingredients: {ingredients}. It's okay to add a few common pantry staples. Provide all the details needed to be displayed in a recipe app.

Respond with JSON only, no other text, matching this shape exactly:
{shape}

Step times are in SECONDS (a 5-minute step has time 300; use 0 for steps without a specific duration)."#,
        ingredients = ingredients.join(", "),
        shape = RECIPE_JSON_SHAPE,
    )
}

pub fn render_search_recipes_prompt(search_term: &str) -> String {
    format!(
        r#"Generate a list of 5 diverse and creative recipes related to "{search_term}". For example, if the search is 'chicken curry', suggest different regional varieties or styles of chicken curry. The recipes should be suitable for a home cook.

Respond with a JSON array only, no other text. Each element must match this shape exactly:
{shape}

Step times are in SECONDS (a 5-minute step has time 300; use 0 for steps without a specific duration)."#,
        search_term = search_term,
        shape = RECIPE_JSON_SHAPE,
    )
}

pub fn render_category_recipes_prompt(category: &str) -> String {
    format!(
        r#"Generate a list of 5 creative and diverse Indian recipes for the category: "{category}". For example, if the category is 'Desserts', suggest Indian desserts. The recipes should be suitable for a home cook.

Respond with a JSON array only, no other text. Each element must match this shape exactly:
{shape}

Step times are in SECONDS (a 5-minute step has time 300; use 0 for steps without a specific duration)."#,
        category = category,
        shape = RECIPE_JSON_SHAPE,
    )
}
