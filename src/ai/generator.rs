//! The recipe generation gateway.
//!
//! `RecipeGenerator` is the seam between sessions/pages and the AI backend:
//! every AI-facing capability (search-to-recipe, ingredient rewrite, cooktop
//! rewrite, translation, substitution, tips, images) goes through it, so it
//! can be swapped for a fake in tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

use super::client::AiClient;
use super::prompts::{adapt, assist, generate, translate};
use super::types::{ChatMessage, ChatRequest};
use crate::error::GenerateError;
use crate::types::{Cooktop, Language, Recipe, RecipeRewrite, Step, Substitution, TranslatedRecipe};

/// Fallback tip when the AI backend is unavailable; tips never hard-fail.
const TIP_FALLBACK: &str = "Sorry, I couldn't get a tip right now. Please try again later.";

/// Gateway to the external recipe-generation capability.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Generate a single recipe for a free-text query.
    async fn generate_from_query(&self, search_term: &str) -> Result<Recipe, GenerateError>;

    /// Generate a single recipe that primarily uses the given ingredients.
    async fn generate_from_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Recipe, GenerateError>;

    /// Generate a batch of diverse recipes for a search term.
    async fn generate_for_search(&self, search_term: &str) -> Result<Vec<Recipe>, GenerateError>;

    /// Generate a batch of recipes for a category.
    async fn generate_for_category(&self, category: &str) -> Result<Vec<Recipe>, GenerateError>;

    /// A chef's tip for the current step. Never fails; returns a friendly
    /// fallback string when the backend does.
    async fn chefs_tip(&self, recipe_name: &str, step_description: &str) -> String;

    /// Suggest a substitute for a missing ingredient. Read-only; applying the
    /// substitution is the session's job.
    async fn substitute(
        &self,
        recipe_name: &str,
        all_ingredients: &[String],
        missing_ingredient: &str,
    ) -> Result<Substitution, GenerateError>;

    /// Rewrite ingredients and steps around what the user actually has.
    async fn adapt_for_ingredients(
        &self,
        recipe_name: &str,
        original_ingredients: &[String],
        available_ingredients: &[String],
        steps: &[Step],
    ) -> Result<RecipeRewrite, GenerateError>;

    /// Translate a recipe's text fields. Step times pass through unchanged.
    async fn translate(
        &self,
        recipe: &Recipe,
        language: Language,
    ) -> Result<TranslatedRecipe, GenerateError>;

    /// Rewrite steps for a specific cooktop. Step times pass through unchanged.
    async fn adapt_for_cooktop(
        &self,
        recipe_name: &str,
        steps: &[Step],
        cooktop: Cooktop,
    ) -> Result<Vec<Step>, GenerateError>;

    /// Generate a cover image, returned as a data URL.
    async fn generate_image(&self, name: &str, description: &str)
        -> Result<String, GenerateError>;
}

/// Recipe fields as returned by the AI, before an id is minted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedRecipe {
    name: String,
    description: String,
    category: String,
    prep_time: u32,
    cook_time: u32,
    servings: u32,
    ingredients: Vec<String>,
    steps: Vec<Step>,
}

impl GeneratedRecipe {
    /// Assemble a full recipe: freshly minted unique id, no image yet,
    /// flagged as AI-authored.
    fn into_recipe(self) -> Recipe {
        Recipe {
            id: Recipe::mint_generated_id(&self.name),
            name: self.name,
            description: self.description,
            category: self.category,
            image_url: String::new(),
            ingredients: self.ingredients,
            steps: self.steps,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            is_generated: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StepsOnly {
    steps: Vec<Step>,
}

/// Strip markdown code fences the model sometimes wraps JSON in.
fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix("```json").unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix("```").unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

/// Parse a response body into `T`, distinguishing malformed JSON (`Parse`)
/// from well-formed JSON of the wrong shape (`Validation`).
fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, GenerateError> {
    let value: serde_json::Value = serde_json::from_str(strip_json_fences(body))
        .map_err(|e| GenerateError::Parse(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| GenerateError::Validation(e.to_string()))
}

fn validate_recipe(recipe: &GeneratedRecipe) -> Result<(), GenerateError> {
    if recipe.name.trim().is_empty() {
        return Err(GenerateError::Validation("recipe name is empty".to_string()));
    }
    if recipe.ingredients.is_empty() || recipe.steps.is_empty() {
        return Err(GenerateError::Validation(
            "recipe has no ingredients or no steps".to_string(),
        ));
    }
    Ok(())
}

/// Gateway implementation backed by an `AiClient`.
pub struct AiRecipeGenerator {
    client: Arc<dyn AiClient>,
}

impl AiRecipeGenerator {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self { client }
    }

    fn json_request(prompt: String) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(prompt)],
            json_response: true,
            ..Default::default()
        }
    }

    async fn complete_recipe(
        &self,
        prompt_name: &str,
        prompt: String,
    ) -> Result<Recipe, GenerateError> {
        let response = self
            .client
            .complete(prompt_name, Self::json_request(prompt))
            .await?;
        let generated: GeneratedRecipe = parse_response(&response.content)?;
        validate_recipe(&generated)?;
        Ok(generated.into_recipe())
    }

    async fn complete_recipe_batch(
        &self,
        prompt_name: &str,
        prompt: String,
    ) -> Result<Vec<Recipe>, GenerateError> {
        let response = self
            .client
            .complete(prompt_name, Self::json_request(prompt))
            .await?;
        let batch: Vec<GeneratedRecipe> = parse_response(&response.content)?;
        for generated in &batch {
            validate_recipe(generated)?;
        }
        Ok(batch.into_iter().map(GeneratedRecipe::into_recipe).collect())
    }
}

#[async_trait]
impl RecipeGenerator for AiRecipeGenerator {
    async fn generate_from_query(&self, search_term: &str) -> Result<Recipe, GenerateError> {
        self.complete_recipe(
            generate::GENERATE_RECIPE_PROMPT_NAME,
            generate::render_generate_recipe_prompt(search_term),
        )
        .await
    }

    async fn generate_from_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Recipe, GenerateError> {
        self.complete_recipe(
            generate::GENERATE_FROM_INGREDIENTS_PROMPT_NAME,
            generate::render_generate_from_ingredients_prompt(ingredients),
        )
        .await
    }

    async fn generate_for_search(&self, search_term: &str) -> Result<Vec<Recipe>, GenerateError> {
        self.complete_recipe_batch(
            generate::SEARCH_RECIPES_PROMPT_NAME,
            generate::render_search_recipes_prompt(search_term),
        )
        .await
    }

    async fn generate_for_category(&self, category: &str) -> Result<Vec<Recipe>, GenerateError> {
        self.complete_recipe_batch(
            generate::CATEGORY_RECIPES_PROMPT_NAME,
            generate::render_category_recipes_prompt(category),
        )
        .await
    }

    async fn chefs_tip(&self, recipe_name: &str, step_description: &str) -> String {
        let request = ChatRequest {
            messages: vec![ChatMessage::user(assist::render_chefs_tip_prompt(
                recipe_name,
                step_description,
            ))],
            max_tokens: Some(256),
            ..Default::default()
        };

        match self.client.complete(assist::CHEFS_TIP_PROMPT_NAME, request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                response.content.trim().to_string()
            }
            Ok(_) => TIP_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!("Chef's tip request failed: {}", e);
                TIP_FALLBACK.to_string()
            }
        }
    }

    async fn substitute(
        &self,
        recipe_name: &str,
        all_ingredients: &[String],
        missing_ingredient: &str,
    ) -> Result<Substitution, GenerateError> {
        let response = self
            .client
            .complete(
                assist::SUBSTITUTE_PROMPT_NAME,
                Self::json_request(assist::render_substitute_prompt(
                    recipe_name,
                    all_ingredients,
                    missing_ingredient,
                )),
            )
            .await?;
        let substitution: Substitution = parse_response(&response.content)?;
        if substitution.substitute.trim().is_empty() {
            return Err(GenerateError::Validation(
                "substitute field is empty".to_string(),
            ));
        }
        Ok(substitution)
    }

    async fn adapt_for_ingredients(
        &self,
        recipe_name: &str,
        original_ingredients: &[String],
        available_ingredients: &[String],
        steps: &[Step],
    ) -> Result<RecipeRewrite, GenerateError> {
        let response = self
            .client
            .complete(
                adapt::ADAPT_INGREDIENTS_PROMPT_NAME,
                Self::json_request(adapt::render_adapt_ingredients_prompt(
                    recipe_name,
                    original_ingredients,
                    available_ingredients,
                    steps,
                )),
            )
            .await?;
        let rewrite: RecipeRewrite = parse_response(&response.content)?;
        if rewrite.ingredients.is_empty() || rewrite.steps.is_empty() {
            return Err(GenerateError::Validation(
                "rewrite has no ingredients or no steps".to_string(),
            ));
        }
        Ok(rewrite)
    }

    async fn translate(
        &self,
        recipe: &Recipe,
        language: Language,
    ) -> Result<TranslatedRecipe, GenerateError> {
        let response = self
            .client
            .complete(
                translate::TRANSLATE_PROMPT_NAME,
                Self::json_request(translate::render_translate_prompt(recipe, language)),
            )
            .await?;
        let translated: TranslatedRecipe = parse_response(&response.content)?;
        if translated.name.trim().is_empty() {
            return Err(GenerateError::Validation(
                "translated name is empty".to_string(),
            ));
        }
        Ok(translated)
    }

    async fn adapt_for_cooktop(
        &self,
        recipe_name: &str,
        steps: &[Step],
        cooktop: Cooktop,
    ) -> Result<Vec<Step>, GenerateError> {
        let response = self
            .client
            .complete(
                adapt::ADAPT_COOKTOP_PROMPT_NAME,
                Self::json_request(adapt::render_adapt_cooktop_prompt(
                    recipe_name,
                    steps,
                    cooktop,
                )),
            )
            .await?;
        let adapted: StepsOnly = parse_response(&response.content)?;
        if adapted.steps.is_empty() {
            return Err(GenerateError::Validation(
                "cooktop rewrite has no steps".to_string(),
            ));
        }
        Ok(adapted.steps)
    }

    async fn generate_image(
        &self,
        name: &str,
        description: &str,
    ) -> Result<String, GenerateError> {
        let prompt = format!(
            r#"A delicious, vibrant, professionally photographed plate of "{}", suitable for a recipe book. {}"#,
            name, description
        );
        self.client.generate_image(&prompt).await
    }
}
