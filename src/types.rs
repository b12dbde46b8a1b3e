use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single cooking instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub description: String,
    /// Estimated time for this step in seconds. 0 means no timer applies.
    #[serde(default)]
    pub time: u32,
}

impl Step {
    pub fn new(description: impl Into<String>, time: u32) -> Self {
        Self {
            description: description.into(),
            time,
        }
    }

    /// Whether a countdown timer applies to this step.
    pub fn has_timer(&self) -> bool {
        self.time > 0
    }
}

/// A recipe as loaded or generated. Treated as an immutable snapshot:
/// sessions work on clones and never mutate the snapshot they were opened from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Opaque, globally unique. Stable for curated recipes, freshly minted
    /// for generated ones.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Open string domain: curated categories plus whatever the AI invents.
    pub category: String,
    /// Empty string means "no image yet".
    #[serde(default)]
    pub image_url: String,
    /// Ordered; ordering is significant and stable across a session.
    pub ingredients: Vec<String>,
    /// Ordered; step `i` always refers to the same instruction within a session.
    pub steps: Vec<Step>,
    /// Preparation time in minutes.
    pub prep_time: u32,
    /// Cooking time in minutes.
    pub cook_time: u32,
    pub servings: u32,
    /// Distinguishes AI-authored content from curated content.
    #[serde(default)]
    pub is_generated: bool,
}

impl Recipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time + self.cook_time
    }

    /// Mint an id for a freshly generated recipe. The UUID suffix guarantees
    /// uniqueness against both curated ids and previously generated ones;
    /// a collision would corrupt favorites keyed by (user, recipe id).
    pub fn mint_generated_id(name: &str) -> String {
        let slug: String = name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("generated-{}-{}", slug, Uuid::new_v4())
    }
}

/// The identity driving favorites persistence. Passed explicitly into
/// stores and sessions rather than read from ambient global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// Logged-in user; favorites live in the remote store.
    Authenticated { user_id: Uuid },
    /// Guest mode; favorites live in browser-local/on-disk storage.
    Guest,
    /// Neither logged in nor in guest mode; favorites are empty and
    /// kept in memory only.
    Anonymous,
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated { .. })
    }
}

/// Cooktop the instructions are written for. `Lpg` is the default the
/// curated and generated recipes assume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cooktop {
    Lpg,
    Induction,
    ElectricKettle,
}

impl Cooktop {
    pub fn is_default(&self) -> bool {
        matches!(self, Cooktop::Lpg)
    }

    /// Human-readable name, as shown in prompts and UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            Cooktop::Lpg => "LPG Cooktop",
            Cooktop::Induction => "Induction Cooktop",
            Cooktop::ElectricKettle => "Simple Electric Kettle",
        }
    }
}

impl Default for Cooktop {
    fn default() -> Self {
        Cooktop::Lpg
    }
}

/// Display language for a recipe session. `English` means "no overlay".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
    Hinglish,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Hinglish => "Hinglish",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/// A suggested ingredient substitute, returned without mutating any state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Substitution {
    /// Specific replacement including quantity, e.g. "1 tsp baking powder".
    pub substitute: String,
    /// Why it works or how to use it.
    pub explanation: String,
}

/// Ingredients and steps rewritten around the user's available ingredients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRewrite {
    pub ingredients: Vec<String>,
    pub steps: Vec<Step>,
}

/// Display-only translated copy of a recipe. Never fed back into the
/// working recipe, which keeps timer durations correct by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<Step>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_unique_per_call() {
        let a = Recipe::mint_generated_id("Paneer Tikka");
        let b = Recipe::mint_generated_id("Paneer Tikka");
        assert!(a.starts_with("generated-paneer-tikka-"));
        assert_ne!(a, b);
    }

    #[test]
    fn step_timer_applicability() {
        assert!(Step::new("Simmer", 300).has_timer());
        assert!(!Step::new("Serve", 0).has_timer());
    }

    #[test]
    fn default_cooktop_is_lpg() {
        assert!(Cooktop::default().is_default());
        assert_eq!(Cooktop::Induction.display_name(), "Induction Cooktop");
    }
}
