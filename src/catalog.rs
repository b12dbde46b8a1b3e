//! Built-in curated recipe catalog.
//!
//! These recipes ship with the crate as an embedded JSON fixture and have
//! stable ids, unlike generated recipes which mint a fresh id per generation.

use once_cell::sync::Lazy;

use crate::types::Recipe;

static BUILTIN: Lazy<Vec<Recipe>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../data/builtin_recipes.json"))
        .expect("embedded recipe catalog is valid JSON")
});

/// All curated recipes, in display order.
pub fn builtin_recipes() -> &'static [Recipe] {
    &BUILTIN
}

/// Look up a curated recipe by id.
pub fn find_builtin(id: &str) -> Option<&'static Recipe> {
    BUILTIN.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_loads_and_has_stable_ids() {
        let recipes = builtin_recipes();
        assert!(!recipes.is_empty());
        for recipe in recipes {
            assert!(!recipe.id.is_empty());
            assert!(!recipe.ingredients.is_empty());
            assert!(!recipe.steps.is_empty());
            assert!(!recipe.is_generated);
        }
    }

    #[test]
    fn find_by_id() {
        let recipe = find_builtin("1").expect("catalog has recipe 1");
        assert_eq!(recipe.name, "Classic Tomato Bruschetta");
        assert!(find_builtin("no-such-id").is_none());
    }

    #[test]
    fn timed_steps_carry_seconds() {
        let recipe = find_builtin("2").unwrap();
        let timed: Vec<u32> = recipe
            .steps
            .iter()
            .filter(|s| s.has_timer())
            .map(|s| s.time)
            .collect();
        assert_eq!(timed, vec![420, 300]);
    }
}
