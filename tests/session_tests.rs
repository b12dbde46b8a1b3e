//! Integration tests for recipe sessions.
//!
//! Drive a session through the AI-backed gateway with a fake client, and
//! verify the baseline/overlay rules: cooktop switches restore byte-equal
//! steps, translations never touch timer durations, and the ingredient
//! rewrite is strictly one-shot.

use std::sync::Arc;

use cookalong::ai::{AiRecipeGenerator, FakeClient};
use cookalong::{Cooktop, GenerateError, Language, Recipe, RecipeSession, Step};

fn recipe() -> Recipe {
    Recipe {
        id: "1".to_string(),
        name: "Lemon Rice".to_string(),
        description: "Tangy South Indian rice.".to_string(),
        category: "Quick Meals".to_string(),
        image_url: String::new(),
        ingredients: vec![
            "2 cups cooked rice".to_string(),
            "1 lemon".to_string(),
            "2 tbsp peanuts".to_string(),
        ],
        steps: vec![
            Step::new("Temper mustard seeds on medium flame.", 120),
            Step::new("Add rice and mix well.", 0),
            Step::new("Rest covered.", 300),
        ],
        prep_time: 10,
        cook_time: 15,
        servings: 2,
        is_generated: false,
    }
}

fn gateway(client: FakeClient) -> AiRecipeGenerator {
    AiRecipeGenerator::new(Arc::new(client))
}

const INDUCTION_STEPS: &str = r#"{"steps": [
    {"description": "Temper mustard seeds at 120°C / 1000W.", "time": 120},
    {"description": "Add rice and mix well.", "time": 0},
    {"description": "Rest covered.", "time": 300}
]}"#;

const KETTLE_STEPS: &str = r#"{"steps": [
    {"description": "Pour boiling kettle water over the tempering spices.", "time": 60},
    {"description": "Add rice and mix well.", "time": 0}
]}"#;

#[test]
fn new_session_starts_at_step_zero_with_all_ingredients_checked() {
    let session = RecipeSession::new(recipe());

    assert_eq!(session.active_step(), Some(0));
    assert!(session.completed_steps().is_empty());
    assert!(!session.has_unchecked_ingredients());
    assert!(!session.is_ingredient_modified());
    assert!(!session.is_cooktop_modified());
    assert_eq!(session.cooktop(), Cooktop::Lpg);
    assert_eq!(session.language(), Language::English);
    // Step 0 has a duration, so a timer is armed for it.
    assert_eq!(session.timer().map(|t| t.duration()), Some(120));
}

#[test]
fn toggling_ingredients_updates_the_checklist() {
    let mut session = RecipeSession::new(recipe());

    assert!(session.toggle_ingredient("1 lemon"));
    assert!(!session.is_ingredient_checked("1 lemon"));
    assert!(session.has_unchecked_ingredients());
    assert_eq!(
        session.checked_ingredients(),
        vec!["2 cups cooked rice".to_string(), "2 tbsp peanuts".to_string()]
    );

    assert!(session.toggle_ingredient("1 lemon"));
    assert!(!session.has_unchecked_ingredients());
}

#[test]
fn expanding_a_step_rearms_the_timer() {
    let mut session = RecipeSession::new(recipe());

    // Step 1 has no duration.
    session.toggle_step_expanded(1);
    assert_eq!(session.active_step(), Some(1));
    assert!(session.timer().is_none());

    session.toggle_step_expanded(2);
    assert_eq!(session.timer().map(|t| t.duration()), Some(300));

    // Collapsing drops the timer.
    session.toggle_step_expanded(2);
    assert_eq!(session.active_step(), None);
    assert!(session.timer().is_none());
}

#[test]
fn advancing_completes_the_current_step() {
    let mut session = RecipeSession::new(recipe());

    assert!(session.advance_to_next_step());
    assert!(session.is_step_completed(0));
    assert_eq!(session.active_step(), Some(1));

    assert!(session.advance_to_next_step());
    // Last step: nowhere to advance.
    assert!(!session.advance_to_next_step());
    assert_eq!(session.active_step(), Some(2));
}

#[tokio::test]
async fn ingredient_rewrite_is_one_shot_and_makes_checklist_inert() {
    let client = FakeClient::with_response(
        "only the ingredients i have",
        r#"{
            "ingredients": ["2 cups cooked rice", "2 tbsp peanuts"],
            "steps": [{"description": "Toast peanuts and fold into rice.", "time": 180}]
        }"#,
    );
    let gateway = gateway(client);

    let mut session = RecipeSession::new(recipe());
    session.toggle_ingredient("1 lemon");
    session.toggle_step_completed(1);

    session.adapt_to_ingredients(&gateway).await.unwrap();

    assert!(session.is_ingredient_modified());
    assert_eq!(session.working().ingredients.len(), 2);
    assert_eq!(session.working().steps.len(), 1);
    assert!(session.completed_steps().is_empty());
    // Original snapshot untouched.
    assert_eq!(session.original().steps.len(), 3);

    // Checklist is now inert.
    assert!(!session.toggle_ingredient("2 tbsp peanuts"));
    assert!(!session.apply_substitute("1 lemon", "lime juice"));

    // A second rewrite is a no-op, not another AI call.
    session.adapt_to_ingredients(&gateway).await.unwrap();
    assert_eq!(session.working().steps.len(), 1);
}

#[tokio::test]
async fn failed_ingredient_rewrite_leaves_the_recipe_untouched() {
    let client = FakeClient::with_response("only the ingredients i have", "not json");
    let gateway = gateway(client);

    let mut session = RecipeSession::new(recipe());
    session.toggle_ingredient("1 lemon");
    session.toggle_step_completed(0);

    let err = session.adapt_to_ingredients(&gateway).await.unwrap_err();
    assert!(matches!(err, GenerateError::Parse(_)));

    assert!(!session.is_ingredient_modified());
    assert_eq!(session.working().steps.len(), 3);
    // Completion is cleared even on failure; the attempt invalidated it.
    assert!(session.completed_steps().is_empty());
    // Checklist still live.
    assert!(session.toggle_ingredient("1 lemon"));
}

#[tokio::test]
async fn cooktop_round_trip_restores_the_baseline_exactly() {
    let client = FakeClient::new();
    client.add_response("induction cooktop", INDUCTION_STEPS);
    client.add_response("simple electric kettle", KETTLE_STEPS);
    let gateway = gateway(client);

    let mut session = RecipeSession::new(recipe());
    let baseline = session.working().steps.clone();

    session
        .change_cooktop(&gateway, Cooktop::Induction)
        .await
        .unwrap();
    assert_eq!(session.cooktop(), Cooktop::Induction);
    assert!(session.is_cooktop_modified());
    assert!(session.working().steps[0].description.contains("1000W"));

    session
        .change_cooktop(&gateway, Cooktop::ElectricKettle)
        .await
        .unwrap();
    assert_eq!(session.working().steps.len(), 2);

    session.change_cooktop(&gateway, Cooktop::Lpg).await.unwrap();
    assert_eq!(session.cooktop(), Cooktop::Lpg);
    assert!(!session.is_cooktop_modified());
    assert_eq!(session.working().steps, baseline);
}

#[tokio::test]
async fn cooktop_rewrites_always_start_from_the_baseline() {
    let client = FakeClient::new();
    client.add_response("induction cooktop", INDUCTION_STEPS);
    client.add_response("simple electric kettle", KETTLE_STEPS);
    let gateway = gateway(client);

    let mut session = RecipeSession::new(recipe());
    session
        .change_cooktop(&gateway, Cooktop::Induction)
        .await
        .unwrap();

    // If the kettle rewrite had been fed the induction steps, the prompt
    // would contain the wattage text and the registered kettle response
    // would still match; instead verify via a client that only answers
    // prompts carrying the original flame wording.
    let strict = FakeClient::with_response("medium flame", KETTLE_STEPS);
    let strict_gateway = AiRecipeGenerator::new(Arc::new(strict));
    session
        .change_cooktop(&strict_gateway, Cooktop::ElectricKettle)
        .await
        .unwrap();
    assert_eq!(session.working().steps.len(), 2);
}

#[tokio::test]
async fn failed_cooktop_switch_reverts_the_selection() {
    // No responses configured: every AI call fails.
    let gateway = gateway(FakeClient::new());

    let mut session = RecipeSession::new(recipe());
    session.toggle_step_completed(0);

    let err = session
        .change_cooktop(&gateway, Cooktop::Induction)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::Api(_)));

    assert_eq!(session.cooktop(), Cooktop::Lpg);
    assert!(!session.is_cooktop_modified());
    assert_eq!(session.working().steps.len(), 3);
    // The failed attempt still cleared completion.
    assert!(session.completed_steps().is_empty());
}

#[tokio::test]
async fn failed_switch_from_an_adapted_cooktop_keeps_the_baseline() {
    let client = FakeClient::with_response("induction cooktop", INDUCTION_STEPS);
    let gateway = gateway(client);

    let mut session = RecipeSession::new(recipe());
    let baseline = session.working().steps.clone();
    session
        .change_cooktop(&gateway, Cooktop::Induction)
        .await
        .unwrap();

    // Kettle prompt has no registered response.
    let err = session
        .change_cooktop(&gateway, Cooktop::ElectricKettle)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::Api(_)));
    assert_eq!(session.cooktop(), Cooktop::Induction);
    assert!(session.is_cooktop_modified());

    // The baseline survives the failure and still restores.
    session.change_cooktop(&gateway, Cooktop::Lpg).await.unwrap();
    assert_eq!(session.working().steps, baseline);
}

#[tokio::test]
async fn translation_overlays_text_without_touching_times() {
    let client = FakeClient::with_response(
        "into hindi",
        r#"{
            "name": "Nimbu Chawal",
            "description": "Chatpata dakshin bharatiya chawal.",
            "ingredients": ["2 cup pake chawal", "1 nimbu", "2 bade chammach moongphali"],
            "steps": [
                {"description": "Rai ko madhyam aanch par tadkayen.", "time": 120},
                {"description": "Chawal milayen.", "time": 0},
                {"description": "Dhak kar rakhen.", "time": 300}
            ]
        }"#,
    );
    let gateway = gateway(client);

    let mut session = RecipeSession::new(recipe());
    session.translate_to(&gateway, Language::Hindi).await.unwrap();

    assert_eq!(session.language(), Language::Hindi);
    assert_eq!(session.display_name(), "Nimbu Chawal");
    assert_eq!(
        session.display_step_description(0),
        Some("Rai ko madhyam aanch par tadkayen.")
    );
    // The working copy, and with it every timer duration, is untouched.
    assert_eq!(session.working().name, "Lemon Rice");
    assert_eq!(session.working().steps[0].time, 120);
    assert_eq!(session.timer().map(|t| t.duration()), Some(120));

    session
        .translate_to(&gateway, Language::English)
        .await
        .unwrap();
    assert_eq!(session.language(), Language::English);
    assert!(session.translation().is_none());
    assert_eq!(session.display_name(), "Lemon Rice");
}

#[tokio::test]
async fn failed_translation_keeps_the_previous_language() {
    let gateway = gateway(FakeClient::new());

    let mut session = RecipeSession::new(recipe());
    let err = session
        .translate_to(&gateway, Language::Hinglish)
        .await
        .unwrap_err();

    assert!(matches!(err, GenerateError::Api(_)));
    assert_eq!(session.language(), Language::English);
    assert!(session.translation().is_none());
}

#[tokio::test]
async fn substitutes_apply_to_the_working_copy_and_recheck() {
    let client = FakeClient::with_response(
        "do not have",
        r#"{"substitute": "2 tbsp lime juice", "explanation": "Same acidity."}"#,
    );
    let gateway = gateway(client);

    let mut session = RecipeSession::new(recipe());
    session.toggle_ingredient("1 lemon");

    let suggestion = session.request_substitute(&gateway, "1 lemon").await.unwrap();
    assert_eq!(suggestion.substitute, "2 tbsp lime juice");

    assert!(session.apply_substitute("1 lemon", &suggestion.substitute));
    assert!(session
        .working()
        .ingredients
        .contains(&"2 tbsp lime juice".to_string()));
    assert!(session.is_ingredient_checked("2 tbsp lime juice"));
    assert!(!session.has_unchecked_ingredients());

    // Nothing to replace.
    assert!(!session.apply_substitute("1 lemon", "anything"));
}

#[tokio::test]
async fn generate_image_updates_the_working_copy() {
    let client = FakeClient::new().with_image_response("data:image/jpeg;base64,AAAA");
    let gateway = gateway(client);

    let mut session = RecipeSession::new(recipe());
    session.generate_image(&gateway).await.unwrap();
    assert!(session.working().image_url.starts_with("data:image/jpeg"));
    assert!(session.original().image_url.is_empty());
}

#[tokio::test]
async fn reset_restores_the_just_opened_state() {
    let client = FakeClient::new();
    client.add_response("induction cooktop", INDUCTION_STEPS);
    client.add_response(
        "into hindi",
        r#"{"name": "N", "description": "D", "ingredients": ["i"], "steps": [{"description": "s", "time": 120}]}"#,
    );
    client.add_response(
        "only the ingredients i have",
        r#"{"ingredients": ["2 cups cooked rice"], "steps": [{"description": "Just rice.", "time": 0}]}"#,
    );
    let gateway = gateway(client);

    let mut session = RecipeSession::new(recipe());
    session.toggle_ingredient("1 lemon");
    session.toggle_step_completed(1);
    session
        .change_cooktop(&gateway, Cooktop::Induction)
        .await
        .unwrap();
    session.translate_to(&gateway, Language::Hindi).await.unwrap();
    session.adapt_to_ingredients(&gateway).await.unwrap();

    session.reset();

    assert_eq!(session.working(), session.original());
    assert_eq!(session.active_step(), Some(0));
    assert!(session.completed_steps().is_empty());
    assert!(!session.is_ingredient_modified());
    assert!(!session.is_cooktop_modified());
    assert_eq!(session.cooktop(), Cooktop::Lpg);
    assert_eq!(session.language(), Language::English);
    assert!(session.translation().is_none());
    assert!(!session.has_unchecked_ingredients());
    assert_eq!(session.timer().map(|t| t.duration()), Some(120));
}
