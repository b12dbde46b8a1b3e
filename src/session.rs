//! Per-recipe cook-along session state.
//!
//! A `RecipeSession` tracks everything mutable about viewing one recipe: the
//! working copy (possibly rewritten by the AI), step expansion and completion,
//! the ingredient checklist, the translation overlay, the cooktop selection,
//! and the step timer. The original snapshot is always recoverable via
//! `reset`.
//!
//! Two adaptation axes behave differently:
//!
//! - The cooktop axis is reversible. The step list is captured the moment the
//!   session leaves the default cooktop and every later cooktop rewrite works
//!   from that baseline, so switching cooktops never compounds one AI rewrite
//!   on top of another. Returning to the default restores the baseline and
//!   discards the capture (a one-level undo, not a general undo stack).
//!
//! - The ingredient axis is one-shot. Once the recipe has been rewritten
//!   around the checked ingredients, the checklist goes inert until a full
//!   reset: re-running the rewrite against its own output would compound
//!   hallucinated changes.

use std::collections::{BTreeSet, HashMap};

use crate::ai::RecipeGenerator;
use crate::error::GenerateError;
use crate::timer::StepTimerEngine;
use crate::types::{Cooktop, Language, Recipe, Step, Substitution, TranslatedRecipe};

pub struct RecipeSession {
    /// The recipe as first loaded. Never mutated.
    original: Recipe,
    /// The currently displayed copy; diverges from `original` via adaptation.
    working: Recipe,
    /// Index of the expanded step, if any.
    active_step: Option<usize>,
    /// Completed step indices; only removed by explicit un-check or reset.
    completed_steps: BTreeSet<usize>,
    /// Checklist over the original ingredient strings; all true at start.
    ingredient_checked: HashMap<String, bool>,
    /// Set once the ingredient rewrite has been applied; makes the checklist inert.
    ingredient_modified: bool,
    language: Language,
    /// Display-only overlay; never feeds back into `working`.
    translation: Option<TranslatedRecipe>,
    cooktop: Cooktop,
    /// Step list captured on first leaving the default cooktop.
    baseline_steps: Option<Vec<Step>>,
    /// Timer for the expanded step, if that step has a duration. Discarded
    /// and reinitialized whenever the expanded step changes.
    timer: Option<StepTimerEngine>,
}

fn all_checked(recipe: &Recipe) -> HashMap<String, bool> {
    recipe
        .ingredients
        .iter()
        .map(|ing| (ing.clone(), true))
        .collect()
}

impl RecipeSession {
    /// Open a session on a recipe snapshot. The first step starts expanded.
    pub fn new(recipe: Recipe) -> Self {
        let mut session = Self {
            working: recipe.clone(),
            ingredient_checked: all_checked(&recipe),
            original: recipe,
            active_step: Some(0),
            completed_steps: BTreeSet::new(),
            ingredient_modified: false,
            language: Language::English,
            translation: None,
            cooktop: Cooktop::default(),
            baseline_steps: None,
            timer: None,
        };
        session.refresh_timer();
        session
    }

    pub fn original(&self) -> &Recipe {
        &self.original
    }

    pub fn working(&self) -> &Recipe {
        &self.working
    }

    pub fn active_step(&self) -> Option<usize> {
        self.active_step
    }

    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.completed_steps
    }

    pub fn is_step_completed(&self, index: usize) -> bool {
        self.completed_steps.contains(&index)
    }

    pub fn cooktop(&self) -> Cooktop {
        self.cooktop
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn translation(&self) -> Option<&TranslatedRecipe> {
        self.translation.as_ref()
    }

    /// Whether the one-shot ingredient rewrite has been applied.
    pub fn is_ingredient_modified(&self) -> bool {
        self.ingredient_modified
    }

    /// Whether the steps are currently adapted for a non-default cooktop.
    pub fn is_cooktop_modified(&self) -> bool {
        self.baseline_steps.is_some()
    }

    /// Timer for the expanded step, if it has one.
    pub fn timer(&self) -> Option<&StepTimerEngine> {
        self.timer.as_ref()
    }

    pub fn timer_mut(&mut self) -> Option<&mut StepTimerEngine> {
        self.timer.as_mut()
    }

    // ---- Ingredient checklist ----

    /// Unknown ingredients read as checked, matching the all-true default.
    pub fn is_ingredient_checked(&self, ingredient: &str) -> bool {
        *self.ingredient_checked.get(ingredient).unwrap_or(&true)
    }

    /// Flip an ingredient's checked state. Returns false without applying
    /// when the checklist is inert (post ingredient-rewrite); callers should
    /// disable the checklist UI in that state rather than swallow writes.
    pub fn toggle_ingredient(&mut self, ingredient: &str) -> bool {
        if self.ingredient_modified {
            return false;
        }
        let entry = self
            .ingredient_checked
            .entry(ingredient.to_string())
            .or_insert(true);
        *entry = !*entry;
        true
    }

    /// Working-order list of ingredients currently marked available.
    pub fn checked_ingredients(&self) -> Vec<String> {
        self.working
            .ingredients
            .iter()
            .filter(|ing| self.is_ingredient_checked(ing))
            .cloned()
            .collect()
    }

    pub fn has_unchecked_ingredients(&self) -> bool {
        self.working
            .ingredients
            .iter()
            .any(|ing| !self.is_ingredient_checked(ing))
    }

    // ---- Adaptation: ingredient axis (one-shot) ----

    /// Rewrite the working recipe around the checked ingredients.
    ///
    /// Completed steps are cleared on entry — rewritten steps don't retain
    /// the old steps' meaning whether or not the rewrite lands. On failure
    /// the working copy is untouched. On success the checklist goes inert
    /// until `reset`.
    pub async fn adapt_to_ingredients(
        &mut self,
        gateway: &dyn RecipeGenerator,
    ) -> Result<(), GenerateError> {
        if self.ingredient_modified {
            return Ok(());
        }

        self.completed_steps.clear();
        let available = self.checked_ingredients();

        let rewrite = gateway
            .adapt_for_ingredients(
                &self.working.name,
                &self.working.ingredients,
                &available,
                &self.working.steps,
            )
            .await?;

        self.working.ingredients = rewrite.ingredients;
        self.working.steps = rewrite.steps;
        self.ingredient_modified = true;
        self.clamp_active_step();
        Ok(())
    }

    // ---- Adaptation: cooktop axis (reversible via baseline) ----

    /// Switch the cooktop the instructions are written for.
    ///
    /// Completed steps are cleared on every attempt, success or failure,
    /// since step semantics may have shifted. On failure the working steps
    /// are untouched and the selection stays on the previous cooktop.
    pub async fn change_cooktop(
        &mut self,
        gateway: &dyn RecipeGenerator,
        target: Cooktop,
    ) -> Result<(), GenerateError> {
        if target == self.cooktop {
            return Ok(());
        }

        self.completed_steps.clear();

        if target.is_default() {
            if let Some(baseline) = self.baseline_steps.take() {
                self.working.steps = baseline;
            }
            self.cooktop = target;
            self.clamp_active_step();
            return Ok(());
        }

        // Always rewrite from the pre-adaptation baseline so cooktop switches
        // never stack one rewrite on another.
        let first_capture = self.baseline_steps.is_none();
        if first_capture {
            self.baseline_steps = Some(self.working.steps.clone());
        }
        let base = self
            .baseline_steps
            .clone()
            .unwrap_or_else(|| self.working.steps.clone());

        match gateway
            .adapt_for_cooktop(&self.working.name, &base, target)
            .await
        {
            Ok(steps) => {
                self.working.steps = steps;
                self.cooktop = target;
                self.clamp_active_step();
                Ok(())
            }
            Err(e) => {
                // Selection reverts (it was never advanced); an untouched
                // first capture is discarded so the session reads as
                // unmodified.
                if first_capture {
                    self.baseline_steps = None;
                }
                Err(e)
            }
        }
    }

    // ---- Translation overlay ----

    /// Change the display language. `English` clears the overlay; other
    /// languages fetch one. On failure the previous language is kept. The
    /// overlay never touches `working`, so step times cannot drift.
    pub async fn translate_to(
        &mut self,
        gateway: &dyn RecipeGenerator,
        target: Language,
    ) -> Result<(), GenerateError> {
        if target == self.language {
            return Ok(());
        }

        if target == Language::English {
            self.translation = None;
            self.language = target;
            return Ok(());
        }

        let translated = gateway.translate(&self.working, target).await?;
        self.translation = Some(translated);
        self.language = target;
        Ok(())
    }

    // ---- Substitution ----

    /// Ask for a substitute for a missing ingredient. Read-only: no session
    /// state changes until `apply_substitute`.
    pub async fn request_substitute(
        &self,
        gateway: &dyn RecipeGenerator,
        ingredient: &str,
    ) -> Result<Substitution, GenerateError> {
        gateway
            .substitute(&self.working.name, &self.working.ingredients, ingredient)
            .await
    }

    /// Replace `old` with `new` in the working ingredients and re-key the
    /// checklist (the substitute starts checked). Returns false if nothing
    /// was replaced or the checklist is inert.
    pub fn apply_substitute(&mut self, old: &str, new: &str) -> bool {
        if self.ingredient_modified {
            return false;
        }
        let mut replaced = false;
        for ing in &mut self.working.ingredients {
            if ing == old {
                *ing = new.to_string();
                replaced = true;
            }
        }
        if replaced {
            self.ingredient_checked.remove(old);
            self.ingredient_checked.insert(new.to_string(), true);
        }
        replaced
    }

    // ---- Step navigation ----

    /// Expand or collapse a step. Changing the expanded step discards the
    /// previous step's timer and initializes one for the new step.
    pub fn toggle_step_expanded(&mut self, index: usize) {
        if index >= self.working.steps.len() {
            return;
        }
        self.active_step = if self.active_step == Some(index) {
            None
        } else {
            Some(index)
        };
        self.refresh_timer();
    }

    /// Mark or unmark a step as completed. Independent of expansion.
    pub fn toggle_step_completed(&mut self, index: usize) {
        if index >= self.working.steps.len() {
            return;
        }
        if !self.completed_steps.remove(&index) {
            self.completed_steps.insert(index);
        }
    }

    /// Complete the expanded step and expand the next one (the timer-end
    /// "go to next step" flow). Returns false when there is no next step.
    pub fn advance_to_next_step(&mut self) -> bool {
        let Some(current) = self.active_step else {
            return false;
        };
        if current + 1 >= self.working.steps.len() {
            return false;
        }
        self.completed_steps.insert(current);
        self.active_step = Some(current + 1);
        self.refresh_timer();
        true
    }

    // ---- Image generation ----

    /// Generate a cover image for the working recipe. Refreshing any stored
    /// favorite copy is the caller's job.
    pub async fn generate_image(
        &mut self,
        gateway: &dyn RecipeGenerator,
    ) -> Result<(), GenerateError> {
        let url = gateway
            .generate_image(&self.working.name, &self.working.description)
            .await?;
        self.working.image_url = url;
        Ok(())
    }

    // ---- Reset ----

    /// Discard every modification: working copy, checklist, completion,
    /// cooktop baseline, translation overlay, and timer all return to their
    /// just-opened state.
    pub fn reset(&mut self) {
        self.working = self.original.clone();
        self.ingredient_checked = all_checked(&self.original);
        self.ingredient_modified = false;
        self.completed_steps.clear();
        self.active_step = Some(0);
        self.language = Language::English;
        self.translation = None;
        self.cooktop = Cooktop::default();
        self.baseline_steps = None;
        self.refresh_timer();
    }

    // ---- Display resolution ----

    /// Name to display: the overlay's when translated, else the working copy's.
    pub fn display_name(&self) -> &str {
        match (&self.translation, self.language) {
            (Some(t), lang) if lang != Language::English => &t.name,
            _ => &self.working.name,
        }
    }

    pub fn display_description(&self) -> &str {
        match (&self.translation, self.language) {
            (Some(t), lang) if lang != Language::English => &t.description,
            _ => &self.working.description,
        }
    }

    /// Ingredient text to display at a working-list index.
    pub fn display_ingredient(&self, index: usize) -> Option<&str> {
        if self.language != Language::English {
            if let Some(translated) = self
                .translation
                .as_ref()
                .and_then(|t| t.ingredients.get(index))
            {
                return Some(translated);
            }
        }
        self.working.ingredients.get(index).map(String::as_str)
    }

    /// Step description to display; the overlay substitutes text only,
    /// timer durations always come from the working step.
    pub fn display_step_description(&self, index: usize) -> Option<&str> {
        if self.language != Language::English {
            if let Some(step) = self.translation.as_ref().and_then(|t| t.steps.get(index)) {
                return Some(&step.description);
            }
        }
        self.working.steps.get(index).map(|s| s.description.as_str())
    }

    // ---- Internals ----

    /// Rewrites can shrink the step list; drop the expansion (and timer) if
    /// it points past the end, otherwise re-arm the timer for the (possibly
    /// new) step at the same index.
    fn clamp_active_step(&mut self) {
        if let Some(index) = self.active_step {
            if index >= self.working.steps.len() {
                self.active_step = None;
            }
        }
        self.refresh_timer();
    }

    fn refresh_timer(&mut self) {
        // Dropping the old engine aborts its tick task.
        self.timer = self
            .active_step
            .and_then(|i| self.working.steps.get(i))
            .filter(|step| step.has_timer())
            .map(|step| StepTimerEngine::new(step.time));
    }
}
