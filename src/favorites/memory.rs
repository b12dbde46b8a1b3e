//! In-memory favorites stores for testing.
//!
//! Both fakes support failure injection so tests can exercise the
//! optimistic-update rollback paths without a network.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use super::local::GuestFavorites;
use super::remote::RemoteFavorites;
use crate::error::FavoritesError;
use crate::types::Recipe;

/// In-memory remote store, keyed by (user, recipe id), insertion-ordered.
#[derive(Debug, Default)]
pub struct MemoryRemote {
    rows: Mutex<Vec<(Uuid, Recipe)>>,
    /// Every call fails with `Connectivity`.
    offline: AtomicBool,
    /// Every call fails with `SchemaMissing`.
    schema_missing: AtomicBool,
    /// Writes fail with `Connectivity`; reads still work.
    fail_writes: AtomicBool,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_schema_missing(&self, missing: bool) {
        self.schema_missing.store(missing, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a favorite directly, bypassing failure injection.
    pub fn seed(&self, user_id: Uuid, recipe: Recipe) {
        self.rows.lock().unwrap().push((user_id, recipe));
    }

    /// All favorites for a user, in insertion order.
    pub fn recipes_for(&self, user_id: Uuid) -> Vec<Recipe> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, r)| r.clone())
            .collect()
    }

    fn check(&self, is_write: bool) -> Result<(), FavoritesError> {
        if self.schema_missing.load(Ordering::SeqCst) {
            return Err(FavoritesError::SchemaMissing(
                "relation \"user_favorites\" does not exist".to_string(),
            ));
        }
        if self.offline.load(Ordering::SeqCst)
            || (is_write && self.fail_writes.load(Ordering::SeqCst))
        {
            return Err(FavoritesError::Connectivity(
                "remote store unreachable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteFavorites for MemoryRemote {
    async fn fetch_all(&self, user_id: Uuid) -> Result<Vec<Recipe>, FavoritesError> {
        self.check(false)?;
        Ok(self.recipes_for(user_id))
    }

    async fn upsert(&self, user_id: Uuid, recipe: &Recipe) -> Result<(), FavoritesError> {
        self.check(true)?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows
            .iter_mut()
            .find(|(u, r)| *u == user_id && r.id == recipe.id)
        {
            existing.1 = recipe.clone();
        } else {
            rows.push((user_id, recipe.clone()));
        }
        Ok(())
    }

    async fn insert(&self, user_id: Uuid, recipe: &Recipe) -> Result<(), FavoritesError> {
        self.check(true)?;
        self.rows.lock().unwrap().push((user_id, recipe.clone()));
        Ok(())
    }

    async fn delete(&self, user_id: Uuid, recipe_id: &str) -> Result<(), FavoritesError> {
        self.check(true)?;
        self.rows
            .lock()
            .unwrap()
            .retain(|(u, r)| !(*u == user_id && r.id == recipe_id));
        Ok(())
    }
}

/// In-memory guest store.
#[derive(Debug, Default)]
pub struct MemoryLocal {
    recipes: Mutex<Vec<Recipe>>,
    fail_writes: AtomicBool,
}

impl MemoryLocal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Mutex::new(recipes),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl GuestFavorites for MemoryLocal {
    fn read(&self) -> Vec<Recipe> {
        self.recipes.lock().unwrap().clone()
    }

    fn write(&self, recipes: &[Recipe]) -> Result<(), FavoritesError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FavoritesError::LocalStorage("quota exceeded".to_string()));
        }
        *self.recipes.lock().unwrap() = recipes.to_vec();
        Ok(())
    }

    fn clear(&self) {
        self.recipes.lock().unwrap().clear();
    }
}
