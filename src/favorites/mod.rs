//! Favorites: one logical set per identity, reconciled across sources.
//!
//! Authenticated users persist favorites remotely; guests persist them
//! locally; anonymous users keep them in memory only. On login, favorites
//! accumulated as a guest are merged into the remote set exactly once,
//! best-effort.

pub mod local;
pub mod memory;
pub mod remote;
pub mod rest;

pub use local::{GuestFavorites, JsonFileStore, GUEST_FAVORITES_KEY};
pub use memory::{MemoryLocal, MemoryRemote};
pub use remote::RemoteFavorites;
pub use rest::{RestConfig, RestConfigError, RestFavorites};

use std::sync::Arc;

use crate::error::FavoritesError;
use crate::types::{Identity, Recipe};

/// Outcome of a guest-to-account merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Local entries inserted remotely.
    pub merged: usize,
    /// Local entries already present remotely.
    pub already_present: usize,
    /// Local entries whose insert failed (not retried).
    pub failed: usize,
}

/// The favorites set for one identity.
///
/// Holds the in-memory set and mediates persistence. Mutations are
/// optimistic: the in-memory set is updated first, then persisted, and
/// rolled back to the retained pre-mutation state if persistence fails.
pub struct FavoritesStore {
    identity: Identity,
    remote: Arc<dyn RemoteFavorites>,
    local: Arc<dyn GuestFavorites>,
    favorites: Vec<Recipe>,
}

impl FavoritesStore {
    /// Create a store for the given identity. Identity is explicit context;
    /// a new store is built per login/logout transition.
    pub fn new(
        identity: Identity,
        remote: Arc<dyn RemoteFavorites>,
        local: Arc<dyn GuestFavorites>,
    ) -> Self {
        Self {
            identity,
            remote,
            local,
            favorites: Vec::new(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The current in-memory favorites, in insertion order.
    pub fn favorites(&self) -> &[Recipe] {
        &self.favorites
    }

    /// Pure membership test against the in-memory set.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|r| r.id == id)
    }

    /// Populate the in-memory set from the identity's persistence source.
    ///
    /// Remote fetch failures distinguish a missing backend schema
    /// (`SchemaMissing`) from transient connectivity problems; guest-local
    /// reads never fail.
    pub async fn load(&mut self) -> Result<(), FavoritesError> {
        self.favorites = match self.identity {
            Identity::Authenticated { user_id } => self.remote.fetch_all(user_id).await?,
            Identity::Guest => self.local.read(),
            Identity::Anonymous => Vec::new(),
        };
        Ok(())
    }

    /// Add a favorite. No-op if the id is already present. On persistence
    /// failure the in-memory set is rolled back and the error surfaced; no
    /// automatic retry.
    pub async fn add(&mut self, recipe: Recipe) -> Result<(), FavoritesError> {
        if self.is_favorite(&recipe.id) {
            // Re-favoriting an existing id still refreshes the stored copy
            // remotely (e.g. a newly generated image), mirroring the upsert.
            if let Identity::Authenticated { user_id } = self.identity {
                self.remote.upsert(user_id, &recipe).await?;
                if let Some(existing) = self.favorites.iter_mut().find(|r| r.id == recipe.id) {
                    *existing = recipe;
                }
            }
            return Ok(());
        }

        let before = self.favorites.clone();
        self.favorites.push(recipe.clone());

        let persisted = match self.identity {
            Identity::Authenticated { user_id } => self.remote.upsert(user_id, &recipe).await,
            Identity::Guest => self.local.write(&self.favorites),
            Identity::Anonymous => Ok(()),
        };

        if let Err(e) = persisted {
            tracing::error!("Failed to persist favorite {}: {}", recipe.id, e);
            self.favorites = before;
            return Err(e);
        }
        Ok(())
    }

    /// Remove a favorite by id, with the same optimistic/rollback contract
    /// as `add`.
    pub async fn remove(&mut self, id: &str) -> Result<(), FavoritesError> {
        if !self.is_favorite(id) {
            return Ok(());
        }

        let before = self.favorites.clone();
        self.favorites.retain(|r| r.id != id);

        let persisted = match self.identity {
            Identity::Authenticated { user_id } => self.remote.delete(user_id, id).await,
            Identity::Guest => self.local.write(&self.favorites),
            Identity::Anonymous => Ok(()),
        };

        if let Err(e) = persisted {
            tracing::error!("Failed to remove favorite {}: {}", id, e);
            self.favorites = before;
            return Err(e);
        }
        Ok(())
    }

    /// Merge guest-accumulated favorites into the remote set. Invoked once
    /// per guest-to-authenticated transition, before `load`.
    ///
    /// Best-effort and at-most-once: the guest-local list is cleared
    /// unconditionally after the attempt, even on partial (or total)
    /// failure — merged-once guest data is never retried.
    pub async fn merge_guest_favorites(&mut self) -> Result<MergeReport, FavoritesError> {
        let Identity::Authenticated { user_id } = self.identity else {
            return Err(FavoritesError::NotAuthenticated);
        };

        let local_favorites = self.local.read();
        if local_favorites.is_empty() {
            self.local.clear();
            return Ok(MergeReport::default());
        }

        let mut report = MergeReport::default();

        // Fetch fresh rather than trusting the in-memory set: the remote
        // side may have changed since this store was constructed.
        match self.remote.fetch_all(user_id).await {
            Ok(remote_favorites) => {
                let remote_ids: std::collections::HashSet<&str> =
                    remote_favorites.iter().map(|r| r.id.as_str()).collect();

                for recipe in &local_favorites {
                    if remote_ids.contains(recipe.id.as_str()) {
                        report.already_present += 1;
                        continue;
                    }
                    match self.remote.insert(user_id, recipe).await {
                        Ok(()) => report.merged += 1,
                        Err(e) => {
                            tracing::warn!("Failed to merge guest favorite {}: {}", recipe.id, e);
                            report.failed += 1;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Could not fetch remote favorites for merge: {}", e);
                report.failed = local_favorites.len();
            }
        }

        self.local.clear();
        Ok(report)
    }
}
