//! Remote favorites persistence seam.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::FavoritesError;
use crate::types::Recipe;

/// Remote favorites store, keyed by (user, recipe id).
///
/// Records are denormalized: the full recipe snapshot is stored verbatim so
/// favorites stay renderable even if the canonical catalog changes.
#[async_trait]
pub trait RemoteFavorites: Send + Sync {
    /// Fetch every favorite for the user.
    async fn fetch_all(&self, user_id: Uuid) -> Result<Vec<Recipe>, FavoritesError>;

    /// Insert or update a favorite. An upsert, not an insert: the same recipe
    /// may be re-favorited with updated fields (e.g. a newly generated image).
    async fn upsert(&self, user_id: Uuid, recipe: &Recipe) -> Result<(), FavoritesError>;

    /// Insert a favorite that is known not to exist yet (used by the
    /// guest-to-account merge).
    async fn insert(&self, user_id: Uuid, recipe: &Recipe) -> Result<(), FavoritesError>;

    /// Delete a favorite by recipe id.
    async fn delete(&self, user_id: Uuid, recipe_id: &str) -> Result<(), FavoritesError>;
}
