//! Guest-local favorites persistence.
//!
//! Guests keep their favorites as a single serialized list under one
//! well-known key, fully overwritten on each mutation. Read failures
//! (missing file, corrupted JSON) are logged and treated as an empty list;
//! they are never fatal.

use std::fs;
use std::path::PathBuf;

use crate::error::FavoritesError;
use crate::types::Recipe;

/// Well-known key the guest favorites list is stored under.
pub const GUEST_FAVORITES_KEY: &str = "guest_favorites";

/// Storage seam for guest favorites.
pub trait GuestFavorites: Send + Sync {
    /// Read the persisted list. Infallible: corruption yields an empty list.
    fn read(&self) -> Vec<Recipe>;

    /// Overwrite the persisted list.
    fn write(&self, recipes: &[Recipe]) -> Result<(), FavoritesError>;

    /// Remove the persisted list entirely.
    fn clear(&self);
}

/// File-backed guest favorites, stored as JSON under the well-known key.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the list in the given directory as `guest_favorites.json`.
    pub fn new(dir: PathBuf) -> Self {
        Self {
            path: dir.join(format!("{}.json", GUEST_FAVORITES_KEY)),
        }
    }

    /// Default location: ~/.cookalong/guest_favorites.json
    pub fn default_location() -> Self {
        let dir = dirs::home_dir()
            .map(|h| h.join(".cookalong"))
            .unwrap_or_else(|| PathBuf::from("data"));
        Self::new(dir)
    }
}

impl GuestFavorites for JsonFileStore {
    fn read(&self) -> Vec<Recipe> {
        if !self.path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(recipes) => recipes,
                Err(e) => {
                    tracing::warn!("Guest favorites file is corrupted, treating as empty: {}", e);
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read guest favorites, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn write(&self, recipes: &[Recipe]) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| FavoritesError::LocalStorage(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(recipes)
            .map_err(|e| FavoritesError::LocalStorage(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| FavoritesError::LocalStorage(e.to_string()))
    }

    fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!("Failed to clear guest favorites: {}", e);
            }
        }
    }
}
