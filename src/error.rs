use thiserror::Error;

/// Errors from favorites persistence (remote or guest-local).
#[derive(Error, Debug)]
pub enum FavoritesError {
    /// The remote store could not be reached. Transient; callers should
    /// render a "try again later" message.
    #[error("Could not reach the favorites backend: {0}")]
    Connectivity(String),

    /// The remote store is reachable but the favorites table does not exist.
    /// Callers should render a "setup required" message, not a retry prompt.
    #[error("Favorites backend is not set up: {0}")]
    SchemaMissing(String),

    /// Writing the guest-local favorites list failed (e.g. disk full).
    #[error("Failed to persist guest favorites: {0}")]
    LocalStorage(String),

    /// The operation requires an authenticated identity.
    #[error("Operation requires an authenticated user")]
    NotAuthenticated,
}

/// Errors from the recipe generation gateway.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The AI backend returned an error or no usable data.
    #[error("AI request failed: {0}")]
    Api(String),

    /// The response body was not valid JSON.
    #[error("Failed to parse AI response: {0}")]
    Parse(String),

    /// The response parsed but failed structural validation
    /// (missing required fields, wrong shapes).
    #[error("AI response failed validation: {0}")]
    Validation(String),

    /// Response not in cache while offline mode is enabled.
    #[error("Response not in cache and offline mode is enabled")]
    OfflineNotCached,

    #[error("Configuration error: {0}")]
    Config(#[from] crate::ai::ConfigError),
}
