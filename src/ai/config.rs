//! AI configuration from environment variables.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Default OpenRouter base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Default image generation model.
pub const DEFAULT_IMAGE_MODEL: &str = "google/gemini-2.5-flash-image";

/// Default delay between requests in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 500;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for OpenRouter.
    pub api_key: String,
    /// Chat model name.
    pub model: String,
    /// Image generation model name.
    pub image_model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Directory for caching responses.
    pub cache_dir: PathBuf,
    /// If true, only use cache, error if not cached.
    pub offline: bool,
    /// Milliseconds to wait between requests.
    pub rate_limit_ms: u64,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENROUTER_API_KEY`: API key for OpenRouter
    ///
    /// Optional:
    /// - `COOKALONG_AI_MODEL`: Chat model (default: "google/gemini-2.5-flash")
    /// - `COOKALONG_AI_IMAGE_MODEL`: Image model
    /// - `COOKALONG_AI_BASE_URL`: API base URL
    /// - `COOKALONG_AI_CACHE_DIR`: Cache directory (default: "~/.cookalong/ai-cache")
    /// - `COOKALONG_AI_OFFLINE`: Use cache only (default: false)
    /// - `COOKALONG_AI_RATE_LIMIT_MS`: Rate limit in ms (default: 500)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let model = env::var("COOKALONG_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let image_model = env::var("COOKALONG_AI_IMAGE_MODEL")
            .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());

        let base_url =
            env::var("COOKALONG_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let cache_dir = env::var("COOKALONG_AI_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_cache_dir());

        let offline = env::var("COOKALONG_AI_OFFLINE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let rate_limit_ms = env::var("COOKALONG_AI_RATE_LIMIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_MS);

        Ok(Self {
            api_key,
            model,
            image_model,
            base_url,
            cache_dir,
            offline,
            rate_limit_ms,
        })
    }

    /// Get the default cache directory: ~/.cookalong/ai-cache
    pub fn default_cache_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".cookalong").join("ai-cache"))
            .unwrap_or_else(|| PathBuf::from("data/ai-cache"))
    }
}
