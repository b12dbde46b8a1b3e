//! Disk-based AI response cache.
//!
//! Responses are keyed by prompt family, model, and a content hash of the
//! messages, so re-running the same adaptation or translation costs nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

use super::types::{ChatMessage, ChatResponse};

/// Disk-based AI response cache.
pub struct AiCache {
    cache_dir: PathBuf,
}

/// A cached response with provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    pub content: String,
    pub cached_at: DateTime<Utc>,
    pub model: String,
}

impl From<CachedResponse> for ChatResponse {
    fn from(cached: CachedResponse) -> Self {
        Self {
            content: cached.content,
            cached: true,
        }
    }
}

/// Cache key components.
#[derive(Debug, Clone)]
pub struct CacheKey {
    pub prompt_name: String,
    pub model: String,
    pub input_hash: String,
}

impl CacheKey {
    pub fn new(prompt_name: &str, model: &str, messages: &[ChatMessage]) -> Self {
        let input_json = serde_json::to_string(messages).unwrap_or_default();
        Self {
            prompt_name: prompt_name.to_string(),
            model: model.to_string(),
            input_hash: sha256_hex(&input_json),
        }
    }

    /// Convert to a filesystem path relative to the cache directory.
    ///
    /// Format: {prompt_name}/{model_safe}/{hash[0:2]}/{hash}.json
    pub fn to_path(&self) -> PathBuf {
        // Model names contain slashes (e.g. "google/gemini-2.5-flash").
        let model_safe = self.model.replace('/', "--");

        PathBuf::new()
            .join(&self.prompt_name)
            .join(&model_safe)
            .join(&self.input_hash[..2])
            .join(format!("{}.json", &self.input_hash))
    }
}

impl AiCache {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Get a cached response if it exists.
    pub fn get(&self, key: &CacheKey) -> Option<CachedResponse> {
        let path = self.cache_dir.join(key.to_path());
        if path.exists() {
            let content = fs::read_to_string(&path).ok()?;
            serde_json::from_str(&content).ok()
        } else {
            None
        }
    }

    /// Store a response in the cache.
    pub fn put(&self, key: &CacheKey, response: &ChatResponse, model: &str) -> std::io::Result<()> {
        let path = self.cache_dir.join(key.to_path());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let cached = CachedResponse {
            content: response.content.clone(),
            cached_at: Utc::now(),
            model: model.to_string(),
        };

        let json = serde_json::to_string_pretty(&cached)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&path, json)
    }

    /// Clear all cached responses.
    pub fn clear(&self) -> std::io::Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_path_layout() {
        let key = CacheKey::new(
            "translate",
            "google/gemini-2.5-flash",
            &[ChatMessage::user("test")],
        );

        let path = key.to_path();
        assert!(path.starts_with("translate/google--gemini-2.5-flash/"));
        assert!(path.to_string_lossy().ends_with(".json"));
    }

    #[test]
    fn cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AiCache::new(dir.path().to_path_buf());
        let key = CacheKey::new("tip", "fake-model", &[ChatMessage::user("hello")]);

        assert!(cache.get(&key).is_none());

        let response = ChatResponse {
            content: "Season as you go.".to_string(),
            cached: false,
        };
        cache.put(&key, &response, "fake-model").unwrap();

        let hit = cache.get(&key).expect("cache hit after put");
        assert_eq!(hit.content, "Season as you go.");
        assert_eq!(hit.model, "fake-model");
    }
}
