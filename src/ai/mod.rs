//! AI integration: the recipe generation gateway and its backing client.
//!
//! This module provides:
//! - `RecipeGenerator` trait: the abstract gateway sessions and pages talk to
//! - `AiRecipeGenerator`: implementation over an OpenAI-compatible chat API
//! - `CachingAiClient`: OpenRouter-backed client with disk caching and rate
//!   limiting
//! - `FakeClient`: deterministic test double
//! - Prompt templates for every gateway capability
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENROUTER_API_KEY` (required): Your OpenRouter API key
//! - `COOKALONG_AI_MODEL` (optional): Chat model name
//! - `COOKALONG_AI_IMAGE_MODEL` (optional): Image model name
//! - `COOKALONG_AI_BASE_URL` (optional): API base URL
//! - `COOKALONG_AI_CACHE_DIR` (optional): Cache directory path
//! - `COOKALONG_AI_OFFLINE` (optional): Set to "true" to use cache only
//! - `COOKALONG_AI_RATE_LIMIT_MS` (optional): Delay between requests in ms

mod cache;
mod client;
mod config;
mod fake;
mod generator;
pub mod prompts;
mod types;

pub use cache::{AiCache, CacheKey, CachedResponse};
pub use client::{AiClient, CachingAiClient};
pub use config::{AiConfig, ConfigError};
pub use fake::FakeClient;
pub use generator::{AiRecipeGenerator, RecipeGenerator};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role};
