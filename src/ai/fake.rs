//! Fake AI client for testing.
//!
//! Returns deterministic responses based on prompt substring matching, so
//! tests run without network access or API costs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::client::AiClient;
use super::types::{ChatRequest, ChatResponse};
use crate::error::GenerateError;

/// A fake AI client for testing.
///
/// Responses are matched by checking if the rendered prompt contains a
/// registered substring. If no match is found, the default response is
/// returned, or an error if none is configured.
#[derive(Debug, Default)]
pub struct FakeClient {
    /// Map of prompt substring -> response body.
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match is found.
    default_response: Option<String>,
    /// Data URL returned for image requests; `None` makes image calls fail.
    image_response: Option<String>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeClient that returns `response` for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let client = Self::new();
        client.add_response(prompt_contains, response);
        client
    }

    /// Register a response for prompts containing a specific substring.
    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the fallback response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Set the data URL returned by image generation requests.
    pub fn with_image_response(mut self, data_url: &str) -> Self {
        self.image_response = Some(data_url.to_string());
        self
    }
}

#[async_trait]
impl AiClient for FakeClient {
    async fn complete(
        &self,
        _prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, GenerateError> {
        let prompt: String = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let prompt_lower = prompt.to_lowercase();

        let responses = self.responses.read().unwrap();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(ChatResponse {
                    content: response.clone(),
                    cached: false,
                });
            }
        }

        match &self.default_response {
            Some(response) => Ok(ChatResponse {
                content: response.clone(),
                cached: false,
            }),
            None => Err(GenerateError::Api(format!(
                "FakeClient: no response configured for prompt (first 100 chars): {}",
                &prompt[..prompt.len().min(100)]
            ))),
        }
    }

    async fn generate_image(&self, _prompt: &str) -> Result<String, GenerateError> {
        match &self.image_response {
            Some(url) => Ok(url.clone()),
            None => Err(GenerateError::Api(
                "FakeClient: no image response configured".to_string(),
            )),
        }
    }
}
