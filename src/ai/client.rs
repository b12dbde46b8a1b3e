//! AI client implementation using OpenRouter (OpenAI-compatible API).

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::cache::{AiCache, CacheKey};
use super::config::AiConfig;
use super::types::{ChatMessage, ChatRequest, ChatResponse, Role};
use crate::error::GenerateError;

/// Trait for AI backends.
///
/// The `prompt_name` identifies the prompt family for cache organization;
/// cache invalidation happens automatically via the content hash of the
/// messages.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request.
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, GenerateError>;

    /// Generate a single image for a prompt, returned as a data URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// AI client with caching and rate limiting, using OpenRouter.
pub struct CachingAiClient {
    client: Client<OpenAIConfig>,
    cache: AiCache,
    config: AiConfig,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl CachingAiClient {
    /// Create a new client from environment configuration.
    pub fn from_env() -> Result<Self, GenerateError> {
        let config = AiConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Create a new client with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        let client = Client::with_config(openai_config);
        let cache = AiCache::new(config.cache_dir.clone());

        Self {
            client,
            cache,
            config,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Apply rate limiting between requests.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            let min_interval = Duration::from_millis(self.config.rate_limit_ms);

            if elapsed < min_interval {
                tokio::time::sleep(min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Convert our ChatMessage to async-openai's format.
    fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, GenerateError> {
        match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| GenerateError::Api(format!("Failed to build system message: {}", e))),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| GenerateError::Api(format!("Failed to build user message: {}", e))),
        }
    }
}

#[async_trait]
impl AiClient for CachingAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, GenerateError> {
        let cache_key = CacheKey::new(prompt_name, &self.config.model, &request.messages);

        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!(prompt_name = prompt_name, "AI response found in cache");
            return Ok(cached.into());
        }

        if self.config.offline {
            return Err(GenerateError::OfflineNotCached);
        }

        self.rate_limit().await;

        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder.model(&self.config.model).messages(messages);

        if let Some(max_tokens) = request.max_tokens {
            req_builder.max_completion_tokens(max_tokens);
        }

        if let Some(temperature) = request.temperature {
            req_builder.temperature(temperature);
        }

        if request.json_response {
            req_builder.response_format(ResponseFormat::JsonObject);
        }

        let openai_request = req_builder
            .build()
            .map_err(|e| GenerateError::Api(e.to_string()))?;

        tracing::debug!(
            prompt_name = prompt_name,
            model = &self.config.model,
            "Calling AI API"
        );

        let response = self
            .client
            .chat()
            .create(openai_request)
            .await
            .map_err(|e| GenerateError::Api(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let chat_response = ChatResponse {
            content,
            cached: false,
        };

        if let Err(e) = self
            .cache
            .put(&cache_key, &chat_response, &self.config.model)
        {
            tracing::warn!("Failed to cache AI response: {}", e);
        }

        Ok(chat_response)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, GenerateError> {
        // Image output is nondeterministic and large; never cached.
        self.rate_limit().await;

        let request = CreateImageRequestArgs::default()
            .model(ImageModel::Other(self.config.image_model.clone()))
            .prompt(prompt)
            .n(1)
            .response_format(ImageResponseFormat::B64Json)
            .build()
            .map_err(|e| GenerateError::Api(e.to_string()))?;

        tracing::debug!(model = &self.config.image_model, "Calling image API");

        let response = self
            .client
            .images()
            .create(request)
            .await
            .map_err(|e| GenerateError::Api(e.to_string()))?;

        match response.data.first().map(AsRef::as_ref) {
            Some(Image::B64Json { b64_json, .. }) => {
                Ok(format!("data:image/jpeg;base64,{}", b64_json))
            }
            Some(Image::Url { url, .. }) => Ok(url.to_string()),
            None => Err(GenerateError::Api(
                "Image API returned no images".to_string(),
            )),
        }
    }
}
