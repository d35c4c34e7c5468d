//! Completion providers
//!
//! Defines the provider trait and the OpenAI-compatible HTTP implementation.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::GenerationError;
use crate::config::GenerationConfig;

/// Delay before retry `n` is `n` times this
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Text completion backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Send a single-turn prompt and return the reply text
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// OpenRouter (or any OpenAI-compatible) chat completions client
pub struct OpenRouterProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenRouterProvider {
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }

    async fn send(&self, api_key: &str, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::MalformedResponse("response has no message content".to_string()))
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        with_retries(self.max_retries, || self.send(api_key, prompt)).await
    }
}

/// Call `attempt` until it succeeds, fails with a non-retryable error, or
/// `max_retries` retries are spent. Retry `n` waits `n` backoff steps.
async fn with_retries<F, Fut>(
    max_retries: u32,
    mut attempt: F,
) -> Result<String, GenerationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, GenerationError>>,
{
    let mut retries = 0;
    loop {
        match attempt().await {
            Ok(text) => return Ok(text),
            Err(e) if e.is_retryable() && retries < max_retries => {
                retries += 1;
                tracing::warn!(
                    "Completion attempt {} of {} failed: {}",
                    retries,
                    max_retries + 1,
                    e
                );
                tokio::time::sleep(RETRY_BACKOFF * retries).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Provider returning a canned reply
#[cfg(test)]
pub struct StaticProvider {
    pub reply: Result<String, u16>,
}

#[cfg(test)]
impl StaticProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self { reply: Err(status) }
    }
}

#[cfg(test)]
#[async_trait]
impl CompletionProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(GenerationError::Status {
                status: *status,
                body: "upstream failure".to_string(),
            }),
        }
    }
}
