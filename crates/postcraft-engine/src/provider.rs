//! Text-generation collaborator: trait seam plus an OpenAI-compatible client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Anything that can turn a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Generate text for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on quota, auth, or network failure.
    async fn generate_text(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError>;
}

/// Chat-completions client for OpenAI and API-compatible gateways.
pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatibleClient {
    /// Creates a client pointed at the public OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (gateways, or wiremock in tests).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] for an empty API key and
    /// [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::Config("API key must be non-empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postcraft/0.1 (content-suggestions)")
            .build()?;

        Ok(Self {
            client,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn generate_text(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::Auth(body),
                429 => ProviderError::Quota(body),
                code => ProviderError::Status { status: code, body },
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        tracing::debug!(
            model = %self.model,
            chars = text.chars().count(),
            "text generation succeeded"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let result = OpenAiCompatibleClient::with_base_url(" ", "gpt-4o-mini", 5, "http://localhost");
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client =
            OpenAiCompatibleClient::with_base_url("k", "m", 5, "http://localhost:9999/v1/").unwrap();
        assert_eq!(client.url, "http://localhost:9999/v1/chat/completions");
        assert_eq!(client.model(), "m");
    }
}
