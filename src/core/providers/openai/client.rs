//! OpenAI chat completions client

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::core::providers::ProviderError;
use crate::core::providers::shared::{
    build_http_client, check_status, map_reqwest_error, trim_base_url,
};

pub(super) const PROVIDER: &str = "openai";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Minimal chat completions client shared by the chat translator and responder
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatClient {
    /// Create a client from validated provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::configuration(PROVIDER, "API key is not set"))?;
        let model = config
            .model_name()
            .ok_or_else(|| ProviderError::configuration(PROVIDER, "model is not set"))?
            .to_string();
        let base_url = config
            .base_url
            .as_deref()
            .map(trim_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            client: build_http_client(PROVIDER, config.timeout_duration())?,
            api_key,
            base_url,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `messages` and return the first choice's content
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_reqwest_error(PROVIDER, e))?;
        let response = check_status(PROVIDER, response).await?;

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::response_parsing(PROVIDER, e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::response_parsing(PROVIDER, "response contained no message content")
            })?;

        debug!(model = %self.model, chars = content.len(), "Chat completion received");
        Ok(content)
    }
}
