//! Provider configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which external service backs the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// DeepL translation API
    #[value(name = "deepl")]
    DeepL,
    /// OpenAI gpt-3.5-turbo
    #[value(name = "chatgpt")]
    ChatGpt,
    /// OpenAI gpt-4
    #[value(name = "gpt4")]
    Gpt4,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeepL => "deepl",
            Self::ChatGpt => "chatgpt",
            Self::Gpt4 => "gpt4",
        }
    }

    /// Environment variable holding the API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::DeepL => "DEEPL_API_KEY",
            Self::ChatGpt | Self::Gpt4 => "OPENAI_API_KEY",
        }
    }

    /// Model used when none is configured
    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            Self::DeepL => None,
            Self::ChatGpt => Some("gpt-3.5-turbo"),
            Self::Gpt4 => Some("gpt-4"),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deepl" => Ok(Self::DeepL),
            "chatgpt" | "gpt-3.5-turbo" => Ok(Self::ChatGpt),
            "gpt4" | "gpt-4" => Ok(Self::Gpt4),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

/// Provider configuration
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    /// Provider variant
    pub kind: ProviderKind,
    /// API key; read from the provider's environment variable when unset
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model name override (chat providers only)
    #[serde(default)]
    pub model: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Target language, as a DeepL code (`KO`) or a language name (`Korean`)
    #[serde(default)]
    pub target_lang: Option<String>,
}

impl ProviderConfig {
    /// Create a config for `kind` with default settings
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            api_key: None,
            base_url: None,
            model: None,
            timeout: default_timeout(),
            target_lang: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_target_lang(mut self, target_lang: impl Into<String>) -> Self {
        self.target_lang = Some(target_lang.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = timeout_secs;
        self
    }

    /// Fill a missing API key from the provider's environment variable
    pub fn with_env_fallback(mut self) -> Self {
        if self.api_key.as_deref().is_none_or(str::is_empty) {
            if let Ok(key) = std::env::var(self.kind.api_key_env()) {
                self.api_key = Some(key);
            }
        }
        self
    }

    /// Model to request, falling back to the provider default
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().or(self.kind.default_model())
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("target_lang", &self.target_lang)
            .finish()
    }
}
