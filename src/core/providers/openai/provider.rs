//! Chat-model translator and responder

use async_trait::async_trait;

use super::client::{ChatClient, PROVIDER};
use super::prompts::{PromptStyle, evaluation_messages, translation_messages};
use crate::config::{ProviderConfig, ProviderKind};
use crate::core::providers::ProviderError;
use crate::core::providers::deepl::TargetLang;
use crate::core::traits::{Responder, Translator};

const DEFAULT_TARGET_LANG: &str = "Korean";

/// Language name for prompts: known codes become names, anything else is used as given
fn language_name(lang: &str) -> String {
    lang.parse::<TargetLang>()
        .map(|l| l.name().to_string())
        .unwrap_or_else(|_| lang.trim().to_string())
}

/// Translator that prompts an OpenAI chat model
#[derive(Debug, Clone)]
pub struct ChatTranslator {
    client: ChatClient,
    style: PromptStyle,
    target_lang: String,
}

impl ChatTranslator {
    /// Create a translator; the prompt style follows the provider kind
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let style = match config.kind {
            ProviderKind::Gpt4 => PromptStyle::SystemInstruction,
            _ => PromptStyle::Paraphrase,
        };
        Self::with_style(config, style)
    }

    pub fn with_style(config: &ProviderConfig, style: PromptStyle) -> Result<Self, ProviderError> {
        let target_lang = config
            .target_lang
            .as_deref()
            .map(language_name)
            .unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string());

        Ok(Self {
            client: ChatClient::new(config)?,
            style,
            target_lang,
        })
    }

    pub fn style(&self) -> PromptStyle {
        self.style
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }
}

#[async_trait]
impl Translator for ChatTranslator {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn translate_text(
        &self,
        text: &str,
        target_lang: Option<&str>,
    ) -> Result<String, ProviderError> {
        let target = target_lang
            .map(language_name)
            .unwrap_or_else(|| self.target_lang.clone());
        let messages = translation_messages(self.style, text, &target);
        self.client.complete(&messages).await
    }
}

/// Responder that answers instructions with an OpenAI chat model
#[derive(Debug, Clone)]
pub struct ChatResponder {
    client: ChatClient,
}

impl ChatResponder {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: ChatClient::new(config)?,
        })
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }
}

#[async_trait]
impl Responder for ChatResponder {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn respond(&self, instruction: &str, input: &str) -> Result<String, ProviderError> {
        let messages = evaluation_messages(instruction, input);
        self.client.complete(&messages).await
    }
}
