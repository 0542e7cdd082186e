//! Adapter capability traits
//!
//! A [`Translator`] turns text into text in a target language; a
//! [`Responder`] answers an instruction. Each provider variant implements
//! one or both, and record transforms only ever see these traits.

use crate::core::providers::ProviderError;
use async_trait::async_trait;

/// Text translation capability
#[async_trait]
pub trait Translator: Send + Sync {
    /// Provider name, used in logs and errors
    fn name(&self) -> &'static str;

    /// Translate non-blank `text`.
    ///
    /// `target_lang` overrides the provider's configured target language.
    /// Callers should go through [`translate`](Self::translate) instead.
    async fn translate_text(
        &self,
        text: &str,
        target_lang: Option<&str>,
    ) -> Result<String, ProviderError>;

    /// Translate `text`, returning empty or whitespace-only input unchanged
    /// without calling the provider.
    async fn translate(
        &self,
        text: &str,
        target_lang: Option<&str>,
    ) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        self.translate_text(text, target_lang).await
    }
}

/// Instruction answering capability
#[async_trait]
pub trait Responder: Send + Sync {
    /// Provider name, used in logs and errors
    fn name(&self) -> &'static str;

    /// Answer `instruction`, with `input` as optional context.
    ///
    /// A blank `input` means the instruction stands alone.
    async fn respond(&self, instruction: &str, input: &str) -> Result<String, ProviderError>;
}
