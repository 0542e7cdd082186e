//! Provider variants
//!
//! Each external service implements [`Translator`] and/or [`Responder`].
//! The variant is picked from [`ProviderConfig::kind`]; settings are
//! validated before any client is built.

pub mod deepl;
pub mod error;
pub mod openai;
pub mod shared;

pub use deepl::{DeepLTranslator, TargetLang};
pub use error::ProviderError;
pub use openai::{ChatResponder, ChatTranslator};

use crate::config::{ProviderConfig, ProviderKind, Validate};
use crate::core::traits::{Responder, Translator};
use std::sync::Arc;
use tracing::info;

fn validated(config: &ProviderConfig) -> Result<(), ProviderError> {
    config
        .validate()
        .map_err(|e| ProviderError::configuration(config.kind.as_str(), e))
}

/// Build the translator selected by `config`
pub fn build_translator(config: &ProviderConfig) -> Result<Arc<dyn Translator>, ProviderError> {
    validated(config)?;
    let translator: Arc<dyn Translator> = match config.kind {
        ProviderKind::DeepL => Arc::new(DeepLTranslator::new(config)?),
        ProviderKind::ChatGpt | ProviderKind::Gpt4 => Arc::new(ChatTranslator::new(config)?),
    };
    info!(
        "Using {} translator{}",
        config.kind,
        config
            .model_name()
            .map(|m| format!(" ({})", m))
            .unwrap_or_default()
    );
    Ok(translator)
}

/// Build the responder selected by `config`.
///
/// DeepL only translates, so it cannot back an evaluation run.
pub fn build_responder(config: &ProviderConfig) -> Result<Arc<dyn Responder>, ProviderError> {
    validated(config)?;
    let responder: Arc<dyn Responder> = match config.kind {
        ProviderKind::DeepL => {
            return Err(ProviderError::not_supported(
                "deepl",
                "instruction answering",
            ));
        }
        ProviderKind::ChatGpt | ProviderKind::Gpt4 => Arc::new(ChatResponder::new(config)?),
    };
    info!(
        "Using {} responder ({})",
        config.kind,
        config.model_name().unwrap_or("default model")
    );
    Ok(responder)
}
