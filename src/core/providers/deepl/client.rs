//! DeepL translator

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TargetLang;
use crate::config::ProviderConfig;
use crate::core::providers::ProviderError;
use crate::core::providers::shared::{
    build_http_client, check_status, map_reqwest_error, trim_base_url,
};
use crate::core::traits::Translator;

const PROVIDER: &str = "deepl";
const FREE_API_BASE: &str = "https://api-free.deepl.com";
const PRO_API_BASE: &str = "https://api.deepl.com";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    target_lang: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(default)]
    detected_source_language: Option<String>,
    text: String,
}

/// Translator backed by the DeepL REST API
#[derive(Debug, Clone)]
pub struct DeepLTranslator {
    client: Client,
    api_key: String,
    base_url: String,
    target_lang: TargetLang,
}

impl DeepLTranslator {
    /// Create a translator from validated provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::configuration(PROVIDER, "API key is not set"))?;

        let target_lang = match &config.target_lang {
            Some(lang) => lang
                .parse::<TargetLang>()
                .map_err(|e| ProviderError::configuration(PROVIDER, e))?,
            None => TargetLang::default(),
        };

        let base_url = match &config.base_url {
            Some(url) => trim_base_url(url),
            None => Self::default_base_url(&api_key).to_string(),
        };

        Ok(Self {
            client: build_http_client(PROVIDER, config.timeout_duration())?,
            api_key,
            base_url,
            target_lang,
        })
    }

    /// Free-plan keys end in `:fx` and are served from a separate host
    pub fn default_base_url(api_key: &str) -> &'static str {
        if api_key.ends_with(":fx") {
            FREE_API_BASE
        } else {
            PRO_API_BASE
        }
    }

    pub fn target_lang(&self) -> TargetLang {
        self.target_lang
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn translate_text(
        &self,
        text: &str,
        target_lang: Option<&str>,
    ) -> Result<String, ProviderError> {
        let target = match target_lang {
            Some(lang) => lang
                .parse::<TargetLang>()
                .map_err(|e| ProviderError::configuration(PROVIDER, e))?,
            None => self.target_lang,
        };

        let url = format!("{}/v2/translate", self.base_url);
        let body = TranslateRequest {
            text: [text],
            target_lang: target.code(),
        };

        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("DeepL-Auth-Key {}", self.api_key),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| map_reqwest_error(PROVIDER, e))?;
        let response = check_status(PROVIDER, response).await?;

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::response_parsing(PROVIDER, e.to_string()))?;

        let translation = parsed.translations.into_iter().next().ok_or_else(|| {
            ProviderError::response_parsing(PROVIDER, "response contained no translations")
        })?;

        debug!(
            source = translation.detected_source_language.as_deref().unwrap_or("?"),
            target = target.code(),
            "DeepL translation complete"
        );
        Ok(translation.text)
    }
}
