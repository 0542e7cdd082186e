//! Configuration management
//!
//! This module handles loading and validation of provider and run settings.
//! Settings come from a YAML file or from environment variables; API keys
//! missing from the file are read from the provider's usual variable.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{BatchError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable selecting the provider
pub const ENV_PROVIDER: &str = "BATCHLLM_PROVIDER";
/// Environment variable overriding the provider base URL
pub const ENV_BASE_URL: &str = "BATCHLLM_BASE_URL";
/// Environment variable overriding the model
pub const ENV_MODEL: &str = "BATCHLLM_MODEL";
/// Environment variable setting the target language
pub const ENV_TARGET_LANG: &str = "BATCHLLM_TARGET_LANG";
/// Environment variable setting the default concurrency
pub const ENV_MAX_CONCURRENCY: &str = "BATCHLLM_MAX_CONCURRENCY";

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Adapter backend
    pub provider: ProviderConfig,
    /// Defaults for every run
    #[serde(default)]
    pub run: RunDefaults,
}

impl Config {
    /// Create a configuration for `kind` with no run defaults
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            provider: ProviderConfig::new(kind),
            run: RunDefaults::default(),
        }
    }

    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BatchError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(content)
            .map_err(|e| BatchError::Config(format!("Failed to parse config: {}", e)))?;
        config.provider = config.provider.with_env_fallback();
        config.run.validate().map_err(BatchError::Config)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let kind = match env::var(ENV_PROVIDER) {
            Ok(value) => value.parse::<ProviderKind>().map_err(BatchError::Config)?,
            Err(_) => ProviderKind::DeepL,
        };

        let mut provider = ProviderConfig::new(kind).with_env_fallback();
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            provider.base_url = Some(base_url);
        }
        if let Ok(model) = env::var(ENV_MODEL) {
            provider.model = Some(model);
        }
        if let Ok(lang) = env::var(ENV_TARGET_LANG) {
            provider.target_lang = Some(lang);
        }

        let mut run = RunDefaults::default();
        if let Ok(value) = env::var(ENV_MAX_CONCURRENCY) {
            run.max_concurrency = Some(value.parse().map_err(|e| {
                BatchError::Config(format!("Invalid {}: {}", ENV_MAX_CONCURRENCY, e))
            })?);
        }
        run.validate().map_err(BatchError::Config)?;

        Ok(Self { provider, run })
    }

    /// Switch to another provider, keeping only settings that still apply
    pub fn with_provider_kind(mut self, kind: ProviderKind) -> Self {
        if self.provider.kind != kind {
            let previous = self.provider;
            self.provider = ProviderConfig {
                kind,
                api_key: None,
                base_url: None,
                model: None,
                timeout: previous.timeout,
                target_lang: previous.target_lang,
            }
            .with_env_fallback();
        }
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.provider
            .validate()
            .map_err(|e| BatchError::Config(format!("Provider config error: {}", e)))?;
        self.run
            .validate()
            .map_err(|e| BatchError::Config(format!("Run config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}
