//! Configuration validation
//!
//! Runs before any provider is built or any file is touched.

use super::models::*;
use crate::core::providers::deepl::TargetLang;
use tracing::debug;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating run configuration");

        if self.in_filepath.as_os_str().is_empty() {
            return Err("in_filepath cannot be empty".to_string());
        }
        if self.out_filepath.as_os_str().is_empty() {
            return Err("out_filepath cannot be empty".to_string());
        }
        if self.in_filepath == self.out_filepath {
            return Err(format!(
                "in_filepath and out_filepath must differ: {}",
                self.in_filepath.display()
            ));
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Validate for RunDefaults {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == Some(0) {
            return Err("max_concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating {} provider configuration", self.kind);

        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(format!(
                    "{} API key is not set (configure api_key or {})",
                    self.kind,
                    self.kind.api_key_env()
                ));
            }
        }

        if self.timeout == 0 {
            return Err("Provider timeout must be greater than 0".to_string());
        }

        if let Some(base_url) = &self.base_url {
            let url = Url::parse(base_url)
                .map_err(|e| format!("Invalid base_url '{}': {}", base_url, e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!(
                    "base_url must use http:// or https:// scheme, got: {}",
                    url.scheme()
                ));
            }
        }

        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err("model cannot be empty".to_string());
            }
        }

        if self.kind == ProviderKind::DeepL {
            if let Some(lang) = &self.target_lang {
                lang.parse::<TargetLang>()?;
            }
        }

        Ok(())
    }
}
