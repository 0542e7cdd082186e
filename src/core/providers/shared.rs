//! Shared utilities for HTTP-backed providers

use super::ProviderError;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

// ============================================================================
// HTTP Client
// ============================================================================

/// Build the HTTP client a provider uses for every call
pub fn build_http_client(
    provider: &'static str,
    timeout: Duration,
) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("batchllm-rs/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::configuration(provider, e.to_string()))
}

/// Map a transport-level failure
pub fn map_reqwest_error(provider: &'static str, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(provider, err.to_string())
    } else if err.is_decode() {
        ProviderError::response_parsing(provider, err.to_string())
    } else {
        ProviderError::network(provider, err.to_string())
    }
}

// ============================================================================
// Status Mapping
// ============================================================================

/// DeepL answers 456 when the character quota is used up
const STATUS_QUOTA_EXCEEDED: u16 = 456;

/// Turn non-success responses into provider errors
pub async fn check_status(
    provider: &'static str,
    response: Response,
) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    Err(map_status(provider, status, retry_after, body))
}

fn map_status(
    provider: &'static str,
    status: StatusCode,
    retry_after: Option<u64>,
    body: String,
) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::authentication(provider, body),
        429 => ProviderError::rate_limit(provider, retry_after),
        STATUS_QUOTA_EXCEEDED => ProviderError::quota_exceeded(provider, body),
        code => ProviderError::api_error(provider, code, body),
    }
}

/// Strip trailing slashes so paths can be appended with `/`
pub fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
