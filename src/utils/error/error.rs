//! Error handling for batch runs
//!
//! This module defines all error types used throughout the pipeline.

use crate::core::providers::ProviderError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for batch runs
pub type Result<T> = std::result::Result<T, BatchError>;

/// Main error type for batch runs
#[derive(Error, Debug)]
pub enum BatchError {
    /// Input dataset missing, unreadable, or containing a malformed line
    #[error("Dataset error in {}: {message}", .path.display())]
    Dataset { path: PathBuf, message: String },

    /// A record lacks a field the transform or resume step needs
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The external translate/respond capability failed
    #[error("Adapter error: {0}")]
    Adapter(#[from] ProviderError),

    /// Output path could not be opened or written
    #[error("Output error in {}: {message}", .path.display())]
    Output { path: PathBuf, message: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A spawned record task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

impl BatchError {
    /// Create a dataset error for `path`
    pub fn dataset(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Dataset {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an output error for `path`
    pub fn output(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Output {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Whether the underlying provider error is worth retrying by the caller
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Adapter(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Seconds the provider asked to wait before the next attempt
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Adapter(e) => e.retry_after(),
            _ => None,
        }
    }
}
