//! Configuration data models
//!
//! This module defines the configuration structures for runs and providers.

#![allow(missing_docs)]

pub mod provider;
pub mod run;

// Re-export all configuration types
pub use provider::*;
pub use run::*;

/// Records processed in dev mode
pub const DEV_SAMPLE_SIZE: usize = 5;

/// Default maximum number of in-flight adapter calls
pub fn default_max_concurrency() -> usize {
    10
}

/// Default provider request timeout in seconds
pub fn default_timeout() -> u64 {
    600
}

pub fn default_true() -> bool {
    true
}
