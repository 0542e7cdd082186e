//! Common test utilities for batchllm-rs
//!
//! - Fake adapters that count calls and in-flight concurrency
//! - Dataset fixtures in temporary directories
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fakes::FakeTranslator, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let dataset = fixtures::Dataset::new(&fixtures::dolly_records(3));
//!     let translator = FakeTranslator::new();
//!     // ...
//! }
//! ```


pub use fakes::{FakeResponder, FakeTranslator, RecordingProgress};
pub use fixtures::Dataset;

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Skip test if the API key for a provider kind is not available
#[macro_export]
macro_rules! skip_without_api_key {
    ($kind:expr) => {
        let key_var = $kind.api_key_env();
        if std::env::var(key_var).is_err() {
            eprintln!("Skipping test: {} not set for {} provider", key_var, $kind);
            return;
        }
    };
}
