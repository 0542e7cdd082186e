//! # batchllm-rs
//!
//! Batch translation and evaluation of JSONL instruction datasets through
//! DeepL and OpenAI chat models.
//!
//! ## Features
//!
//! - **Bounded concurrency**: at most `max_concurrency` provider calls in flight
//! - **Order preserving**: full runs write results in input order
//! - **Incremental resume**: records whose `id` is already in the output are skipped
//! - **Dev mode**: process only the first few records
//! - **Pluggable transforms**: field mappings for common dataset shapes, or closures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use batchllm_rs::{ProviderConfig, ProviderKind, RunConfig};
//! use batchllm_rs::core::transforms::InstancesTranslation;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = ProviderConfig::new(ProviderKind::DeepL).with_env_fallback();
//!     let run = RunConfig::new("user_oriented_instructions.jsonl", "user_oriented_instructions_ko.jsonl")
//!         .with_max_concurrency(10)
//!         .with_dev(true);
//!
//!     let summary = batchllm_rs::translate_jsonl(&provider, run, InstancesTranslation::new()).await?;
//!     println!("{} records written", summary.written);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{Config, ProviderConfig, ProviderKind, RunConfig};
pub use utils::error::{BatchError, Result};

pub use core::batch::{BatchRunner, ProgressObserver, RecordTransform, RunSummary, transform_fn};
pub use core::limiter::ConcurrencyLimiter;
pub use core::providers::{ProviderError, build_responder, build_translator};
pub use core::traits::{Responder, Translator};
pub use core::types::{Record, RecordId};
pub use core::{eval_jsonl, translate_jsonl};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
