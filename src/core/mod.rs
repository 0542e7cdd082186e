//! Core functionality for batch runs
//!
//! This module contains the orchestration logic, the provider adapters and
//! the record transforms.

pub mod batch;
pub mod limiter;
pub mod providers;
pub mod traits;
pub mod transforms;
pub mod types;

use crate::config::{ProviderConfig, RunConfig};
use crate::utils::error::Result;
use batch::{BatchRunner, RecordTransform, RunSummary};
use std::sync::Arc;
use traits::{Responder, Translator};

/// Translate a JSONL dataset with the provider described by `provider`
pub async fn translate_jsonl<T>(
    provider: &ProviderConfig,
    run: RunConfig,
    transform: T,
) -> Result<RunSummary>
where
    T: RecordTransform<dyn Translator> + 'static,
{
    let translator = providers::build_translator(provider)?;
    BatchRunner::new(run)
        .run(translator, Arc::new(transform))
        .await
}

/// Fill model answers into a JSONL dataset with the provider described by `provider`
pub async fn eval_jsonl<T>(provider: &ProviderConfig, run: RunConfig, transform: T) -> Result<RunSummary>
where
    T: RecordTransform<dyn Responder> + 'static,
{
    let responder = providers::build_responder(provider)?;
    BatchRunner::new(run).run(responder, Arc::new(transform)).await
}
