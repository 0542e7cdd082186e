//! Batch run types

use crate::core::types::Record;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Per-record business logic: which fields go through the adapter and where
/// the results are written back.
///
/// A transform may catch adapter failures and encode them into the record;
/// any error it returns fails that record.
#[async_trait]
pub trait RecordTransform<A: ?Sized + Send + Sync>: Send + Sync {
    async fn transform(&self, adapter: Arc<A>, record: Record) -> Result<Record>;
}

/// Adapts a closure into a [`RecordTransform`]
pub struct FnTransform<A: ?Sized, F> {
    f: F,
    _adapter: PhantomData<fn(Arc<A>)>,
}

/// Wrap a closure returning a boxed future as a transform.
///
/// ```rust,ignore
/// let transform = transform_fn(|translator: Arc<dyn Translator>, mut record: Record| {
///     async move {
///         let text = record["title"].as_str().unwrap_or_default().to_string();
///         record.insert("title".into(), translator.translate(&text, None).await?.into());
///         Ok(record)
///     }
///     .boxed()
/// });
/// ```
pub fn transform_fn<A, F>(f: F) -> FnTransform<A, F>
where
    A: ?Sized + Send + Sync,
    F: Fn(Arc<A>, Record) -> BoxFuture<'static, Result<Record>> + Send + Sync,
{
    FnTransform {
        f,
        _adapter: PhantomData,
    }
}

#[async_trait]
impl<A, F> RecordTransform<A> for FnTransform<A, F>
where
    A: ?Sized + Send + Sync + 'static,
    F: Fn(Arc<A>, Record) -> BoxFuture<'static, Result<Record>> + Send + Sync,
{
    async fn transform(&self, adapter: Arc<A>, record: Record) -> Result<Record> {
        (self.f)(adapter, record).await
    }
}

/// Parameters reported when a run starts dispatching
#[derive(Debug, Clone, Serialize)]
pub struct RunStart {
    pub run_id: Uuid,
    pub in_filepath: PathBuf,
    pub out_filepath: PathBuf,
    pub max_concurrency: usize,
    /// Records about to be dispatched
    pub total: usize,
    /// Records skipped because the output already holds them
    pub skipped: usize,
    pub dev: bool,
    pub incremental: bool,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Records read from the dataset
    pub loaded: usize,
    /// Records already present in the output
    pub skipped: usize,
    /// Tasks scheduled
    pub dispatched: usize,
    pub succeeded: usize,
    /// Records left out of the output (only with `continue_on_error`)
    pub failed: usize,
    /// Lines written to the output by this run
    pub written: usize,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

impl RunSummary {
    /// Whether every dispatched record made it into the output
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.succeeded == self.dispatched
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u128(d.as_millis())
    }
}
