//! Batch orchestrator
//!
//! Loads a dataset, optionally samples it (dev) and drops records the output
//! already holds (incremental), then runs one task per record under the
//! concurrency limiter.
//!
//! In full mode results are collected into index slots and written once, in
//! input order. In incremental mode each result is appended as soon as it
//! completes, so an interrupted run loses at most the records still in flight.

use super::progress::{ConsoleProgress, ProgressObserver};
use super::types::{RecordTransform, RunStart, RunSummary};
use crate::config::{DEV_SAMPLE_SIZE, RunConfig, Validate};
use crate::core::limiter::ConcurrencyLimiter;
use crate::core::types::{ID_FIELD, Record, RecordId, record_label};
use crate::storage::{self, AppendWriter};
use crate::utils::error::{BatchError, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Where finished records go
enum Sink {
    /// Full mode: one slot per dispatched record
    Collect(Vec<Option<Record>>),
    /// Incremental mode: appended as they complete
    Append(AppendWriter),
}

impl Sink {
    async fn accept(&mut self, index: usize, record: Record) -> Result<()> {
        match self {
            Sink::Collect(slots) => {
                slots[index] = Some(record);
                Ok(())
            }
            Sink::Append(writer) => writer.append(&record).await,
        }
    }
}

/// Runs a record transform over a dataset
pub struct BatchRunner {
    config: RunConfig,
    limiter: ConcurrencyLimiter,
    progress: Option<Arc<dyn ProgressObserver>>,
}

impl BatchRunner {
    /// Create a runner; verbose runs report to the console
    pub fn new(config: RunConfig) -> Self {
        let limiter = ConcurrencyLimiter::new(config.max_concurrency);
        let progress = config
            .verbose
            .then(|| Arc::new(ConsoleProgress::new()) as Arc<dyn ProgressObserver>);

        Self {
            config,
            limiter,
            progress,
        }
    }

    /// Replace the progress observer. Ignored when the run is not verbose.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        if self.config.verbose {
            self.progress = Some(progress);
        }
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn limiter(&self) -> &ConcurrencyLimiter {
        &self.limiter
    }

    /// Process the dataset with `transform`, calling `adapter` through the limiter.
    ///
    /// Fails before dispatch if the dataset cannot be loaded or, in incremental
    /// mode, if the output cannot be read or a record has no `id`. Once tasks
    /// run, the first failed record aborts the rest unless
    /// `continue_on_error` is set.
    pub async fn run<A, T>(&self, adapter: Arc<A>, transform: Arc<T>) -> Result<RunSummary>
    where
        A: ?Sized + Send + Sync + 'static,
        T: ?Sized + RecordTransform<A> + 'static,
    {
        let run_id = Uuid::new_v4();
        let span = info_span!("batch_run", %run_id);

        let result = self
            .execute(run_id, adapter, transform)
            .instrument(span)
            .await;

        if let Some(progress) = &self.progress {
            progress.on_finish(result.as_ref().ok());
        }
        result
    }

    async fn execute<A, T>(
        &self,
        run_id: Uuid,
        adapter: Arc<A>,
        transform: Arc<T>,
    ) -> Result<RunSummary>
    where
        A: ?Sized + Send + Sync + 'static,
        T: ?Sized + RecordTransform<A> + 'static,
    {
        let config = &self.config;
        config.validate().map_err(BatchError::Config)?;

        let started_at = Utc::now();
        let timer = Instant::now();

        let mut records = storage::read_all(&config.in_filepath).await?;
        let loaded = records.len();

        if config.dev && records.len() > DEV_SAMPLE_SIZE {
            debug!("Dev mode: keeping {} of {} records", DEV_SAMPLE_SIZE, loaded);
            records.truncate(DEV_SAMPLE_SIZE);
        }

        let mut skipped = 0;
        let mut sink = if config.incremental {
            let ids = record_ids(&records)?;
            let writer = AppendWriter::open(&config.out_filepath).await?;
            let done = storage::read_ids(&config.out_filepath).await?;
            let before = records.len();
            records = records
                .into_iter()
                .zip(ids)
                .filter(|(_, id)| !done.contains(id))
                .map(|(record, _)| record)
                .collect();
            skipped = before - records.len();
            Sink::Append(writer)
        } else {
            Sink::Collect(vec![None; records.len()])
        };

        let total = records.len();
        if let Some(progress) = &self.progress {
            progress.on_start(&RunStart {
                run_id,
                in_filepath: config.in_filepath.clone(),
                out_filepath: config.out_filepath.clone(),
                max_concurrency: self.limiter.max_concurrency(),
                total,
                skipped,
                dev: config.dev,
                incremental: config.incremental,
            });
        }
        info!(loaded, skipped, total, "Dispatching records");

        let mut tasks = JoinSet::new();
        for (index, record) in records.into_iter().enumerate() {
            let label = record_label(&record, index);
            let adapter = Arc::clone(&adapter);
            let transform = Arc::clone(&transform);
            let limiter = self.limiter.clone();

            tasks.spawn(
                async move {
                    let result = limiter.call(transform.transform(adapter, record)).await;
                    (index, label, result)
                }
                .in_current_span(),
            );
        }

        let mut completed = 0;
        let mut succeeded = 0;
        let mut failed = 0;

        while let Some(joined) = tasks.join_next().await {
            let (index, label, result) =
                joined.map_err(|e| BatchError::Task(format!("Record task failed: {}", e)))?;
            completed += 1;

            match result {
                Ok(record) => {
                    sink.accept(index, record).await?;
                    succeeded += 1;
                }
                Err(e) if config.continue_on_error => {
                    warn!("Record {} failed and is left out: {}", label, e);
                    failed += 1;
                }
                Err(e) => {
                    error!(
                        retryable = e.is_retryable(),
                        retry_after = ?e.retry_after(),
                        "Record {} failed, aborting run: {}",
                        label,
                        e
                    );
                    tasks.abort_all();
                    return Err(e);
                }
            }

            if let Some(progress) = &self.progress {
                progress.on_item(completed, total);
            }
        }

        let written = match sink {
            Sink::Append(writer) => {
                let written = writer.written();
                writer.close().await?;
                written
            }
            Sink::Collect(slots) => {
                let results: Vec<Record> = slots.into_iter().flatten().collect();
                storage::write_all(&config.out_filepath, &results).await?;
                results.len()
            }
        };

        info!(
            "Wrote {} records to {}",
            written,
            config.out_filepath.display()
        );

        Ok(RunSummary {
            run_id,
            started_at,
            loaded,
            skipped,
            dispatched: total,
            succeeded,
            failed,
            written,
            elapsed: timer.elapsed(),
        })
    }
}

/// The `id` of every record, in input order
fn record_ids(records: &[Record]) -> Result<Vec<RecordId>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            RecordId::of(record).ok_or_else(|| {
                BatchError::InvalidRecord(format!(
                    "record #{} has no \"{}\" field, which incremental runs require",
                    index, ID_FIELD
                ))
            })
        })
        .collect()
}
