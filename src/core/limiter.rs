//! Concurrency limiting for adapter calls
//!
//! A counting permit pool in front of the external translate/respond calls.
//! Waiters are served in FIFO order, so a queued task always gets a permit
//! once capacity frees up.

use crate::utils::error::{BatchError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;

/// Bounds the number of in-flight adapter invocations
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    max_concurrency: usize,
}

impl ConcurrencyLimiter {
    /// Create a limiter with `max_concurrency` permits (at least one)
    pub fn new(max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    /// Wait for a permit. It is released when the returned guard drops.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|e| BatchError::Task(format!("Concurrency limiter closed: {}", e)))
    }

    /// Run `f` while holding a permit.
    ///
    /// The permit is released when `f` finishes, whether it succeeded or not.
    pub async fn call<F, R>(&self, f: F) -> Result<R>
    where
        F: Future<Output = Result<R>>,
    {
        let _permit = self.acquire().await?;
        trace!("Acquired permit ({} left)", self.available_permits());

        f.await
    }

    /// Permits not currently held
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Number of permits currently held
    pub fn in_flight(&self) -> usize {
        self.max_concurrency - self.available_permits()
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}
