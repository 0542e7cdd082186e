//! Batch orchestration over JSONL datasets
//!
//! [`BatchRunner`] drives a [`RecordTransform`] over every record of a
//! dataset with bounded concurrency, and reports progress through a
//! [`ProgressObserver`].

mod progress;
mod runner;
mod types;


pub use progress::{ConsoleProgress, ProgressObserver};
pub use runner::BatchRunner;
pub use types::{FnTransform, RecordTransform, RunStart, RunSummary, transform_fn};
