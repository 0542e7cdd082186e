//! Progress reporting
//!
//! Observers only watch a run; they never touch records. The runner does not
//! call them at all when the run is not verbose.

use super::types::{RunStart, RunSummary};
use crate::config::DEV_SAMPLE_SIZE;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use parking_lot::Mutex;
use tracing::{info, warn};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// Receives run parameters and completion events
pub trait ProgressObserver: Send + Sync {
    /// Called once, before the first task is dispatched
    fn on_start(&self, start: &RunStart);

    /// Called after each record finishes, successfully or not
    fn on_item(&self, completed: usize, total: usize);

    /// Called once when the run ends; `summary` is `None` if it was aborted
    fn on_finish(&self, summary: Option<&RunSummary>);
}

/// Logs run parameters and draws a progress bar on stderr
#[derive(Default)]
pub struct ConsoleProgress {
    bar: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log parameters but never draw the bar (for non-interactive output)
    pub fn without_bar() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: true,
        }
    }
}

fn dev_mode_notice() -> String {
    format!(
        "DEV MODE IS ON, only the first {} records are processed",
        DEV_SAMPLE_SIZE
    )
}

impl ProgressObserver for ConsoleProgress {
    fn on_start(&self, start: &RunStart) {
        info!("in_filepath: {}", start.in_filepath.display());
        info!("out_filepath: {}", start.out_filepath.display());
        info!("max_concurrency: {}", start.max_concurrency);
        if start.dev {
            warn!("{}", dev_mode_notice());
        }
        if start.incremental {
            info!(
                "incremental: {} records already done, {} to go",
                start.skipped, start.total
            );
        }

        let bar = ProgressBar::new(start.total as u64);
        if self.hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        *self.bar.lock() = Some(bar);
    }

    fn on_item(&self, completed: usize, _total: usize) {
        if let Some(bar) = self.bar.lock().as_ref() {
            bar.set_position(completed as u64);
        }
    }

    fn on_finish(&self, summary: Option<&RunSummary>) {
        if let Some(bar) = self.bar.lock().take() {
            match summary {
                Some(_) => bar.finish(),
                None => bar.abandon(),
            }
        }
        if let Some(summary) = summary {
            info!(
                "done: {} succeeded, {} failed, {} written in {:.1}s",
                summary.succeeded,
                summary.failed,
                summary.written,
                summary.elapsed.as_secs_f64()
            );
        }
    }
}
