//! Run configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Immutable description of one batch run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Dataset to read
    pub in_filepath: PathBuf,
    /// File to write results to
    pub out_filepath: PathBuf,
    /// Maximum concurrent adapter calls
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Report parameters and progress
    #[serde(default = "default_true")]
    pub verbose: bool,
    /// Only process the first [`DEV_SAMPLE_SIZE`] records
    #[serde(default)]
    pub dev: bool,
    /// Append to an existing output and skip records whose id it already holds
    #[serde(default, alias = "increment")]
    pub incremental: bool,
    /// Leave failed records out of the output instead of aborting the run
    #[serde(default)]
    pub continue_on_error: bool,
}

impl RunConfig {
    /// Create a config with default options
    pub fn new(in_filepath: impl Into<PathBuf>, out_filepath: impl Into<PathBuf>) -> Self {
        Self {
            in_filepath: in_filepath.into(),
            out_filepath: out_filepath.into(),
            max_concurrency: default_max_concurrency(),
            verbose: true,
            dev: false,
            incremental: false,
            continue_on_error: false,
        }
    }

    /// Set concurrency limit
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    /// Set whether to continue on individual errors
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }
}

/// Run options shared by every invocation, as read from a config file.
///
/// Unset fields fall back to the command line or the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunDefaults {
    #[serde(default)]
    pub max_concurrency: Option<usize>,
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub dev: Option<bool>,
    #[serde(default, alias = "increment")]
    pub incremental: Option<bool>,
    #[serde(default)]
    pub continue_on_error: Option<bool>,
}

impl RunDefaults {
    /// Fill the options of `config` that these defaults set
    pub fn apply(&self, mut config: RunConfig) -> RunConfig {
        if let Some(max_concurrency) = self.max_concurrency {
            config = config.with_max_concurrency(max_concurrency);
        }
        if let Some(verbose) = self.verbose {
            config.verbose = verbose;
        }
        if let Some(dev) = self.dev {
            config.dev = dev;
        }
        if let Some(incremental) = self.incremental {
            config.incremental = incremental;
        }
        if let Some(continue_on_error) = self.continue_on_error {
            config.continue_on_error = continue_on_error;
        }
        config
    }
}
