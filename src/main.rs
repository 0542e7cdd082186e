//! batchllm - batch translation and evaluation of JSONL datasets
//!
//! Reads provider settings from a YAML file or the environment, then runs
//! one dataset through a translator or responder.

#![allow(missing_docs)]

use anyhow::{Context, bail};
use batchllm_rs::config::{Config, ProviderKind, RunConfig};
use batchllm_rs::core::transforms::{FieldsTranslation, InstancesTranslation, ResponseFill};
use batchllm_rs::{RunSummary, Translator, build_translator, eval_jsonl, translate_jsonl};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "batchllm", version, about = "Translate and evaluate JSONL datasets with LLM providers")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "BATCHLLM_CONFIG")]
    config: Option<PathBuf>,

    /// Provider to use, overriding the configuration
    #[arg(long, global = true)]
    provider: Option<ProviderKind>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate the text fields of every record
    Translate {
        #[command(flatten)]
        run: RunArgs,

        /// Dataset shape
        #[arg(long, value_enum, default_value_t = TranslatePreset::Instances)]
        preset: TranslatePreset,

        /// Fields to translate with `--preset fields`
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Target language, as a DeepL code or a language name
        #[arg(long)]
        target_lang: Option<String>,
    },
    /// Ask the model to answer every record's instruction
    Eval {
        #[command(flatten)]
        run: RunArgs,

        /// Dataset shape
        #[arg(long, value_enum, default_value_t = EvalPreset::Answer)]
        preset: EvalPreset,
    },
    /// Translate a single text and print it
    Text {
        text: String,

        #[arg(long)]
        target_lang: Option<String>,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Input dataset (JSONL)
    #[arg(long = "in", value_name = "PATH")]
    in_filepath: PathBuf,

    /// Output file (JSONL)
    #[arg(long = "out", value_name = "PATH")]
    out_filepath: PathBuf,

    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Hide parameters and the progress bar
    #[arg(long)]
    quiet: bool,

    /// Only process the first 5 records
    #[arg(long)]
    dev: bool,

    /// Append to the output and skip records it already holds
    #[arg(long, value_name = "BOOL")]
    incremental: Option<bool>,

    /// Leave failed records out instead of aborting
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TranslatePreset {
    /// `instruction` and `instances[].input`
    Instances,
    /// `instruction` and `context`
    Dolly,
    /// The fields given with `--fields`
    Fields,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EvalPreset {
    /// `instruction` + `input` into `answer`
    Answer,
    /// `instruction` + `context` into `response`
    Dolly,
}

impl RunArgs {
    /// Command defaults, then configured defaults, then explicit flags
    fn into_run_config(self, config: &Config, incremental_default: bool) -> RunConfig {
        let mut run = config.run.apply(
            RunConfig::new(self.in_filepath, self.out_filepath)
                .with_incremental(incremental_default),
        );

        if let Some(max_concurrency) = self.max_concurrency {
            run = run.with_max_concurrency(max_concurrency);
        }
        if let Some(incremental) = self.incremental {
            run.incremental = incremental;
        }
        if self.quiet {
            run.verbose = false;
        }
        if self.dev {
            run.dev = true;
        }
        if self.continue_on_error {
            run.continue_on_error = true;
        }
        run
    }
}

async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env()?,
    };
    if let Some(kind) = cli.provider {
        config = config.with_provider_kind(kind);
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli).await?;
    debug!("Provider: {:?}", config.provider);

    let summary: RunSummary = match cli.command {
        Command::Translate {
            run,
            preset,
            fields,
            target_lang,
        } => {
            if let Some(lang) = target_lang {
                config.provider.target_lang = Some(lang);
            }
            let run = run.into_run_config(&config, false);
            match preset {
                TranslatePreset::Instances => {
                    translate_jsonl(&config.provider, run, InstancesTranslation::new()).await?
                }
                TranslatePreset::Dolly => {
                    translate_jsonl(&config.provider, run, FieldsTranslation::dolly()).await?
                }
                TranslatePreset::Fields => {
                    if fields.is_empty() {
                        bail!("--preset fields needs at least one field in --fields");
                    }
                    translate_jsonl(&config.provider, run, FieldsTranslation::new(fields)).await?
                }
            }
        }
        Command::Eval { run, preset } => {
            let run = run.into_run_config(&config, true);
            let transform = match preset {
                EvalPreset::Answer => ResponseFill::answer(),
                EvalPreset::Dolly => ResponseFill::dolly(),
            };
            eval_jsonl(&config.provider, run, transform).await?
        }
        Command::Text { text, target_lang } => {
            let translator = build_translator(&config.provider)?;
            let translated = translator.translate(&text, target_lang.as_deref()).await?;
            println!("{}", translated);
            return Ok(());
        }
    };

    info!(
        run_id = %summary.run_id,
        loaded = summary.loaded,
        skipped = summary.skipped,
        failed = summary.failed,
        "Run finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
