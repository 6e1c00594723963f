//! Command line interface
//!
//! Every command loads the layered configuration, installs logging and
//! builds an [`AppContext`] before doing its work. Results are written to
//! stdout as JSON (TOML for `config`); logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use ats_domain::{CandidateProfile, SearchRequest};
use ats_infrastructure::config::loader::to_toml;
use ats_infrastructure::logging::init_logging;
use ats_infrastructure::{AppConfig, AppContext, ConfigLoader, init_app};

/// Command line interface for ATS Candidate Search
#[derive(Parser, Debug)]
#[command(name = "ats")]
#[command(about = "ATS Candidate Search - Hybrid semantic and keyword candidate ranking")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rank candidates for a free-text query
    Search {
        /// Query text
        #[arg(short, long)]
        query: String,
        /// Tenant whose scoring settings apply
        #[arg(short, long, default_value = "default")]
        tenant: String,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Results per page
        #[arg(long, default_value_t = 20)]
        page_size: usize,
        /// JSON file of candidate records to load and embed first
        ///
        /// Only supported with the in-memory vector store.
        #[arg(long)]
        candidates: Option<PathBuf>,
    },
    /// Print the embedding the configured provider produces for a text
    Embed {
        /// Text to embed
        #[arg(short, long)]
        text: String,
    },
    /// Run the embedding worker pool until Ctrl-C
    Worker {
        /// JSON file of candidate records to load and enqueue at startup
        #[arg(long)]
        candidates: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Load configuration, install logging and run the selected command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialize logging")?;

    let output = execute(&cli.command, config).await?;
    println!("{output}");
    Ok(())
}

/// Run one command against an already loaded configuration
///
/// Returns the text to print.
pub async fn execute(command: &Command, config: AppConfig) -> anyhow::Result<String> {
    match command {
        Command::Config => Ok(to_toml(&config)?),
        Command::Search {
            query,
            tenant,
            page,
            page_size,
            candidates,
        } => {
            let context = build_context(config).await?;
            if let Some(path) = candidates {
                seed_from_file(&context, path).await?;
                let stats = context.drain_jobs().await?;
                info!(
                    succeeded = stats.succeeded,
                    skipped = stats.skipped,
                    dropped = stats.dropped,
                    "Candidate vectors generated"
                );
            }

            let request = SearchRequest::new(query.as_str(), tenant.as_str())
                .with_page(*page, *page_size);
            let cancel = CancellationToken::new();
            let watcher = cancel_on_ctrl_c(cancel.clone());
            let result = context.search(&request, &cancel).await;
            watcher.abort();

            Ok(serde_json::to_string_pretty(&result?)?)
        }
        Command::Embed { text } => {
            let context = build_context(config).await?;
            let embedding = context.embedding_provider().embed(text).await?;
            Ok(serde_json::to_string_pretty(&embedding)?)
        }
        Command::Worker { candidates } => {
            let context = build_context(config).await?;
            if let Some(path) = candidates {
                seed_from_file(&context, path).await?;
            }

            let cancel = CancellationToken::new();
            let pool = context.spawn_workers(cancel.clone());
            info!(workers = pool.len(), "Embedding workers running, press Ctrl-C to stop");

            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for shutdown signal")?;
            info!("Received shutdown signal, stopping workers");
            pool.shutdown();
            let stats = pool.join().await?;

            Ok(serde_json::to_string_pretty(&stats)?)
        }
    }
}

async fn build_context(config: AppConfig) -> anyhow::Result<AppContext> {
    init_app(config)
        .await
        .context("failed to initialize application")
}

/// Read a JSON array of candidate records
pub fn load_candidates(path: &Path) -> anyhow::Result<Vec<CandidateProfile>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read candidates from {}", path.display()))?;
    let profiles = serde_json::from_str(&raw)
        .with_context(|| format!("invalid candidate records in {}", path.display()))?;
    Ok(profiles)
}

async fn seed_from_file(context: &AppContext, path: &Path) -> anyhow::Result<()> {
    let profiles = load_candidates(path)?;
    let total = profiles.len();
    let scheduled = context.seed_candidates(profiles).await?;
    if scheduled < total {
        warn!(
            total,
            scheduled, "Some candidate records have no text to embed"
        );
    }
    Ok(())
}

fn cancel_on_ctrl_c(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received shutdown signal, cancelling search");
            cancel.cancel();
        }
    })
}
