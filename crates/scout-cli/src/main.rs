//! Scout command-line shell.
//!
//! Runs one search and prints the response envelope as JSON on stdout.
//! Logs go to stderr.

use anyhow::Context;
use clap::Parser;
use scout_core::{AppConfig, FetchContext, SearchFilters, SearchRequest, SearchResponse};
use scout_fetch::FetchOrchestrator;
use scout_provider::ProviderLoader;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Search every configured torrent provider at once.
#[derive(Debug, Parser)]
#[command(name = "scout", version, about)]
struct Cli {
    /// Free-text search query
    query: String,

    /// Query only this provider, even if it is disabled
    #[arg(long, short = 'p')]
    provider: Option<String>,

    /// Keep results whose resolution contains this value (e.g. 1080p)
    #[arg(long, default_value = "")]
    resolution: String,

    /// Keep results from this release group
    #[arg(long, default_value = "")]
    group: String,

    /// Keep results whose normalized title equals this value
    #[arg(long, default_value = "")]
    title: String,

    /// Season number for series (0 = any)
    #[arg(long, default_value_t = 0)]
    season: u32,

    /// Episode number for series (0 = any)
    #[arg(long, default_value_t = 0)]
    episode: u32,

    /// Overall search deadline in seconds
    #[arg(long, short = 't')]
    timeout: Option<u64>,

    /// Directory holding provider descriptors
    #[arg(long, env = "SCOUT_PROVIDERS_DIR")]
    providers_dir: Option<PathBuf>,
}

impl Cli {
    fn request(&self) -> SearchRequest {
        SearchRequest::new(self.query.clone()).with_filters(SearchFilters {
            resolution: self.resolution.clone(),
            group: self.group.clone(),
            title: self.title.clone(),
            season: self.season,
            episode: self.episode,
        })
    }

    fn context(&self) -> FetchContext {
        match self.timeout {
            Some(secs) => FetchContext::with_timeout(Duration::from_secs(secs)),
            None => FetchContext::new(),
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,scout=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    info!("Starting Scout v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load_with_env().context("failed to load configuration")?;
    if let Some(dir) = &cli.providers_dir {
        config.providers.dir.clone_from(dir);
    }

    let loader = ProviderLoader::from_config(&config.providers)
        .with_context(|| format!("cannot open providers directory {}", config.providers.dir.display()))?;
    info!(dir = %loader.dir().display(), "Using provider descriptors");
    let orchestrator = FetchOrchestrator::new(loader, config.fetch.clone())?;

    let ctx = cli.context();
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling search");
            interrupt.cancel();
        }
    });

    let request = cli.request();
    let outcome = match &cli.provider {
        Some(name) => orchestrator.fetch_by_provider(&ctx, name, &request).await,
        None => orchestrator.fetch_all(&ctx, &request).await,
    };

    let response = match outcome {
        Ok(torrents) => SearchResponse::ok(torrents),
        Err(e) => {
            warn!(error = %e, "search failed");
            SearchResponse::error(e)
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
