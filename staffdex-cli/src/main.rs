//! Staffdex CLI - boots the cached employee-directory proxy.

mod error;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use staffdex::cache::{CacheStore, MemoryCacheStore};
use staffdex::client::{DirectoryClient, HttpClient, ReqwestClient};
use staffdex::config::Config;
use staffdex::service::DirectoryService;
use staffdex::telemetry::DirectoryMetrics;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "staffdex", version = staffdex::VERSION, about = "Cached proxy for a rate-limited employee directory API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the proxy server.
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Path to an INI config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// HTTP bind address (overrides config).
    #[arg(long)]
    bind: Option<String>,

    /// Upstream directory base URL (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for rotating log files. Logs go to stderr only when
    /// unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args),
    }
}

fn serve(args: ServeArgs) -> Result<(), CliError> {
    // Guard must outlive the runtime so buffered log lines flush.
    let _log_guard = logging::init(args.log_dir.as_deref())?;

    // Precedence: CLI flag > config file > default.
    let mut config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| CliError::Config(e.to_string()))?,
        None => Config::default(),
    };
    if let Some(bind) = args.bind {
        config = config.with_bind(bind);
    }
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }

    println!("Staffdex v{}", staffdex::VERSION);
    println!("Upstream: {}", config.upstream.base_url);
    println!("Bind:     {}", config.bind);
    println!();
    println!("Press Ctrl+C to shut down");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;

    runtime.block_on(run(config))
}

async fn run(config: Config) -> Result<(), CliError> {
    let http = ReqwestClient::with_timeout(&config.upstream.base_url, config.upstream.timeout)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let metrics = Arc::new(DirectoryMetrics::new());
    let client = DirectoryClient::new(
        Arc::new(http) as Arc<dyn HttpClient>,
        config.upstream.retry_policy(),
        Arc::clone(&metrics),
    );
    let store = Arc::new(MemoryCacheStore::new(
        config.cache.max_size_bytes,
        config.cache.ttl,
    )) as Arc<dyn CacheStore>;
    let service = Arc::new(DirectoryService::new(store, client, Arc::clone(&metrics)));

    info!(
        upstream = %config.upstream.base_url,
        bind = %config.bind,
        "starting staffdex"
    );

    staffdex::api::serve(&config.bind, service)
        .await
        .map_err(CliError::Serve)?;

    let snapshot = metrics.snapshot();
    info!(
        cache_hits = snapshot.cache_hits,
        cache_misses = snapshot.cache_misses,
        full_refreshes = snapshot.full_refreshes,
        upstream_calls = snapshot.upstream_calls,
        "shutdown complete"
    );
    Ok(())
}
