//! dsar-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) layered under
//! `DSAR_*` environment variables, opens the SQLite store, picks a summary
//! backend, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use dsar_core::RequestService;
use dsar_server::{expand_tilde, load_config, router};
use dsar_store_sqlite::SqliteStore;
use dsar_summary::Summarizer;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Data-subject request tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = load_config(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let summarizer = Summarizer::from_config(server_cfg.summary.clone());
  let service = Arc::new(RequestService::new(store, summarizer));

  let app = router(service, &server_cfg.cors_origin)
    .with_context(|| format!("invalid cors_origin {:?}", server_cfg.cors_origin))?;
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
