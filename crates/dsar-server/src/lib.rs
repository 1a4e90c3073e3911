//! HTTP server assembly for DSAR.
//!
//! Loads [`ServerConfig`], and wraps the [`dsar_api`] router with the health
//! probe, CORS for the browser frontend, and request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Json, Router,
  http::{HeaderValue, Method, header, header::InvalidHeaderValue},
  routing::get,
};
use dsar_core::{RequestService, store::RequestStore, summary::SummaryGenerator};
use dsar_summary::SummaryConfig;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `DSAR_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:        String,
  #[serde(default = "default_port")]
  pub port:        u16,
  #[serde(default = "default_store_path")]
  pub store_path:  PathBuf,
  /// Browser origin allowed to call the API.
  #[serde(default = "default_cors_origin")]
  pub cors_origin: String,
  #[serde(default)]
  pub summary:     SummaryConfig,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("dsar.db") }

fn default_cors_origin() -> String { "http://localhost:3000".to_owned() }

/// Layer the optional TOML file at `path` under `DSAR_*` environment
/// variables (`__` separates nested keys, e.g. `DSAR_SUMMARY__API_KEY`).
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("DSAR").separator("__"))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
///
/// Fails only if `cors_origin` is not a valid header value.
pub fn router<S, G>(
  service: Arc<RequestService<S, G>>,
  cors_origin: &str,
) -> Result<Router, InvalidHeaderValue>
where
  S: RequestStore + 'static,
  G: SummaryGenerator + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(cors_origin.parse::<HeaderValue>()?)
    .allow_methods([Method::GET, Method::POST, Method::PUT])
    .allow_headers([header::CONTENT_TYPE]);

  Ok(
    Router::new()
      .route("/health", get(health))
      .merge(dsar_api::api_router(service))
      .layer(cors)
      .layer(TraceLayer::new_for_http()),
  )
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{body::Body, http::{Request, StatusCode}};
  use dsar_core::summary::FallbackSummary;
  use dsar_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let service = Arc::new(RequestService::new(store, FallbackSummary));
    router(service, "http://localhost:3000").unwrap()
  }

  #[tokio::test]
  async fn health_returns_ok() {
    let resp = app()
      .await
      .oneshot(Request::get("/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn preflight_allows_frontend_origin() {
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/data-requests")
      .header(header::ORIGIN, "http://localhost:3000")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .body(Body::empty())
      .unwrap();
    let resp = app().await.oneshot(req).await.unwrap();
    assert_eq!(
      resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .unwrap(),
      "http://localhost:3000"
    );
  }

  #[tokio::test]
  async fn api_routes_are_mounted() {
    let resp = app()
      .await
      .oneshot(Request::get("/data-requests").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn invalid_cors_origin_is_rejected() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let service = Arc::new(RequestService::new(store, FallbackSummary));
    assert!(router(service, "bad\norigin").is_err());
  }

  #[test]
  fn missing_config_file_uses_defaults() {
    let path = std::env::temp_dir().join("dsar-no-such-config.toml");
    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.cors_origin, "http://localhost:3000");
    assert_eq!(cfg.summary.model, "gpt-3.5-turbo");
    assert!(!cfg.summary.is_configured());
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!(
      "dsar-config-{}.toml",
      std::process::id()
    ));
    std::fs::write(
      &path,
      "port = 9000\nstore_path = \"/tmp/x.db\"\n\n[summary]\napi_key = \"sk-live\"\nmax_tokens = 80\n",
    )
    .unwrap();

    let cfg = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/x.db"));
    assert_eq!(cfg.summary.api_key(), Some("sk-live"));
    assert_eq!(cfg.summary.max_tokens, 80);
    assert!(cfg.summary.api_url.ends_with("/chat/completions"));
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/dsar.db")),
      PathBuf::from(home).join("dsar.db")
    );
    assert_eq!(expand_tilde(Path::new("/abs.db")), PathBuf::from("/abs.db"));
  }
}
