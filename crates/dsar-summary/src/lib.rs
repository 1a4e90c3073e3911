//! Summary generation backends for DSAR.
//!
//! [`RemoteSummarizer`] asks an OpenAI-compatible chat-completions endpoint
//! for a summary and falls back to the local template on any failure.
//! [`Summarizer`] is the configured choice between it and the plain
//! [`FallbackSummary`], made once at startup.

mod config;
mod remote;

pub mod error;

pub use config::{PLACEHOLDER_API_KEY, SummaryConfig};
pub use dsar_core::summary::FallbackSummary;
pub use error::{Error, Result};
pub use remote::RemoteSummarizer;

use dsar_core::{RequestType, summary::SummaryGenerator};

/// The summary backend selected from configuration.
#[derive(Clone)]
pub enum Summarizer {
  Remote(RemoteSummarizer),
  Fallback(FallbackSummary),
}

impl Summarizer {
  /// Pick the remote backend if a real credential is configured, otherwise the
  /// local template. No network access happens here.
  pub fn from_config(config: SummaryConfig) -> Self {
    if config.is_configured() {
      tracing::info!(api_url = %config.api_url, model = %config.model, "using remote summariser");
      Self::Remote(RemoteSummarizer::new(config))
    } else {
      tracing::info!("no summary api key configured; using local summaries");
      Self::Fallback(FallbackSummary)
    }
  }

  pub fn is_remote(&self) -> bool { matches!(self, Self::Remote(_)) }
}

impl SummaryGenerator for Summarizer {
  async fn generate_summary<'a>(
    &'a self,
    request_type: RequestType,
    requester_id: &'a str,
    notes: Option<&'a str>,
  ) -> String {
    match self {
      Self::Remote(r) => {
        r.generate_summary(request_type, requester_id, notes).await
      }
      Self::Fallback(f) => {
        f.generate_summary(request_type, requester_id, notes).await
      }
    }
  }
}
