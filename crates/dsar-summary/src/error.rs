//! Error type for `dsar-summary`.
//!
//! These never escape [`SummaryGenerator::generate_summary`](dsar_core::summary::SummaryGenerator::generate_summary);
//! they exist so failures can be logged before falling back.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no api key configured")]
  NotConfigured,

  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("api error (status {status}): {body}")]
  Api { status: u16, body: String },

  #[error("malformed response: {0}")]
  Json(#[from] serde_json::Error),

  #[error("response contained no completion text")]
  EmptyCompletion,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
