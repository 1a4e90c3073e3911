//! [`RemoteSummarizer`]: summaries from an OpenAI-compatible chat endpoint.

use dsar_core::{
  RequestType,
  summary::{SummaryGenerator, fallback_summary},
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, SummaryConfig};

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
  role:    String,
  #[serde(default)]
  content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  model:       &'a str,
  messages:    Vec<ChatMessage>,
  max_tokens:  u32,
  temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  #[serde(default)]
  choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
  message: Option<ChatMessage>,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Remote summary backend.
///
/// Makes exactly one call per summary, with no retry and the HTTP client's
/// default timeouts. Cheap to clone; the inner [`reqwest::Client`] is
/// `Arc`-based.
#[derive(Clone)]
pub struct RemoteSummarizer {
  client: Client,
  config: SummaryConfig,
}

impl RemoteSummarizer {
  pub fn new(config: SummaryConfig) -> Self {
    Self { client: Client::new(), config }
  }

  pub fn config(&self) -> &SummaryConfig { &self.config }

  /// Ask the backend for a summary. Fails without touching the network if no
  /// credential is configured.
  pub async fn request_summary(
    &self,
    request_type: RequestType,
    requester_id: &str,
    notes: Option<&str>,
  ) -> Result<String> {
    let api_key = self.config.api_key().ok_or(Error::NotConfigured)?;

    let body = ChatRequest {
      model:       &self.config.model,
      messages:    vec![ChatMessage {
        role:    "user".to_owned(),
        content: Some(build_prompt(request_type, requester_id, notes)),
      }],
      max_tokens:  self.config.max_tokens,
      temperature: self.config.temperature,
    };

    let response = self
      .client
      .post(&self.config.api_url)
      .bearer_auth(api_key)
      .json(&body)
      .send()
      .await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
      return Err(Error::Api { status: status.as_u16(), body: text });
    }

    let parsed: ChatResponse = serde_json::from_str(&text)?;
    parsed
      .choices
      .into_iter()
      .next()
      .and_then(|c| c.message)
      .and_then(|m| m.content)
      .map(|c| c.trim().to_owned())
      .filter(|c| !c.is_empty())
      .ok_or(Error::EmptyCompletion)
  }
}

impl SummaryGenerator for RemoteSummarizer {
  async fn generate_summary<'a>(
    &'a self,
    request_type: RequestType,
    requester_id: &'a str,
    notes: Option<&'a str>,
  ) -> String {
    match self.request_summary(request_type, requester_id, notes).await {
      Ok(summary) => summary,
      Err(Error::NotConfigured) => {
        tracing::debug!("summary api not configured; using local summary");
        fallback_summary(request_type, requester_id, notes)
      }
      Err(e) => {
        tracing::warn!(error = %e, "failed to generate remote summary; using local summary");
        fallback_summary(request_type, requester_id, notes)
      }
    }
  }
}

/// The prompt sent to the backend. Bounded: asks for at most 100 words.
pub(crate) fn build_prompt(
  request_type: RequestType,
  requester_id: &str,
  notes: Option<&str>,
) -> String {
  format!(
    "Generate a brief, professional summary (max 100 words) for this data request:\n\
     Type: {request_type}\n\
     Requester ID: {requester_id}\n\
     Notes: {}\n\
     Summary should be human-readable and concise.",
    notes.unwrap_or("None provided"),
  )
}
