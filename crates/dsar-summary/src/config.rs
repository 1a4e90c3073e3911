//! Configuration for the remote summariser.

use serde::Deserialize;

/// The value shipped in sample configs; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Remote summariser settings, usually the `[summary]` table of
/// `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
  /// Chat-completions endpoint.
  #[serde(default = "default_api_url")]
  pub api_url:     String,
  /// Bearer credential. Absent, blank, or the placeholder means "use the
  /// local template".
  #[serde(default)]
  pub api_key:     Option<String>,
  #[serde(default = "default_model")]
  pub model:       String,
  #[serde(default = "default_max_tokens")]
  pub max_tokens:  u32,
  #[serde(default = "default_temperature")]
  pub temperature: f32,
}

impl SummaryConfig {
  /// The usable credential, if any.
  pub fn api_key(&self) -> Option<&str> {
    self
      .api_key
      .as_deref()
      .map(str::trim)
      .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
  }

  pub fn is_configured(&self) -> bool { self.api_key().is_some() }
}

impl Default for SummaryConfig {
  fn default() -> Self {
    Self {
      api_url:     default_api_url(),
      api_key:     None,
      model:       default_model(),
      max_tokens:  default_max_tokens(),
      temperature: default_temperature(),
    }
  }
}

fn default_api_url() -> String {
  "https://api.openai.com/v1/chat/completions".to_owned()
}

fn default_model() -> String { "gpt-3.5-turbo".to_owned() }

fn default_max_tokens() -> u32 { 150 }

fn default_temperature() -> f32 { 0.7 }
