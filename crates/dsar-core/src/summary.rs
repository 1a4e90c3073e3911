//! Summary generation: the `SummaryGenerator` capability and its
//! deterministic local fallback.

use std::future::Future;

use crate::request::RequestType;

/// Produces a human-readable summary for a new request.
///
/// Implementations never fail: any backend problem must be absorbed and
/// replaced with [`fallback_summary`], so the returned text is never empty.
pub trait SummaryGenerator: Send + Sync {
  fn generate_summary<'a>(
    &'a self,
    request_type: RequestType,
    requester_id: &'a str,
    notes: Option<&'a str>,
  ) -> impl Future<Output = String> + Send + 'a;
}

/// Generator that always uses the local template.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSummary;

impl SummaryGenerator for FallbackSummary {
  async fn generate_summary<'a>(
    &'a self,
    request_type: RequestType,
    requester_id: &'a str,
    notes: Option<&'a str>,
  ) -> String {
    fallback_summary(request_type, requester_id, notes)
  }
}

/// The phrase used by the fallback template for each request type.
pub fn action_phrase(request_type: RequestType) -> &'static str {
  match request_type {
    RequestType::Access => "requesting access to their personal data",
    RequestType::Delete => "requesting deletion of their personal data",
    RequestType::Correct => "requesting correction of their personal data",
  }
}

/// Deterministic summary built from a fixed template. Empty notes are treated
/// as absent.
pub fn fallback_summary(
  request_type: RequestType,
  requester_id: &str,
  notes: Option<&str>,
) -> String {
  let action = action_phrase(request_type);
  match notes.filter(|n| !n.is_empty()) {
    Some(n) => format!("User {requester_id} is {action}. Additional notes: {n}."),
    None => format!("User {requester_id} is {action}."),
  }
}
