//! [`RequestService`]: the request lifecycle orchestrator.
//!
//! Mediates between the store, the status state machine, and the summary
//! generator. Every operation is all-or-nothing and nothing is retried here.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
  Error, Result, Status,
  request::{CreateRequest, DataRequest, NewDataRequest, RequestType},
  status,
  store::RequestStore,
  summary::{SummaryGenerator, fallback_summary},
};

/// Lifecycle operations over a [`RequestStore`], with summaries produced by a
/// [`SummaryGenerator`].
pub struct RequestService<S, G> {
  store:     S,
  generator: G,
}

impl<S, G> RequestService<S, G>
where
  S: RequestStore,
  G: SummaryGenerator,
{
  pub fn new(store: S, generator: G) -> Self { Self { store, generator } }

  pub fn store(&self) -> &S { &self.store }

  pub fn generator(&self) -> &G { &self.generator }

  /// Validate `input`, generate a summary, and persist a new request in
  /// [`Status::INITIAL`].
  ///
  /// The generator never fails, and blank generator output is replaced with
  /// the local template, so creation only fails on validation or storage
  /// errors.
  pub async fn create(&self, input: CreateRequest) -> Result<DataRequest> {
    let request_type = input
      .request_type
      .ok_or_else(|| Error::Validation("request type is required".into()))?;
    let requester_id = input
      .requester_id
      .filter(|r| !r.trim().is_empty())
      .ok_or_else(|| Error::Validation("requester id is required".into()))?;

    let mut summary = self
      .generator
      .generate_summary(request_type, &requester_id, input.notes.as_deref())
      .await;
    if summary.trim().is_empty() {
      warn!(%request_type, "summary generator returned blank text; using local summary");
      summary = fallback_summary(
        request_type,
        &requester_id,
        input.notes.as_deref(),
      );
    }

    let now = Utc::now();
    let new = NewDataRequest {
      request_type,
      requester_id,
      notes: input.notes,
      status: Status::INITIAL,
      summary,
      created_at: now,
      last_updated_at: now,
    };

    let request = self.store.save(new).await.map_err(Error::store)?;
    info!(
      id = %request.id,
      request_type = %request.request_type,
      "created data request"
    );
    Ok(request)
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<DataRequest> {
    self
      .store
      .find_by_id(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))
  }

  /// List requests, narrowed by whichever filters are given. No filters
  /// returns everything.
  pub async fn list(
    &self,
    status: Option<Status>,
    request_type: Option<RequestType>,
  ) -> Result<Vec<DataRequest>> {
    let found = match (status, request_type) {
      (Some(s), Some(t)) => self.store.find_by_status_and_type(s, t).await,
      (Some(s), None) => self.store.find_by_status(s).await,
      (None, Some(t)) => self.store.find_by_type(t).await,
      (None, None) => self.store.find_all().await,
    };
    found.map_err(Error::store)
  }

  /// Move request `id` to `new_status` if the edge is legal.
  ///
  /// The write is a compare-and-set against the status that was validated, so
  /// two racing transitions out of the same status cannot both commit; the
  /// loser gets [`Error::Conflict`].
  pub async fn update_status(
    &self,
    id: Uuid,
    new_status: Status,
  ) -> Result<DataRequest> {
    let current = self.get_by_id(id).await?;

    if let Err(e) = status::check_transition(current.status, new_status) {
      debug!(%id, from = %current.status, to = %new_status, "rejected transition");
      return Err(e);
    }

    // Never move the timestamp backwards, even if the clock does.
    let at = Utc::now().max(current.last_updated_at);

    let updated = self
      .store
      .update_status(id, current.status, new_status, at)
      .await
      .map_err(Error::store)?
      .ok_or(Error::Conflict(id))?;

    info!(%id, from = %current.status, to = %updated.status, "status updated");
    Ok(updated)
  }
}
