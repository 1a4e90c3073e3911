//! The `RequestStore` trait.
//!
//! Implemented by storage backends (e.g. `dsar-store-sqlite`). The service
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  Status,
  request::{DataRequest, NewDataRequest, RequestType},
};

/// Abstraction over a request store backend.
///
/// Listing methods return requests in creation order.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RequestStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new request and return it with its freshly assigned id.
  fn save(
    &self,
    request: NewDataRequest,
  ) -> impl Future<Output = Result<DataRequest, Self::Error>> + Send + '_;

  /// Retrieve a request by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<DataRequest>, Self::Error>> + Send + '_;

  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<DataRequest>, Self::Error>> + Send + '_;

  fn find_by_status(
    &self,
    status: Status,
  ) -> impl Future<Output = Result<Vec<DataRequest>, Self::Error>> + Send + '_;

  fn find_by_type(
    &self,
    request_type: RequestType,
  ) -> impl Future<Output = Result<Vec<DataRequest>, Self::Error>> + Send + '_;

  fn find_by_status_and_type(
    &self,
    status: Status,
    request_type: RequestType,
  ) -> impl Future<Output = Result<Vec<DataRequest>, Self::Error>> + Send + '_;

  /// Set `status` and `last_updated_at` only if the stored status still
  /// equals `expected`. The check and the write must be atomic.
  ///
  /// Returns the updated request, or `None` if no request with `id` currently
  /// has status `expected` (missing, or changed by someone else).
  fn update_status(
    &self,
    id: Uuid,
    expected: Status,
    new_status: Status,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<DataRequest>, Self::Error>> + Send + '_;
}
