//! Error types for `dsar-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::Status;

#[derive(Debug, Error)]
pub enum Error {
  /// A required input field was missing or blank.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("request not found: {0}")]
  NotFound(Uuid),

  #[error("Cannot transition from {from} to {to}")]
  InvalidTransition { from: Status, to: Status },

  /// The request's status changed between read and write. Safe to retry.
  #[error("request {0} was modified concurrently")]
  Conflict(Uuid),

  /// The storage backend failed. Not retried here.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error as [`Error::Store`].
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  /// `true` for failures a caller may reasonably retry.
  pub fn is_transient(&self) -> bool {
    matches!(self, Self::Conflict(_) | Self::Store(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
