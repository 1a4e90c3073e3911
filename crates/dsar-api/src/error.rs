//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] dsar_core::Error),

  #[error("bad request: {0}")]
  BadRequest(String),
}

impl ApiError {
  fn status(&self) -> StatusCode {
    use dsar_core::Error as E;
    match self {
      ApiError::BadRequest(_) | ApiError::Core(E::Validation(_)) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Core(E::NotFound(_)) => StatusCode::NOT_FOUND,
      ApiError::Core(E::InvalidTransition { .. } | E::Conflict(_)) => {
        StatusCode::CONFLICT
      }
      ApiError::Core(E::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
