//! JSON REST API for DSAR.
//!
//! Exposes an axum [`Router`] over a [`RequestService`]. Auth, TLS, CORS and
//! tracing layers are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(dsar_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod requests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use dsar_core::{RequestService, store::RequestStore, summary::SummaryGenerator};

pub use error::ApiError;

/// Shared handler state.
pub type ServiceState<S, G> = Arc<RequestService<S, G>>;

/// Build the data-request API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(service: ServiceState<S, G>) -> Router<()>
where
  S: RequestStore + 'static,
  G: SummaryGenerator + 'static,
{
  Router::new()
    .route(
      "/data-requests",
      get(requests::list::<S, G>).post(requests::create::<S, G>),
    )
    .route("/data-requests/{id}", get(requests::get_one::<S, G>))
    .route("/data-requests/{id}/status", put(requests::update_status::<S, G>))
    .with_state(service)
}

#[cfg(test)]
mod tests;
