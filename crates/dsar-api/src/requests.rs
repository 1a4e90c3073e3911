//! Handlers for `/data-requests` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/data-requests` | Optional `?status=...&requestType=...` |
//! | `POST` | `/data-requests` | Body: `{"requestType":"ACCESS","requesterId":"...","notes":"..."}` |
//! | `GET`  | `/data-requests/:id` | 404 if not found |
//! | `PUT`  | `/data-requests/:id/status` | Body: `{"status":"IN_REVIEW"}`; 409 if the edge is illegal |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use dsar_core::{
  CreateRequest, DataRequest, RequestType, Status, store::RequestStore,
  summary::SummaryGenerator,
};
use serde::{
  Deserialize, Deserializer,
  de::{self, DeserializeOwned, value::{self, StrDeserializer}},
};
use uuid::Uuid;

use crate::{ServiceState, error::ApiError};

fn bad_json(e: JsonRejection) -> ApiError { ApiError::BadRequest(e.body_text()) }

fn bad_path(e: PathRejection) -> ApiError { ApiError::BadRequest(e.body_text()) }

fn bad_query(e: QueryRejection) -> ApiError {
  ApiError::BadRequest(e.body_text())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// An empty filter value (`?status=`) means "no filter".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  #[serde(default, deserialize_with = "empty_as_none")]
  pub status:       Option<Status>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub request_type: Option<RequestType>,
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let raw = Option::<String>::deserialize(deserializer)?;
  match raw.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(v) => {
      T::deserialize(StrDeserializer::<value::Error>::new(v))
        .map(Some)
        .map_err(de::Error::custom)
    }
  }
}

/// `GET /data-requests[?status=<status>][&requestType=<type>]`
pub async fn list<S, G>(
  State(service): State<ServiceState<S, G>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<DataRequest>>, ApiError>
where
  S: RequestStore,
  G: SummaryGenerator,
{
  let Query(params) = params.map_err(bad_query)?;
  let requests = service.list(params.status, params.request_type).await?;
  Ok(Json(requests))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /data-requests`: returns 201 + the stored request.
pub async fn create<S, G>(
  State(service): State<ServiceState<S, G>>,
  body: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RequestStore,
  G: SummaryGenerator,
{
  let Json(body) = body.map_err(bad_json)?;
  let request = service.create(body).await?;
  Ok((StatusCode::CREATED, Json(request)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /data-requests/:id`
pub async fn get_one<S, G>(
  State(service): State<ServiceState<S, G>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<DataRequest>, ApiError>
where
  S: RequestStore,
  G: SummaryGenerator,
{
  let Path(id) = id.map_err(bad_path)?;
  Ok(Json(service.get_by_id(id).await?))
}

// ─── Update status ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
  pub status: Option<Status>,
}

/// `PUT /data-requests/:id/status`, body: `{"status":"IN_REVIEW"}`
pub async fn update_status<S, G>(
  State(service): State<ServiceState<S, G>>,
  id: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<UpdateStatusBody>, JsonRejection>,
) -> Result<Json<DataRequest>, ApiError>
where
  S: RequestStore,
  G: SummaryGenerator,
{
  let Path(id) = id.map_err(bad_path)?;
  let Json(body) = body.map_err(bad_json)?;
  let status = body
    .status
    .ok_or_else(|| ApiError::BadRequest("status is required".into()))?;
  Ok(Json(service.update_status(id, status).await?))
}
