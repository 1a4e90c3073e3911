//! Router tests against an in-memory SQLite store and local summaries.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use dsar_core::{
  RequestService, RequestType,
  summary::{FallbackSummary, SummaryGenerator},
};
use dsar_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::api_router;

/// Backend that always answers with blank text.
struct BlankSummary;

impl SummaryGenerator for BlankSummary {
  async fn generate_summary<'a>(
    &'a self,
    _request_type: RequestType,
    _requester_id: &'a str,
    _notes: Option<&'a str>,
  ) -> String {
    String::new()
  }
}

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(RequestService::new(store, FallbackSummary)))
}

async fn call(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
  };
  (status, value)
}

async fn create(app: &Router, request_type: &str, requester: &str) -> Value {
  let (status, body) = call(
    app,
    "POST",
    "/data-requests",
    Some(json!({ "requestType": request_type, "requesterId": requester })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  body
}

// ── POST ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_with_fallback_summary() {
  let app = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/data-requests",
    Some(json!({
      "requestType": "ACCESS",
      "requesterId": "user123",
      "notes": "Need my data"
    })),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["status"], "RECEIVED");
  assert_eq!(body["requestType"], "ACCESS");
  assert_eq!(body["requesterId"], "user123");
  assert_eq!(
    body["summary"],
    "User user123 is requesting access to their personal data. Additional notes: Need my data."
  );
  assert!(body["id"].as_str().is_some());
  assert_eq!(body["createdAt"], body["lastUpdatedAt"]);
}

#[tokio::test]
async fn blank_generated_summary_still_creates() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let app = api_router(Arc::new(RequestService::new(store, BlankSummary)));

  let body = create(&app, "ACCESS", "u").await;
  assert_eq!(body["status"], "RECEIVED");
  assert_eq!(
    body["summary"],
    "User u is requesting access to their personal data."
  );
}

#[tokio::test]
async fn create_without_requester_returns_400() {
  let app = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/data-requests",
    Some(json!({ "requestType": "DELETE" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("requester"));

  let (status, _) = call(
    &app,
    "POST",
    "/data-requests",
    Some(json!({ "requesterId": "u1" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_unknown_type_returns_400() {
  let app = app().await;
  let (status, _) = call(
    &app,
    "POST",
    "/data-requests",
    Some(json!({ "requestType": "ARCHIVE", "requesterId": "u1" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── GET ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_one_round_trips_and_unknown_is_404() {
  let app = app().await;
  let created = create(&app, "CORRECT", "u1").await;
  let id = created["id"].as_str().unwrap();

  let (status, body) = call(&app, "GET", &format!("/data-requests/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, created);

  let (status, body) = call(
    &app,
    "GET",
    &format!("/data-requests/{}", Uuid::new_v4()),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_id_returns_400() {
  let app = app().await;
  let (status, _) = call(&app, "GET", "/data-requests/not-a-uuid", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_applies_query_filters() {
  let app = app().await;
  let a = create(&app, "ACCESS", "a").await;
  create(&app, "DELETE", "d").await;
  create(&app, "ACCESS", "a2").await;

  let id = a["id"].as_str().unwrap();
  call(
    &app,
    "PUT",
    &format!("/data-requests/{id}/status"),
    Some(json!({ "status": "IN_REVIEW" })),
  )
  .await;

  let (_, all) = call(&app, "GET", "/data-requests", None).await;
  assert_eq!(all.as_array().unwrap().len(), 3);

  let (_, access) = call(&app, "GET", "/data-requests?requestType=ACCESS", None).await;
  assert_eq!(access.as_array().unwrap().len(), 2);

  let (_, received) = call(&app, "GET", "/data-requests?status=RECEIVED", None).await;
  assert_eq!(received.as_array().unwrap().len(), 2);

  let (_, both) = call(
    &app,
    "GET",
    "/data-requests?status=IN_REVIEW&requestType=ACCESS",
    None,
  )
  .await;
  let both = both.as_array().unwrap();
  assert_eq!(both.len(), 1);
  assert_eq!(both[0]["id"], a["id"]);

  let (status, _) = call(&app, "GET", "/data-requests?status=DONE", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_filters_are_ignored() {
  let app = app().await;
  create(&app, "ACCESS", "a").await;
  create(&app, "DELETE", "d").await;

  let (status, all) = call(&app, "GET", "/data-requests?status=", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(all.as_array().unwrap().len(), 2);

  let (status, deletes) = call(
    &app,
    "GET",
    "/data-requests?status=&requestType=DELETE",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let deletes = deletes.as_array().unwrap();
  assert_eq!(deletes.len(), 1);
  assert_eq!(deletes[0]["requestType"], "DELETE");
}

// ── PUT status ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_walk_and_illegal_edges() {
  let app = app().await;
  let created = create(&app, "ACCESS", "u1").await;
  let uri = format!("/data-requests/{}/status", created["id"].as_str().unwrap());

  // RECEIVED -> COMPLETED skips review.
  let (status, body) =
    call(&app, "PUT", &uri, Some(json!({ "status": "COMPLETED" }))).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["error"], "Cannot transition from RECEIVED to COMPLETED");

  let (status, body) =
    call(&app, "PUT", &uri, Some(json!({ "status": "IN_REVIEW" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "IN_REVIEW");

  // Same edge twice.
  let (status, _) =
    call(&app, "PUT", &uri, Some(json!({ "status": "IN_REVIEW" }))).await;
  assert_eq!(status, StatusCode::CONFLICT);

  let (status, done) =
    call(&app, "PUT", &uri, Some(json!({ "status": "COMPLETED" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(done["status"], "COMPLETED");

  // Terminal.
  let (status, _) =
    call(&app, "PUT", &uri, Some(json!({ "status": "REJECTED" }))).await;
  assert_eq!(status, StatusCode::CONFLICT);

  let get_uri = format!("/data-requests/{}", created["id"].as_str().unwrap());
  let (_, after) = call(&app, "GET", &get_uri, None).await;
  assert_eq!(after, done);
}

#[tokio::test]
async fn status_update_errors() {
  let app = app().await;

  let (status, _) = call(
    &app,
    "PUT",
    &format!("/data-requests/{}/status", Uuid::new_v4()),
    Some(json!({ "status": "IN_REVIEW" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let created = create(&app, "DELETE", "u1").await;
  let uri = format!("/data-requests/{}/status", created["id"].as_str().unwrap());

  let (status, body) = call(&app, "PUT", &uri, Some(json!({}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "bad request: status is required");

  let (status, _) = call(&app, "PUT", &uri, Some(json!({ "status": "DONE" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}
