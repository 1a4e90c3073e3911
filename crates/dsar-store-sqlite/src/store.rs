//! [`SqliteStore`]: the SQLite implementation of [`RequestStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use dsar_core::{
  DataRequest, NewDataRequest, RequestType, Status, store::RequestStore,
};

use crate::{
  Result,
  encode::{
    COLUMNS, RawRequest, encode_dt, encode_request_type, encode_status,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A request store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All
/// statements run on the connection's single worker thread, in order.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `SELECT <COLUMNS> FROM data_requests <where_clause>` in creation
  /// order.
  async fn select(
    &self,
    where_clause: &'static str,
    params: Vec<String>,
  ) -> Result<Vec<DataRequest>> {
    let raws: Vec<RawRequest> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {COLUMNS} FROM data_requests {where_clause} ORDER BY seq"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawRequest::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRequest::into_request).collect()
  }
}

// ─── RequestStore impl ───────────────────────────────────────────────────────

impl RequestStore for SqliteStore {
  type Error = crate::Error;

  async fn save(&self, request: NewDataRequest) -> Result<DataRequest> {
    let request = request.with_id(Uuid::new_v4());

    let id_str      = encode_uuid(request.id);
    let type_str    = encode_request_type(request.request_type);
    let requester   = request.requester_id.clone();
    let notes       = request.notes.clone();
    let status_str  = encode_status(request.status);
    let summary     = request.summary.clone();
    let created_str = encode_dt(request.created_at);
    let updated_str = encode_dt(request.last_updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO data_requests (
             id, request_type, requester_id, notes, status,
             summary, created_at, last_updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            type_str,
            requester,
            notes,
            status_str,
            summary,
            created_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(request)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<DataRequest>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawRequest> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM data_requests WHERE id = ?1"),
              rusqlite::params![id_str],
              RawRequest::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRequest::into_request).transpose()
  }

  async fn find_all(&self) -> Result<Vec<DataRequest>> {
    self.select("", vec![]).await
  }

  async fn find_by_status(&self, status: Status) -> Result<Vec<DataRequest>> {
    self
      .select("WHERE status = ?1", vec![encode_status(status).to_owned()])
      .await
  }

  async fn find_by_type(
    &self,
    request_type: RequestType,
  ) -> Result<Vec<DataRequest>> {
    self
      .select(
        "WHERE request_type = ?1",
        vec![encode_request_type(request_type).to_owned()],
      )
      .await
  }

  async fn find_by_status_and_type(
    &self,
    status: Status,
    request_type: RequestType,
  ) -> Result<Vec<DataRequest>> {
    self
      .select("WHERE status = ?1 AND request_type = ?2", vec![
        encode_status(status).to_owned(),
        encode_request_type(request_type).to_owned(),
      ])
      .await
  }

  async fn update_status(
    &self,
    id:         Uuid,
    expected:   Status,
    new_status: Status,
    at:         DateTime<Utc>,
  ) -> Result<Option<DataRequest>> {
    let id_str       = encode_uuid(id);
    let expected_str = encode_status(expected);
    let new_str      = encode_status(new_status);
    let at_str       = encode_dt(at);

    // The status guard in the WHERE clause makes this a compare-and-set; the
    // transaction keeps the re-read consistent with the write.
    let raw: Option<RawRequest> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE data_requests
             SET status = ?1, last_updated_at = ?2
           WHERE id = ?3 AND status = ?4",
          rusqlite::params![new_str, at_str, id_str, expected_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!("SELECT {COLUMNS} FROM data_requests WHERE id = ?1"),
          rusqlite::params![id_str],
          RawRequest::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawRequest::into_request).transpose()
  }
}
