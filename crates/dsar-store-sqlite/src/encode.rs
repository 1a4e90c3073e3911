//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase strings, and
//! enums their SCREAMING_SNAKE_CASE wire names.

use chrono::{DateTime, Utc};
use dsar_core::{DataRequest, RequestType, Status};
use uuid::Uuid;

use crate::{Error, Result};

/// Column list shared by every `SELECT` so [`RawRequest::from_row`] can read
/// by position.
pub const COLUMNS: &str = "id, request_type, requester_id, notes, status, \
                           summary, created_at, last_updated_at";

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_status(s: Status) -> &'static str { s.into() }

pub fn decode_status(s: &str) -> Result<Status> {
  s.parse().map_err(|_| Error::UnknownVariant {
    column: "status",
    value:  s.to_owned(),
  })
}

pub fn encode_request_type(t: RequestType) -> &'static str { t.into() }

pub fn decode_request_type(s: &str) -> Result<RequestType> {
  s.parse().map_err(|_| Error::UnknownVariant {
    column: "request_type",
    value:  s.to_owned(),
  })
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `data_requests` row.
pub struct RawRequest {
  pub id:              String,
  pub request_type:    String,
  pub requester_id:    String,
  pub notes:           Option<String>,
  pub status:          String,
  pub summary:         String,
  pub created_at:      String,
  pub last_updated_at: String,
}

impl RawRequest {
  /// Read a row selected with [`COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      request_type:    row.get(1)?,
      requester_id:    row.get(2)?,
      notes:           row.get(3)?,
      status:          row.get(4)?,
      summary:         row.get(5)?,
      created_at:      row.get(6)?,
      last_updated_at: row.get(7)?,
    })
  }

  pub fn into_request(self) -> Result<DataRequest> {
    Ok(DataRequest {
      id:              decode_uuid(&self.id)?,
      request_type:    decode_request_type(&self.request_type)?,
      requester_id:    self.requester_id,
      notes:           self.notes,
      status:          decode_status(&self.status)?,
      summary:         self.summary,
      created_at:      decode_dt(&self.created_at)?,
      last_updated_at: decode_dt(&self.last_updated_at)?,
    })
  }
}
