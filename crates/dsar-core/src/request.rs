//! The data-subject request entity.
//!
//! Every field except `status` and `last_updated_at` is fixed at creation.
//! Status changes go through [`RequestService::update_status`](crate::RequestService::update_status).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::Status;

/// What the data subject is asking for.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
  Access,
  Delete,
  Correct,
}

/// One data-subject request, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequest {
  /// Store-assigned; never reused.
  pub id:              Uuid,
  pub request_type:    RequestType,
  pub requester_id:    String,
  pub notes:           Option<String>,
  pub status:          Status,
  /// Generated once at creation and never regenerated.
  pub summary:         String,
  pub created_at:      DateTime<Utc>,
  /// Refreshed on every accepted status transition.
  pub last_updated_at: DateTime<Utc>,
}

/// Input to [`RequestStore::save`](crate::store::RequestStore::save).
/// Everything but the id, which the store assigns.
#[derive(Debug, Clone)]
pub struct NewDataRequest {
  pub request_type:    RequestType,
  pub requester_id:    String,
  pub notes:           Option<String>,
  pub status:          Status,
  pub summary:         String,
  pub created_at:      DateTime<Utc>,
  pub last_updated_at: DateTime<Utc>,
}

impl NewDataRequest {
  /// Attach a store-assigned id.
  pub fn with_id(self, id: Uuid) -> DataRequest {
    DataRequest {
      id,
      request_type: self.request_type,
      requester_id: self.requester_id,
      notes: self.notes,
      status: self.status,
      summary: self.summary,
      created_at: self.created_at,
      last_updated_at: self.last_updated_at,
    }
  }
}

/// Caller-supplied input to [`RequestService::create`](crate::RequestService::create).
///
/// Required fields are optional here so that missing values surface as
/// [`Error::Validation`](crate::Error::Validation) rather than as a
/// deserialisation failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
  pub request_type: Option<RequestType>,
  pub requester_id: Option<String>,
  #[serde(default)]
  pub notes:        Option<String>,
}

impl CreateRequest {
  pub fn new(
    request_type: RequestType,
    requester_id: impl Into<String>,
    notes: Option<String>,
  ) -> Self {
    Self {
      request_type: Some(request_type),
      requester_id: Some(requester_id.into()),
      notes,
    }
  }
}
