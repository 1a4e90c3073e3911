//! Request status and the transition table that governs it.
//!
//! Statuses only move forward. `Completed` and `Rejected` are terminal; every
//! pair not listed in [`allowed_transitions`] is denied, including
//! self-transitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// The lifecycle status of a [`DataRequest`](crate::DataRequest).
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
pub enum Status {
  Received,
  InReview,
  Completed,
  Rejected,
}

impl Status {
  /// The status every new request starts in.
  pub const INITIAL: Status = Status::Received;

  /// `true` for statuses with no outgoing edges.
  pub fn is_terminal(self) -> bool { allowed_transitions(self).is_empty() }
}

/// Outgoing edges of `from`.
pub fn allowed_transitions(from: Status) -> &'static [Status] {
  match from {
    Status::Received => &[Status::InReview, Status::Rejected],
    Status::InReview => &[Status::Completed, Status::Rejected],
    Status::Completed | Status::Rejected => &[],
  }
}

/// Whether `from -> to` is a legal edge. Pure and total over all pairs.
pub fn can_transition(from: Status, to: Status) -> bool {
  allowed_transitions(from).contains(&to)
}

/// Like [`can_transition`], but returns [`Error::InvalidTransition`] for an
/// illegal edge.
pub fn check_transition(from: Status, to: Status) -> Result<()> {
  if can_transition(from, to) {
    Ok(())
  } else {
    Err(Error::InvalidTransition { from, to })
  }
}
