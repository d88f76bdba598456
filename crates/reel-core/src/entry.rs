//! Tracking entries — a user's status, rating, and progress against one
//! catalog item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── WatchStatus ─────────────────────────────────────────────────────────────

/// Where an entry sits in the user's watch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
  Watching,
  Completed,
  Watchlist,
  Dropped,
}

impl WatchStatus {
  /// The discriminant string stored in the `status` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Watching => "watching",
      Self::Completed => "completed",
      Self::Watchlist => "watchlist",
      Self::Dropped => "dropped",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "watching" => Ok(Self::Watching),
      "completed" => Ok(Self::Completed),
      "watchlist" => Ok(Self::Watchlist),
      "dropped" => Ok(Self::Dropped),
      other => Err(Error::UnknownWatchStatus(other.to_owned())),
    }
  }
}

// ─── TrackingEntry ───────────────────────────────────────────────────────────

/// A user's relationship to one catalog item.
///
/// The store permits several entries against the same `item_id`; keeping one
/// entry per item is a caller contract, checked by callers (not the store)
/// before creating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEntry {
  /// Store-assigned on creation; monotonically increasing.
  pub id:              i64,
  /// References a [`CatalogItem`](crate::item::CatalogItem) id. Declared as
  /// a foreign key but without cascading rules.
  pub item_id:         String,
  pub status:          WatchStatus,
  /// Intended range 1–10. The store does not enforce this; validation is a
  /// caller responsibility.
  pub personal_rating: Option<u8>,
  pub review:          Option<String>,
  /// Free-form, e.g. an episode marker or a percentage.
  pub progress:        Option<String>,
  /// Set at creation by the caller; never changed afterward.
  pub date_added:      DateTime<Utc>,
  /// Caller-set, conventionally when `status` becomes
  /// [`WatchStatus::Completed`].
  pub date_completed:  Option<DateTime<Utc>>,
}

// ─── NewEntry ────────────────────────────────────────────────────────────────

/// Input to [`TrackerStore::create_entry`](crate::store::TrackerStore::create_entry).
/// The store assigns the id; `date_added` is supplied by the caller and is
/// not defaulted by the store.
#[derive(Debug, Clone)]
pub struct NewEntry {
  pub item_id:         String,
  pub status:          WatchStatus,
  pub personal_rating: Option<u8>,
  pub review:          Option<String>,
  pub progress:        Option<String>,
  pub date_added:      DateTime<Utc>,
  pub date_completed:  Option<DateTime<Utc>>,
}

impl NewEntry {
  /// Convenience constructor with all optional fields unset.
  pub fn new(
    item_id: impl Into<String>,
    status: WatchStatus,
    date_added: DateTime<Utc>,
  ) -> Self {
    Self {
      item_id:         item_id.into(),
      status,
      personal_rating: None,
      review:          None,
      progress:        None,
      date_added,
      date_completed:  None,
    }
  }
}

// ─── EntryPatch ──────────────────────────────────────────────────────────────

/// A partial update to a tracking entry.
///
/// Nullable columns use two levels of `Option`: the outer level says whether
/// the field participates in the update at all, the inner level is the value
/// written — so "leave untouched" and "overwrite with NULL" stay distinct.
/// `status` is a NOT NULL column and therefore single-level. `date_added`
/// is immutable and deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
  pub status:          Option<WatchStatus>,
  pub personal_rating: Option<Option<u8>>,
  pub review:          Option<Option<String>>,
  pub progress:        Option<Option<String>>,
  pub date_completed:  Option<Option<DateTime<Utc>>>,
}

impl EntryPatch {
  /// True when no field participates. An empty patch is a documented no-op:
  /// the store issues no statement for it.
  pub fn is_empty(&self) -> bool {
    self.status.is_none()
      && self.personal_rating.is_none()
      && self.review.is_none()
      && self.progress.is_none()
      && self.date_completed.is_none()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn watch_status_roundtrip() {
    for status in [
      WatchStatus::Watching,
      WatchStatus::Completed,
      WatchStatus::Watchlist,
      WatchStatus::Dropped,
    ] {
      assert_eq!(WatchStatus::parse(status.as_str()).unwrap(), status);
    }
  }

  #[test]
  fn watch_status_rejects_unknown() {
    let err = WatchStatus::parse("paused").unwrap_err();
    assert!(matches!(err, Error::UnknownWatchStatus(_)));
  }

  #[test]
  fn default_patch_is_empty() {
    assert!(EntryPatch::default().is_empty());
  }

  #[test]
  fn patch_with_explicit_null_is_not_empty() {
    let patch = EntryPatch { review: Some(None), ..Default::default() };
    assert!(!patch.is_empty());
  }
}
