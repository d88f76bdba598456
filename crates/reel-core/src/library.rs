//! Read models computed from the join of entries and items — never stored,
//! always derived.

use serde::{Deserialize, Serialize};

use crate::{entry::TrackingEntry, item::CatalogItem};

/// One row of the joined library listing: a tracking entry together with the
/// catalog item it references. Entries whose `item_id` does not resolve to
/// an item never appear in this shape (inner join).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryRow {
  pub entry: TrackingEntry,
  pub item:  CatalogItem,
}

/// Aggregate statistics over the joined library.
///
/// All six fields come from a single query so they are mutually consistent.
/// The counts are per *entry*, not per distinct item — under the
/// one-entry-per-item caller contract the two coincide. `Dropped` entries
/// are counted in neither status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LibraryStats {
  /// Entries whose joined item is a [`TitleKind::Movie`](crate::item::TitleKind).
  pub total_movies:   u32,
  /// Entries whose joined item is a [`TitleKind::Series`](crate::item::TitleKind).
  pub total_shows:    u32,
  pub completed:      u32,
  pub watching:       u32,
  pub watchlist:      u32,
  /// Mean of the personal ratings that are set; `0.0` when none are.
  pub average_rating: f64,
}
