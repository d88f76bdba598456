//! The `TrackerStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `reel-store-sqlite`).
//! Higher layers (the CLI, tests) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  entry::{EntryPatch, NewEntry, TrackingEntry, WatchStatus},
  item::CatalogItem,
  library::{LibraryRow, LibraryStats},
};

/// Abstraction over the tracker's durable store.
///
/// A store value in hand is always ready for use: backends run their schema
/// setup during construction, so there is no separate `init` step to forget.
/// Each method is its own atomic unit of work — no transaction ever spans
/// two calls, and the store never retries on failure.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait TrackerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Catalog items ─────────────────────────────────────────────────────

  /// Insert a catalog item, or fully replace the existing one sharing its
  /// `id`. Replacement covers every column: optionals that arrive as `None`
  /// are cleared, not preserved. Field contents are not validated here.
  fn upsert_item(
    &self,
    item: CatalogItem,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a catalog item by id. Returns `None` if not found.
  fn get_item<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<CatalogItem>, Self::Error>> + Send + 'a;

  // ── Tracking entries ──────────────────────────────────────────────────

  /// Insert a tracking entry and return the store-assigned id, strictly
  /// distinct from every id issued before it in this store's lifetime.
  ///
  /// No duplicate-`item_id` check happens here — creating a second entry
  /// for an item violates the caller contract, not the store.
  fn create_entry(
    &self,
    entry: NewEntry,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Apply the fields present in `patch`, leaving all others untouched.
  ///
  /// An empty patch issues no statement at all — not even a "not found"
  /// probe. A nonexistent `id` with a non-empty patch affects zero rows
  /// silently; callers that care must check existence themselves.
  fn update_entry(
    &self,
    id: i64,
    patch: EntryPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every tracking entry joined to its catalog item, optionally filtered
  /// by status, ordered by `date_added` descending with ties broken by
  /// insertion order. Entries whose `item_id` resolves to no item are
  /// silently excluded. The list is freshly computed on each call.
  fn list_entries(
    &self,
    status: Option<WatchStatus>,
  ) -> impl Future<Output = Result<Vec<LibraryRow>, Self::Error>> + Send + '_;

  /// The first entry tracking `item_id`, or `None`. If the caller contract
  /// has been violated and duplicates exist, which one comes back is
  /// unspecified.
  fn entry_for_item<'a>(
    &'a self,
    item_id: &'a str,
  ) -> impl Future<Output = Result<Option<TrackingEntry>, Self::Error>> + Send + 'a;

  /// Remove an entry. A no-op (not an error) if `id` does not exist.
  fn delete_entry(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Aggregate statistics over the joined library, computed in one pass.
  fn stats(
    &self,
  ) -> impl Future<Output = Result<LibraryStats, Self::Error>> + Send + '_;
}
