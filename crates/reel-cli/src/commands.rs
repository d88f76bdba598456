//! Subcommand implementations.
//!
//! Everything here composes the [`TrackerStore`] trait and the lookup
//! client; no SQL or HTTP lives at this layer.

use anyhow::{Result, bail};
use chrono::Utc;
use reel_core::{
  entry::{EntryPatch, NewEntry, WatchStatus},
  item::{CatalogItem, TitleKind},
  library::LibraryRow,
  store::TrackerStore,
};
use reel_omdb::OmdbClient;
use uuid::Uuid;

// ─── Remote lookup ────────────────────────────────────────────────────────────

pub async fn search(client: &OmdbClient, query: &str) -> Result<()> {
  let hits = client.search(query).await?;
  if hits.is_empty() {
    println!("no matches");
    return Ok(());
  }

  for hit in hits {
    println!(
      "{:<12} {:<7} {:<10} {}",
      hit.external_id,
      hit.kind.as_str(),
      hit.year,
      hit.title,
    );
  }
  Ok(())
}

// ─── Adding titles ────────────────────────────────────────────────────────────

pub async fn add<S>(
  store: &S,
  client: &OmdbClient,
  id: &str,
  status: WatchStatus,
) -> Result<()>
where
  S: TrackerStore,
{
  // One entry per item is a caller contract, and this is the caller: check
  // before creating, since the store itself accepts duplicates.
  if let Some(existing) = store.entry_for_item(id).await? {
    bail!(
      "already tracking this title (entry #{}, {})",
      existing.id,
      existing.status.as_str(),
    );
  }

  let details = client.fetch_details(id).await?;
  let item = CatalogItem::from(&details);
  let title = item.title.clone();
  let item_id = item.id.clone();
  store.upsert_item(item).await?;

  let entry_id = store.create_entry(new_entry(item_id, status)).await?;
  println!("added \"{title}\" as entry #{entry_id} ({})", status.as_str());
  Ok(())
}

pub async fn add_manual<S>(
  store: &S,
  title: String,
  year: String,
  kind: TitleKind,
  status: WatchStatus,
) -> Result<()>
where
  S: TrackerStore,
{
  // Hand-entered titles get a local token outside the external id namespace.
  let id = format!("custom-{}", Uuid::new_v4());
  store
    .upsert_item(CatalogItem::new(id.clone(), title.clone(), year, kind))
    .await?;

  let entry_id = store.create_entry(new_entry(id, status)).await?;
  println!("added \"{title}\" as entry #{entry_id} ({})", status.as_str());
  Ok(())
}

/// `date_added` is always the caller's clock. Starting out as completed also
/// stamps the completion date, mirroring the update flow.
fn new_entry(item_id: String, status: WatchStatus) -> NewEntry {
  let now = Utc::now();
  let mut entry = NewEntry::new(item_id, status, now);
  if status == WatchStatus::Completed {
    entry.date_completed = Some(now);
  }
  entry
}

// ─── Library views ────────────────────────────────────────────────────────────

pub async fn list<S>(store: &S, status: Option<WatchStatus>) -> Result<()>
where
  S: TrackerStore,
{
  let rows = store.list_entries(status).await?;
  if rows.is_empty() {
    println!("library is empty");
    return Ok(());
  }

  for row in &rows {
    println!("{}", render_row(row));
  }
  Ok(())
}

fn render_row(row: &LibraryRow) -> String {
  let mut line = format!(
    "#{:<5} {:<9} {:<6} {} ({})",
    row.entry.id,
    row.entry.status.as_str(),
    row.item.kind.as_str(),
    row.item.title,
    row.item.release_year,
  );
  if let Some(rating) = row.entry.personal_rating {
    line.push_str(&format!("  {rating}/10"));
  }
  if let Some(progress) = &row.entry.progress {
    line.push_str(&format!("  [{progress}]"));
  }
  line
}

pub async fn stats<S>(store: &S) -> Result<()>
where
  S: TrackerStore,
{
  let stats = store.stats().await?;
  println!("movies     {}", stats.total_movies);
  println!("shows      {}", stats.total_shows);
  println!("completed  {}", stats.completed);
  println!("watching   {}", stats.watching);
  println!("watchlist  {}", stats.watchlist);
  if stats.average_rating > 0.0 {
    println!("avg rating {:.1}/10", stats.average_rating);
  }
  Ok(())
}

// ─── Mutations ────────────────────────────────────────────────────────────────

/// Translate the update flags into an [`EntryPatch`]. A `--clear-*` flag
/// binds an explicit NULL; leaving both the set and clear flag off keeps the
/// field untouched.
#[allow(clippy::too_many_arguments)]
pub fn build_patch(
  status: Option<WatchStatus>,
  rating: Option<u8>,
  review: Option<String>,
  progress: Option<String>,
  clear_rating: bool,
  clear_review: bool,
  clear_progress: bool,
) -> EntryPatch {
  EntryPatch {
    status,
    personal_rating: match (rating, clear_rating) {
      (Some(r), _) => Some(Some(r)),
      (None, true) => Some(None),
      (None, false) => None,
    },
    review: match (review, clear_review) {
      (Some(r), _) => Some(Some(r)),
      (None, true) => Some(None),
      (None, false) => None,
    },
    progress: match (progress, clear_progress) {
      (Some(p), _) => Some(Some(p)),
      (None, true) => Some(None),
      (None, false) => None,
    },
    // The completion date is a caller convention, not store logic: marking
    // an entry completed stamps it here.
    date_completed: if status == Some(WatchStatus::Completed) {
      Some(Some(Utc::now()))
    } else {
      None
    },
  }
}

pub async fn update<S>(store: &S, id: i64, patch: EntryPatch) -> Result<()>
where
  S: TrackerStore,
{
  if patch.is_empty() {
    println!("nothing to change");
    return Ok(());
  }

  store.update_entry(id, patch).await?;
  println!("updated entry #{id}");
  Ok(())
}

pub async fn remove<S>(store: &S, id: i64) -> Result<()>
where
  S: TrackerStore,
{
  store.delete_entry(id).await?;
  println!("removed entry #{id}");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_flags_build_an_empty_patch() {
    let patch = build_patch(None, None, None, None, false, false, false);
    assert!(patch.is_empty());
  }

  #[test]
  fn clear_flags_bind_explicit_nulls() {
    let patch = build_patch(None, None, None, None, true, true, true);
    assert_eq!(patch.personal_rating, Some(None));
    assert_eq!(patch.review, Some(None));
    assert_eq!(patch.progress, Some(None));
    assert!(patch.status.is_none());
    assert!(patch.date_completed.is_none());
  }

  #[test]
  fn completing_stamps_the_completion_date() {
    let patch =
      build_patch(Some(WatchStatus::Completed), None, None, None, false, false, false);
    assert_eq!(patch.status, Some(WatchStatus::Completed));
    assert!(matches!(patch.date_completed, Some(Some(_))));
  }

  #[test]
  fn other_statuses_leave_completion_date_alone() {
    let patch =
      build_patch(Some(WatchStatus::Watching), None, None, None, false, false, false);
    assert!(patch.date_completed.is_none());
  }
}
