//! [`SqliteStore`] — the SQLite implementation of [`TrackerStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, params_from_iter, types::Value};

use reel_core::{
  entry::{EntryPatch, NewEntry, TrackingEntry, WatchStatus},
  item::CatalogItem,
  library::{LibraryRow, LibraryStats},
  store::TrackerStore,
};

use crate::{
  Error, Result,
  encode::{RawEntry, RawItem, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tracker store backed by a single SQLite file.
///
/// Construction doubles as initialisation: `open` runs the idempotent schema
/// DDL before returning, so a `SqliteStore` value in hand is always ready.
/// Cloning is cheap — the inner connection is reference-counted.
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

  /// Open an in-memory store — useful for testing.
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
}

// ─── TrackerStore impl ───────────────────────────────────────────────────────

const ITEM_COLS: &str = "id, external_id, title, release_year, kind, \
   poster_url, plot, genre, director, actors, runtime, external_rating";

const ENTRY_COLS: &str = "id, item_id, status, personal_rating, review, \
   progress, date_added, date_completed";

impl TrackerStore for SqliteStore {
  type Error = Error;

  // ── Catalog items ─────────────────────────────────────────────────────────

  async fn upsert_item(&self, item: CatalogItem) -> Result<()> {
    let kind_str       = item.kind.as_str().to_owned();
    let CatalogItem {
      id,
      external_id,
      title,
      release_year,
      poster_url,
      plot,
      genre,
      director,
      actors,
      runtime,
      external_rating,
      ..
    } = item;

    self
      .conn
      .call(move |conn| {
        // Upsert keyed on `id` only. A colliding `external_id` on a
        // different row is a UNIQUE violation surfaced to the caller, not a
        // second replacement key.
        conn.execute(
          "INSERT INTO items (
             id, external_id, title, release_year, kind, poster_url,
             plot, genre, director, actors, runtime, external_rating
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
           ON CONFLICT(id) DO UPDATE SET
             external_id     = excluded.external_id,
             title           = excluded.title,
             release_year    = excluded.release_year,
             kind            = excluded.kind,
             poster_url      = excluded.poster_url,
             plot            = excluded.plot,
             genre           = excluded.genre,
             director        = excluded.director,
             actors          = excluded.actors,
             runtime         = excluded.runtime,
             external_rating = excluded.external_rating",
          rusqlite::params![
            id,
            external_id,
            title,
            release_year,
            kind_str,
            poster_url,
            plot,
            genre,
            director,
            actors,
            runtime,
            external_rating,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_item(&self, id: &str) -> Result<Option<CatalogItem>> {
    let id_owned = id.to_owned();

    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ITEM_COLS} FROM items WHERE id = ?1"),
              rusqlite::params![id_owned],
              |row| RawItem::from_row(row, 0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  // ── Tracking entries ──────────────────────────────────────────────────────

  async fn create_entry(&self, entry: NewEntry) -> Result<i64> {
    let status_str     = entry.status.as_str().to_owned();
    let date_added_str = encode_dt(entry.date_added);
    let date_done_str  = entry.date_completed.map(encode_dt);
    let NewEntry { item_id, personal_rating, review, progress, .. } = entry;

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO entries (
             item_id, status, personal_rating, review, progress,
             date_added, date_completed
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            item_id,
            status_str,
            personal_rating,
            review,
            progress,
            date_added_str,
            date_done_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn update_entry(&self, id: i64, patch: EntryPatch) -> Result<()> {
    // Documented no-op: an empty patch issues no statement at all.
    if patch.is_empty() {
      return Ok(());
    }

    // Assemble the SET list from whichever fields are present. The outer
    // option decides participation; an inner `None` binds SQL NULL.
    let mut sets: Vec<&'static str> = Vec::new();
    let mut binds: Vec<Value>       = Vec::new();

    if let Some(status) = patch.status {
      sets.push("status = ?");
      binds.push(Value::Text(status.as_str().to_owned()));
    }
    if let Some(rating) = patch.personal_rating {
      sets.push("personal_rating = ?");
      binds.push(match rating {
        Some(r) => Value::Integer(i64::from(r)),
        None => Value::Null,
      });
    }
    if let Some(review) = patch.review {
      sets.push("review = ?");
      binds.push(review.map_or(Value::Null, Value::Text));
    }
    if let Some(progress) = patch.progress {
      sets.push("progress = ?");
      binds.push(progress.map_or(Value::Null, Value::Text));
    }
    if let Some(done) = patch.date_completed {
      sets.push("date_completed = ?");
      binds.push(match done {
        Some(dt) => Value::Text(encode_dt(dt)),
        None => Value::Null,
      });
    }

    binds.push(Value::Integer(id));

    self
      .conn
      .call(move |conn| {
        // A nonexistent id matches zero rows; that is not an error here.
        conn.execute(
          &format!("UPDATE entries SET {} WHERE id = ?", sets.join(", ")),
          params_from_iter(binds),
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_entries(
    &self,
    status: Option<WatchStatus>,
  ) -> Result<Vec<LibraryRow>> {
    let status_str = status.map(WatchStatus::as_str).map(str::to_owned);

    let raws: Vec<(RawEntry, RawItem)> = self
      .conn
      .call(move |conn| {
        let filter = if status_str.is_some() { "WHERE e.status = ?1" } else { "" };
        // Ties on date_added fall back to id, i.e. insertion order.
        let sql = format!(
          "SELECT
             e.id, e.item_id, e.status, e.personal_rating, e.review,
             e.progress, e.date_added, e.date_completed,
             i.id, i.external_id, i.title, i.release_year, i.kind,
             i.poster_url, i.plot, i.genre, i.director, i.actors,
             i.runtime, i.external_rating
           FROM entries e
           JOIN items i ON i.id = e.item_id
           {filter}
           ORDER BY e.date_added DESC, e.id ASC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let map_row = |row: &rusqlite::Row<'_>| {
          Ok((RawEntry::from_row(row, 0)?, RawItem::from_row(row, 8)?))
        };

        let rows = if let Some(s) = status_str {
          stmt
            .query_map(rusqlite::params![s], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          stmt
            .query_map([], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(entry, item)| {
        Ok(LibraryRow {
          entry: entry.into_entry()?,
          item:  item.into_item()?,
        })
      })
      .collect()
  }

  async fn entry_for_item(&self, item_id: &str) -> Result<Option<TrackingEntry>> {
    let item_id_owned = item_id.to_owned();

    let raw: Option<RawEntry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ENTRY_COLS} FROM entries WHERE item_id = ?1 LIMIT 1"
              ),
              rusqlite::params![item_id_owned],
              |row| RawEntry::from_row(row, 0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEntry::into_entry).transpose()
  }

  async fn delete_entry(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        // Zero affected rows is fine: deleting a missing entry is a no-op.
        conn.execute("DELETE FROM entries WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn stats(&self) -> Result<LibraryStats> {
    let stats: LibraryStats = self
      .conn
      .call(|conn| {
        // One pass over the join so the six fields are mutually consistent.
        // `dropped` entries count in neither status bucket.
        conn.query_row(
          "SELECT
             COUNT(CASE WHEN i.kind = 'movie' THEN 1 END),
             COUNT(CASE WHEN i.kind = 'series' THEN 1 END),
             COUNT(CASE WHEN e.status = 'completed' THEN 1 END),
             COUNT(CASE WHEN e.status = 'watching' THEN 1 END),
             COUNT(CASE WHEN e.status = 'watchlist' THEN 1 END),
             IFNULL(AVG(e.personal_rating), 0.0)
           FROM entries e
           JOIN items i ON i.id = e.item_id",
          [],
          |row| {
            Ok(LibraryStats {
              total_movies:   row.get(0)?,
              total_shows:    row.get(1)?,
              completed:      row.get(2)?,
              watching:       row.get(3)?,
              watchlist:      row.get(4)?,
              average_rating: row.get(5)?,
            })
          },
        )
        .map_err(Into::into)
      })
      .await?;

    Ok(stats)
  }
}
