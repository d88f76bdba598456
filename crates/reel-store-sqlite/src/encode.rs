//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings (always UTC, so lexicographic
//! order on the column is chronological order). Enums are stored as their
//! discriminant strings.

use chrono::{DateTime, Utc};
use reel_core::{
  entry::{TrackingEntry, WatchStatus},
  item::{CatalogItem, TitleKind},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `items` row.
pub struct RawItem {
  pub id:              String,
  pub external_id:     Option<String>,
  pub title:           String,
  pub release_year:    String,
  pub kind:            String,
  pub poster_url:      Option<String>,
  pub plot:            Option<String>,
  pub genre:           Option<String>,
  pub director:        Option<String>,
  pub actors:          Option<String>,
  pub runtime:         Option<String>,
  pub external_rating: Option<String>,
}

impl RawItem {
  /// Read the twelve item columns starting at `offset` within `row`.
  pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(offset)?,
      external_id:     row.get(offset + 1)?,
      title:           row.get(offset + 2)?,
      release_year:    row.get(offset + 3)?,
      kind:            row.get(offset + 4)?,
      poster_url:      row.get(offset + 5)?,
      plot:            row.get(offset + 6)?,
      genre:           row.get(offset + 7)?,
      director:        row.get(offset + 8)?,
      actors:          row.get(offset + 9)?,
      runtime:         row.get(offset + 10)?,
      external_rating: row.get(offset + 11)?,
    })
  }

  pub fn into_item(self) -> Result<CatalogItem> {
    Ok(CatalogItem {
      id:              self.id,
      external_id:     self.external_id,
      title:           self.title,
      release_year:    self.release_year,
      kind:            TitleKind::parse(&self.kind).map_err(Error::Core)?,
      poster_url:      self.poster_url,
      plot:            self.plot,
      genre:           self.genre,
      director:        self.director,
      actors:          self.actors,
      runtime:         self.runtime,
      external_rating: self.external_rating,
    })
  }
}

/// Raw values read directly from an `entries` row.
pub struct RawEntry {
  pub id:              i64,
  pub item_id:         String,
  pub status:          String,
  pub personal_rating: Option<u8>,
  pub review:          Option<String>,
  pub progress:        Option<String>,
  pub date_added:      String,
  pub date_completed:  Option<String>,
}

impl RawEntry {
  /// Read the eight entry columns starting at `offset` within `row`.
  pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(offset)?,
      item_id:         row.get(offset + 1)?,
      status:          row.get(offset + 2)?,
      personal_rating: row.get(offset + 3)?,
      review:          row.get(offset + 4)?,
      progress:        row.get(offset + 5)?,
      date_added:      row.get(offset + 6)?,
      date_completed:  row.get(offset + 7)?,
    })
  }

  pub fn into_entry(self) -> Result<TrackingEntry> {
    Ok(TrackingEntry {
      id:              self.id,
      item_id:         self.item_id,
      status:          WatchStatus::parse(&self.status).map_err(Error::Core)?,
      personal_rating: self.personal_rating,
      review:          self.review,
      progress:        self.progress,
      date_added:      decode_dt(&self.date_added)?,
      date_completed:  self.date_completed.as_deref().map(decode_dt).transpose()?,
    })
  }
}
