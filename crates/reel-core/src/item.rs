//! Catalog items — titles with descriptive metadata, independent of any
//! user's tracking state.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── TitleKind ───────────────────────────────────────────────────────────────

/// Whether a catalog item is a film or an episodic series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
  Movie,
  Series,
}

impl TitleKind {
  /// The discriminant string stored in the `kind` column. Matches the
  /// remote catalog's `Type` field values.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Movie => "movie",
      Self::Series => "series",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "movie" => Ok(Self::Movie),
      "series" => Ok(Self::Series),
      other => Err(Error::UnknownTitleKind(other.to_owned())),
    }
  }
}

// ─── CatalogItem ─────────────────────────────────────────────────────────────

/// A cataloged title.
///
/// Items are written wholesale: an upsert with an existing `id` replaces
/// every field, including clearing optionals that arrive as `None`. They are
/// never partially updated and never deleted — only tracking entries are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
  /// Primary key. Items sourced from search reuse the external id; manually
  /// entered items carry a locally generated token.
  pub id:              String,
  /// External catalog identifier (IMDb-style). Unique across items when set.
  pub external_id:     Option<String>,
  pub title:           String,
  /// Free-form text so series runs like `"2015–2019"` survive untouched.
  pub release_year:    String,
  pub kind:            TitleKind,
  pub poster_url:      Option<String>,
  pub plot:            Option<String>,
  pub genre:           Option<String>,
  pub director:        Option<String>,
  pub actors:          Option<String>,
  pub runtime:         Option<String>,
  /// The remote catalog's own score (e.g. an IMDb rating), kept as text.
  pub external_rating: Option<String>,
}

impl CatalogItem {
  /// A bare item with only the required fields set.
  pub fn new(
    id: impl Into<String>,
    title: impl Into<String>,
    release_year: impl Into<String>,
    kind: TitleKind,
  ) -> Self {
    Self {
      id:              id.into(),
      external_id:     None,
      title:           title.into(),
      release_year:    release_year.into(),
      kind,
      poster_url:      None,
      plot:            None,
      genre:           None,
      director:        None,
      actors:          None,
      runtime:         None,
      external_rating: None,
    }
  }
}
