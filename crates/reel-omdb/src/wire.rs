//! Wire shapes for the OMDb envelopes and their interpretation into domain
//! types.
//!
//! Interpretation takes an already-deserialised envelope and performs no
//! I/O, so the success / error / zero-match cases are testable without a
//! network.

use reel_core::item::{CatalogItem, TitleKind};
use serde::Deserialize;

use crate::{Error, Result};

/// The remote's "field absent" placeholder.
const NOT_AVAILABLE: &str = "N/A";

/// `None` for the remote's `"N/A"` placeholder, the value otherwise.
fn scrub(value: Option<String>) -> Option<String> {
  value.filter(|v| v != NOT_AVAILABLE)
}

// ─── Envelopes ───────────────────────────────────────────────────────────────

/// Body of the search endpoint: a page of hits or an error message,
/// discriminated by the stringly-typed `Response` flag.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
  #[serde(rename = "Response")]
  pub response: String,
  #[serde(rename = "Search", default)]
  pub search:   Vec<RawHit>,
  #[serde(rename = "Error")]
  pub error:    Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawHit {
  #[serde(rename = "Title")]
  pub title:      String,
  #[serde(rename = "Year")]
  pub year:       String,
  #[serde(rename = "imdbID")]
  pub imdb_id:    String,
  #[serde(rename = "Type")]
  pub media_type: String,
  #[serde(rename = "Poster")]
  pub poster:     Option<String>,
}

/// Body of the detail endpoint: one flat metadata record, or the same error
/// envelope as search. Every field is optional here because the error shape
/// carries none of them; [`interpret_detail`] enforces what a success
/// payload must contain.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailEnvelope {
  #[serde(rename = "Response")]
  pub response:    String,
  #[serde(rename = "Error")]
  pub error:       Option<String>,
  #[serde(rename = "Title")]
  pub title:       Option<String>,
  #[serde(rename = "Year")]
  pub year:        Option<String>,
  #[serde(rename = "Type")]
  pub media_type:  Option<String>,
  #[serde(rename = "imdbID")]
  pub imdb_id:     Option<String>,
  #[serde(rename = "Poster")]
  pub poster:      Option<String>,
  #[serde(rename = "Plot")]
  pub plot:        Option<String>,
  #[serde(rename = "Genre")]
  pub genre:       Option<String>,
  #[serde(rename = "Director")]
  pub director:    Option<String>,
  #[serde(rename = "Actors")]
  pub actors:      Option<String>,
  #[serde(rename = "Runtime")]
  pub runtime:     Option<String>,
  #[serde(rename = "imdbRating")]
  pub imdb_rating: Option<String>,
}

// ─── Domain-facing shapes ────────────────────────────────────────────────────

/// One row of a search result page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
  pub external_id: String,
  pub title:       String,
  pub year:        String,
  pub kind:        TitleKind,
  /// As sent by the remote — may still carry the `"N/A"` placeholder. The
  /// conversion into [`CatalogItem`] scrubs it.
  pub poster_url:  Option<String>,
}

/// Full metadata for one external id, still unscrubbed.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedTitle {
  pub external_id:     String,
  pub title:           String,
  pub year:            String,
  pub kind:            TitleKind,
  pub poster_url:      Option<String>,
  pub plot:            Option<String>,
  pub genre:           Option<String>,
  pub director:        Option<String>,
  pub actors:          Option<String>,
  pub runtime:         Option<String>,
  pub external_rating: Option<String>,
}

// ─── Interpretation ──────────────────────────────────────────────────────────

pub(crate) fn interpret_search(env: SearchEnvelope) -> Result<Vec<SearchHit>> {
  if env.response != "True" {
    // The remote uses one envelope for "no results" and for real errors;
    // either way the message travels to the caller verbatim.
    return Err(Error::Rejected(
      env.error.unwrap_or_else(|| "unspecified remote error".into()),
    ));
  }

  let mut hits = Vec::with_capacity(env.search.len());
  for raw in env.search {
    match TitleKind::parse(&raw.media_type) {
      Ok(kind) => hits.push(SearchHit {
        external_id: raw.imdb_id,
        title:       raw.title,
        year:        raw.year,
        kind,
        poster_url:  raw.poster,
      }),
      // OMDb also returns games and standalone episodes; the catalog only
      // tracks movies and series.
      Err(_) => tracing::debug!(
        id = %raw.imdb_id,
        media_type = %raw.media_type,
        "skipping search hit of unsupported kind",
      ),
    }
  }
  Ok(hits)
}

pub(crate) fn interpret_detail(
  id: &str,
  env: DetailEnvelope,
) -> Result<DetailedTitle> {
  if env.response != "True" {
    return Err(Error::NotFound {
      id:      id.to_owned(),
      message: env.error.unwrap_or_else(|| "unknown id".into()),
    });
  }

  let title = env
    .title
    .ok_or_else(|| Error::UnexpectedPayload("detail record without Title".into()))?;
  let year = env
    .year
    .ok_or_else(|| Error::UnexpectedPayload("detail record without Year".into()))?;
  let kind = env
    .media_type
    .as_deref()
    .ok_or_else(|| Error::UnexpectedPayload("detail record without Type".into()))
    .and_then(|t| {
      TitleKind::parse(t).map_err(|e| Error::UnexpectedPayload(e.to_string()))
    })?;

  Ok(DetailedTitle {
    external_id: env.imdb_id.unwrap_or_else(|| id.to_owned()),
    title,
    year,
    kind,
    poster_url: env.poster,
    plot: env.plot,
    genre: env.genre,
    director: env.director,
    actors: env.actors,
    runtime: env.runtime,
    external_rating: env.imdb_rating,
  })
}

// ─── Mapping into the catalog ────────────────────────────────────────────────

impl From<&SearchHit> for CatalogItem {
  /// A partially-populated catalog item: search pages carry no plot, crew,
  /// or rating metadata.
  fn from(hit: &SearchHit) -> Self {
    let mut item = CatalogItem::new(
      hit.external_id.clone(),
      hit.title.clone(),
      hit.year.clone(),
      hit.kind,
    );
    item.external_id = Some(hit.external_id.clone());
    item.poster_url = scrub(hit.poster_url.clone());
    item
  }
}

impl From<&DetailedTitle> for CatalogItem {
  fn from(d: &DetailedTitle) -> Self {
    CatalogItem {
      id:              d.external_id.clone(),
      external_id:     Some(d.external_id.clone()),
      title:           d.title.clone(),
      release_year:    d.year.clone(),
      kind:            d.kind,
      poster_url:      scrub(d.poster_url.clone()),
      plot:            scrub(d.plot.clone()),
      genre:           scrub(d.genre.clone()),
      director:        scrub(d.director.clone()),
      actors:          scrub(d.actors.clone()),
      runtime:         scrub(d.runtime.clone()),
      external_rating: scrub(d.external_rating.clone()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn search_env(json: &str) -> SearchEnvelope {
    serde_json::from_str(json).expect("search envelope")
  }

  fn detail_env(json: &str) -> DetailEnvelope {
    serde_json::from_str(json).expect("detail envelope")
  }

  // ── Search envelope ───────────────────────────────────────────────────

  #[test]
  fn search_success_maps_hits() {
    let env = search_env(
      r#"{
        "Search": [
          {"Title":"Dune","Year":"2021","imdbID":"tt1160419","Type":"movie","Poster":"https://img/dune.jpg"},
          {"Title":"Dune","Year":"2000","imdbID":"tt0142032","Type":"series","Poster":"N/A"}
        ],
        "totalResults":"2",
        "Response":"True"
      }"#,
    );

    let hits = interpret_search(env).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].external_id, "tt1160419");
    assert_eq!(hits[0].kind, TitleKind::Movie);
    assert_eq!(hits[1].kind, TitleKind::Series);
  }

  #[test]
  fn search_success_without_hits_is_empty_not_error() {
    let env = search_env(r#"{"Response":"True","totalResults":"0"}"#);
    assert!(interpret_search(env).unwrap().is_empty());
  }

  #[test]
  fn search_error_envelope_preserves_message() {
    let env = search_env(r#"{"Response":"False","Error":"Movie not found!"}"#);
    let err = interpret_search(env).unwrap_err();
    let Error::Rejected(message) = err else {
      panic!("expected Rejected")
    };
    assert_eq!(message, "Movie not found!");
  }

  #[test]
  fn search_skips_unsupported_kinds() {
    let env = search_env(
      r#"{
        "Search": [
          {"Title":"Dune","Year":"2021","imdbID":"tt1160419","Type":"movie","Poster":"N/A"},
          {"Title":"Dune: Awakening","Year":"2025","imdbID":"tt14986406","Type":"game","Poster":"N/A"}
        ],
        "totalResults":"2",
        "Response":"True"
      }"#,
    );

    let hits = interpret_search(env).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].external_id, "tt1160419");
  }

  // ── Detail envelope ───────────────────────────────────────────────────

  #[test]
  fn detail_error_envelope_is_not_found() {
    let env = detail_env(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#);
    let err = interpret_detail("tt0000000", env).unwrap_err();
    let Error::NotFound { id, message } = err else {
      panic!("expected NotFound")
    };
    assert_eq!(id, "tt0000000");
    assert_eq!(message, "Incorrect IMDb ID.");
  }

  #[test]
  fn detail_success_maps_record() {
    let env = detail_env(
      r#"{
        "Title":"Dune","Year":"2021","Runtime":"155 min","Genre":"Sci-Fi",
        "Director":"Denis Villeneuve","Actors":"Timothée Chalamet",
        "Plot":"Paul Atreides travels to Arrakis.","Poster":"https://img/dune.jpg",
        "imdbRating":"8.0","imdbID":"tt1160419","Type":"movie","Response":"True"
      }"#,
    );

    let detail = interpret_detail("tt1160419", env).unwrap();
    assert_eq!(detail.title, "Dune");
    assert_eq!(detail.kind, TitleKind::Movie);
    assert_eq!(detail.runtime.as_deref(), Some("155 min"));
  }

  // ── N/A scrubbing ─────────────────────────────────────────────────────

  #[test]
  fn detail_mapping_scrubs_placeholder_fields() {
    let env = detail_env(
      r#"{
        "Title":"Obscure Film","Year":"1999","Runtime":"N/A","Genre":"N/A",
        "Director":"N/A","Actors":"N/A","Plot":"N/A","Poster":"N/A",
        "imdbRating":"N/A","imdbID":"tt9999999","Type":"movie","Response":"True"
      }"#,
    );

    let item = CatalogItem::from(&interpret_detail("tt9999999", env).unwrap());
    assert_eq!(item.id, "tt9999999");
    assert_eq!(item.external_id.as_deref(), Some("tt9999999"));
    assert!(item.genre.is_none());
    assert!(item.poster_url.is_none());
    assert!(item.plot.is_none());
    assert!(item.director.is_none());
    assert!(item.actors.is_none());
    assert!(item.runtime.is_none());
    assert!(item.external_rating.is_none());
  }

  #[test]
  fn search_hit_mapping_scrubs_poster() {
    let hit = SearchHit {
      external_id: "tt0142032".into(),
      title:       "Dune".into(),
      year:        "2000".into(),
      kind:        TitleKind::Series,
      poster_url:  Some("N/A".into()),
    };

    let item = CatalogItem::from(&hit);
    assert_eq!(item.id, "tt0142032");
    assert_eq!(item.kind, TitleKind::Series);
    assert!(item.poster_url.is_none());
    assert!(item.plot.is_none());
  }

  #[test]
  fn scrub_keeps_real_values() {
    assert_eq!(scrub(Some("8.0".into())).as_deref(), Some("8.0"));
    assert_eq!(scrub(Some("N/A".into())), None);
    assert_eq!(scrub(None), None);
  }
}
