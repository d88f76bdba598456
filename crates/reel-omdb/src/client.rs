//! [`OmdbClient`] — the HTTP half of the lookup client.

use std::time::Duration;

use crate::{
  Result,
  wire::{DetailEnvelope, DetailedTitle, SearchEnvelope, SearchHit,
         interpret_detail, interpret_search},
};

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Async HTTP client for the OMDb API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. Every call
/// is a single attempt with the client's built-in 30 s timeout; callers that
/// need tighter responsiveness impose their own deadline around the call.
#[derive(Clone)]
pub struct OmdbClient {
  client:   reqwest::Client,
  base_url: String,
  api_key:  String,
}

impl OmdbClient {
  pub fn new(api_key: impl Into<String>) -> Result<Self> {
    Self::with_base_url(api_key, DEFAULT_BASE_URL)
  }

  /// Point the client at a non-default endpoint (proxies, test servers).
  pub fn with_base_url(
    api_key: impl Into<String>,
    base_url: impl Into<String>,
  ) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self {
      client,
      base_url: base_url.into(),
      api_key: api_key.into(),
    })
  }

  /// Free-text title search.
  ///
  /// A success envelope with zero matches is `Ok(vec![])`; the remote's
  /// error envelope becomes [`Error::Rejected`](crate::Error::Rejected) with
  /// the message intact. A blank query is answered locally with zero
  /// matches and never reaches the remote.
  pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
    if query.trim().is_empty() {
      return Ok(Vec::new());
    }

    tracing::debug!(%query, "searching remote catalog");

    let env: SearchEnvelope = self
      .client
      .get(&self.base_url)
      .query(&[("apikey", self.api_key.as_str()), ("s", query)])
      .send()
      .await?
      .json()
      .await?;

    interpret_search(env)
  }

  /// Full metadata for one external id.
  ///
  /// The remote's error envelope here means the id is unknown:
  /// [`Error::NotFound`](crate::Error::NotFound).
  pub async fn fetch_details(&self, external_id: &str) -> Result<DetailedTitle> {
    tracing::debug!(id = %external_id, "fetching remote details");

    let env: DetailEnvelope = self
      .client
      .get(&self.base_url)
      .query(&[
        ("apikey", self.api_key.as_str()),
        ("i", external_id),
        ("plot", "full"),
      ])
      .send()
      .await?
      .json()
      .await?;

    interpret_detail(external_id, env)
  }
}
