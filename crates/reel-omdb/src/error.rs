//! Error type for `reel-omdb`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Network or protocol failure talking to the remote. Surfaced as-is;
  /// never retried.
  #[error("remote unavailable: {0}")]
  Transport(#[from] reqwest::Error),

  /// The remote answered with its error envelope. The message is preserved
  /// verbatim.
  #[error("remote rejected request: {0}")]
  Rejected(String),

  /// The detail endpoint does not recognise this external id.
  #[error("no title found for {id}: {message}")]
  NotFound { id: String, message: String },

  /// A success envelope missing fields the catalog requires, or carrying a
  /// title kind outside movie/series.
  #[error("unexpected payload from remote: {0}")]
  UnexpectedPayload(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
