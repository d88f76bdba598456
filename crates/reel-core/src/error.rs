//! Error types for `reel-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown title kind: {0:?}")]
  UnknownTitleKind(String),

  #[error("unknown watch status: {0:?}")]
  UnknownWatchStatus(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
