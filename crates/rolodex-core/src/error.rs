//! Error types for `rolodex-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Missing or malformed input; surfaced to API callers verbatim.
  #[error("{0}")]
  Validation(String),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
