//! Error type for `rolodex-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The `tags` column did not hold a JSON array of strings.
  #[error("malformed tags column: {0}")]
  Tags(#[from] serde_json::Error),

  #[error("malformed contact id: {0}")]
  Id(#[from] uuid::Error),

  #[error("malformed created_at {value:?}: {reason}")]
  Timestamp { value: String, reason: String },

  #[error("database schema revision {found} is newer than supported revision {supported}")]
  SchemaTooNew { found: i64, supported: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
