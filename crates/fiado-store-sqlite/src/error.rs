//! Error type for `fiado-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A ledger-rule violation or not-found, in the core taxonomy.
  #[error("{0}")]
  Core(#[from] fiado_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The deletion snapshot could not be written; the purge was aborted.
  #[error("backup write failed: {0}")]
  Backup(#[source] std::io::Error),
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self { Self::Database(e.into()) }
}

/// Collapse into the core taxonomy so backend-agnostic layers (the API) can
/// map errors without knowing this crate.
impl From<Error> for fiado_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(core) => core,
      Error::Json(e) => Self::Serialization(e),
      Error::Backup(e) => Self::BackupWrite(e.to_string()),
      other => Self::Storage(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
