//! Error type for `wall-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown wall item kind: {0:?}")]
  UnknownKind(String),

  #[error("unknown privacy level: {0:?}")]
  UnknownPrivacyLevel(String),

  /// A person cannot be their own connection.
  #[error("cannot connect {0} to themselves")]
  SelfConnection(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
