//! Error type for `quill-store-sqlite`.

use quill_core::store::ConflictError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("cannot decode column: {0}")]
  Decode(String),

  /// A UNIQUE constraint rejected the write; holds the column name.
  #[error("unique constraint violated on {0}")]
  Conflict(String),
}

impl ConflictError for Error {
  fn conflicting_field(&self) -> Option<&str> {
    match self {
      Error::Conflict(field) => Some(field),
      _ => None,
    }
  }
}

/// Turn a UNIQUE violation into [`Error::Conflict`]; pass anything else
/// through as a database error.
pub(crate) fn classify(err: tokio_rusqlite::Error) -> Error {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(code, Some(msg))) = &err
    && code.code == rusqlite::ErrorCode::ConstraintViolation
    && let Some(columns) = msg.strip_prefix("UNIQUE constraint failed: ")
  {
    // e.g. "articles.slug" or "a.x, a.y"; report the first column.
    let first = columns.split(", ").next().unwrap_or(columns);
    let field = first.rsplit('.').next().unwrap_or(first);
    return Error::Conflict(field.to_owned());
  }
  Error::Database(err)
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
