//! Error types for `quill-core`.

use thiserror::Error;

use crate::form::FormErrors;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} not found: {key}")]
  NotFound { kind: &'static str, key: String },

  /// An authenticated identity tried to mutate something it does not own.
  #[error("forbidden")]
  Forbidden,

  #[error("authentication required")]
  Unauthenticated,

  #[error("invalid submission: {0}")]
  Validation(FormErrors),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
    Self::NotFound { kind, key: key.into() }
  }

  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
