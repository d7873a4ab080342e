//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use quill_core::form::FormErrors;
use serde::Serialize;
use thiserror::Error;

use crate::handlers::{found, login_url};

pub const FORBIDDEN_BODY: &str = "403 Forbidden";

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,
  #[error("forbidden")]
  Forbidden,
  /// Anonymous caller hit a page that needs a login; `next` is where to
  /// return afterwards.
  #[error("login required for {next}")]
  LoginRequired { next: String },
  /// A submitted form failed validation; the form is shown again.
  #[error("invalid form: {0}")]
  Invalid(FormErrors),
  #[error("password hashing failed: {0}")]
  PasswordHash(String),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  /// Map a core failure onto the HTTP taxonomy. `path` is the request path,
  /// used as the login `next` target.
  pub fn from_core(err: quill_core::Error, path: &str) -> Self {
    match err {
      quill_core::Error::NotFound { .. } => Error::NotFound,
      quill_core::Error::Forbidden => Error::Forbidden,
      quill_core::Error::Unauthenticated => {
        Error::LoginRequired { next: path.to_owned() }
      }
      quill_core::Error::Validation(errors) => Error::Invalid(errors),
      quill_core::Error::Store(e) => Error::Store(e),
    }
  }
}

impl From<quill_core::Error> for Error {
  fn from(err: quill_core::Error) -> Self { Self::from_core(err, "/") }
}

/// Body of a form re-render that has no page-specific context.
#[derive(Serialize)]
struct InvalidForm {
  errors: FormErrors,
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      Error::Forbidden => (StatusCode::FORBIDDEN, FORBIDDEN_BODY).into_response(),
      Error::LoginRequired { next } => found(&login_url(&next)),
      Error::Invalid(errors) => Json(InvalidForm { errors }).into_response(),
      Error::PasswordHash(msg) => {
        tracing::error!(error = %msg, "password hashing failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
    }
  }
}
