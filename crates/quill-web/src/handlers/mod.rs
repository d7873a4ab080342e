pub mod accounts;
pub mod articles;
pub mod categories;
pub mod listing;

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use quill_core::form::{FieldSpec, FormErrors, FormValues, field_names};
use serde::Serialize;

pub const LOGIN_PATH: &str = "/accounts/login/";

/// Characters left readable in a `next` query value; everything else is
/// percent-encoded.
const NEXT_VALUE: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'/')
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'~');

/// A `302 Found` pointing at `location`.
pub(crate) fn found(location: &str) -> Response {
  match HeaderValue::from_str(location) {
    Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
    Err(_) => (StatusCode::BAD_REQUEST, "invalid redirect target").into_response(),
  }
}

/// The login route with `next` pointing back at `path`.
pub fn login_url(path: &str) -> String {
  format!("{LOGIN_PATH}?next={}", utf8_percent_encode(path, NEXT_VALUE))
}

/// Accept only same-site absolute paths as redirect targets. Browsers read
/// `\` as `/`, so any backslash is refused along with control characters.
pub(crate) fn safe_next(next: Option<&str>) -> &str {
  match next {
    Some(n)
      if n.starts_with('/')
        && !n.starts_with("//")
        && !n.contains('\\')
        && !n.chars().any(|c| c.is_ascii_control()) =>
    {
      n
    }
    _ => "/",
  }
}

/// A one-shot notice shown alongside a re-rendered form.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
  pub level: &'static str,
  pub text:  String,
}

/// The common body of every form page: which fields exist, what was
/// submitted, and what went wrong.
#[derive(Debug, Clone, Serialize)]
pub struct FormPage {
  pub fields:   Vec<&'static str>,
  pub values:   FormValues,
  pub errors:   FormErrors,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub messages: Vec<Message>,
}

impl FormPage {
  pub fn blank(schema: &[FieldSpec]) -> Self {
    Self::with_errors(schema, FormValues::new(), FormErrors::new())
  }

  /// Echo `values` back (never passwords) together with `errors`.
  pub fn with_errors(schema: &[FieldSpec], mut values: FormValues, errors: FormErrors) -> Self {
    values.retain(|k, _| !k.starts_with("password"));
    Self { fields: field_names(schema), values, errors, messages: Vec::new() }
  }

  pub fn message(mut self, level: &'static str, text: impl Into<String>) -> Self {
    self.messages.push(Message { level, text: text.into() });
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn login_url_keeps_path_readable() {
    assert_eq!(login_url("/article-new/"), "/accounts/login/?next=/article-new/");
    assert_eq!(login_url("/a b?c"), "/accounts/login/?next=/a%20b%3Fc");
  }

  #[test]
  fn safe_next_rejects_offsite_targets() {
    assert_eq!(safe_next(Some("/article-new/")), "/article-new/");
    assert_eq!(safe_next(Some("//evil.example")), "/");
    assert_eq!(safe_next(Some("https://evil.example")), "/");
    assert_eq!(safe_next(Some("/\\evil.example")), "/");
    assert_eq!(safe_next(Some("/a\\b/")), "/");
    assert_eq!(safe_next(Some("/next\r\nSet-Cookie: x=1")), "/");
    assert_eq!(safe_next(Some("/\tevil")), "/");
    assert_eq!(safe_next(None), "/");
  }

  #[test]
  fn form_page_never_echoes_passwords() {
    let values = FormValues::from([
      ("username".to_owned(), "ada".to_owned()),
      ("password1".to_owned(), "hunter22".to_owned()),
    ]);
    let page = FormPage::with_errors(quill_core::form::REGISTER_FORM, values, FormErrors::new());
    assert!(page.values.contains_key("username"));
    assert!(!page.values.contains_key("password1"));
  }
}
