//! Request identity: session cookie or HTTP Basic credentials.
//!
//! Every handler that cares who is calling takes a [`CurrentUser`], which
//! resolves to [`Identity::Anonymous`] rather than failing when no valid
//! credentials are present. Whether anonymity is acceptable is the
//! authorization gate's decision, not the extractor's.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use cookie::{Cookie, SameSite};
use quill_core::{author::Author, authz::Identity, store::BlogStore};
use rand_core::OsRng;

use crate::{AppState, error::Error};

pub const SESSION_COOKIE: &str = "sessionid";

/// The resolved identity of the caller.
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: BlogStore + Clone + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    resolve_identity(&parts.headers, state.store.as_ref())
      .await
      .map(CurrentUser)
  }
}

/// Session cookie first, then Basic auth, else anonymous.
pub async fn resolve_identity<S: BlogStore>(
  headers: &HeaderMap,
  store:   &S,
) -> Result<Identity, Error> {
  if let Some(token) = session_token(headers)
    && let Some(author) = store.session_author(&token).await.map_err(Error::store)?
  {
    return Ok(Identity::Author(author));
  }

  if let Some((username, password)) = basic_credentials(headers)
    && let Some(author) = verify_login(store, &username, &password).await?
  {
    return Ok(Identity::Author(author));
  }

  Ok(Identity::Anonymous)
}

/// The value of the session cookie, if the request carries one.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
  headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(Cookie::split_parse)
    .filter_map(Result::ok)
    .find(|c| c.name() == SESSION_COOKIE)
    .map(|c| c.value().to_owned())
}

/// Decode `Authorization: Basic …` into `(username, password)`.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
  let encoded = headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Basic ")?;

  let decoded = B64.decode(encoded).ok()?;
  let creds   = std::str::from_utf8(&decoded).ok()?;
  let (username, password) = creds.split_once(':')?;
  Some((username.to_owned(), password.to_owned()))
}

/// Check `password` against the stored argon2 hash for `username`.
/// Returns the author on success and `None` on any mismatch.
pub async fn verify_login<S: BlogStore>(
  store:    &S,
  username: &str,
  password: &str,
) -> Result<Option<Author>, Error> {
  let Some(creds) = store.get_credentials(username).await.map_err(Error::store)? else {
    return Ok(None);
  };

  let Ok(parsed_hash) = PasswordHash::new(&creds.password_hash) else {
    tracing::warn!(username, "stored password hash is not a PHC string");
    return Ok(None);
  };

  if Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .is_err()
  {
    return Ok(None);
  }

  store.get_author(username).await.map_err(Error::store)
}

/// Produce the argon2 PHC string stored for a new author.
pub fn hash_password(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

pub fn session_cookie(token: String) -> Cookie<'static> {
  Cookie::build((SESSION_COOKIE, token))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .build()
}

/// A cookie that makes the browser drop its session.
pub fn cleared_session_cookie() -> Cookie<'static> {
  let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
  cookie.make_removal();
  cookie
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::HeaderValue;

  #[test]
  fn session_token_found_among_other_cookies() {
    let mut headers = HeaderMap::new();
    headers.insert(
      header::COOKIE,
      HeaderValue::from_static("theme=dark; sessionid=abc123; lang=en"),
    );
    assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
  }

  #[test]
  fn no_cookie_header_means_no_token() {
    assert_eq!(session_token(&HeaderMap::new()), None);
  }

  #[test]
  fn basic_credentials_decode() {
    let mut headers = HeaderMap::new();
    let value = format!("Basic {}", B64.encode("ada:s3cret:with-colon"));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
    assert_eq!(
      basic_credentials(&headers),
      Some(("ada".to_owned(), "s3cret:with-colon".to_owned()))
    );
  }

  #[test]
  fn invalid_base64_is_ignored() {
    let mut headers = HeaderMap::new();
    headers.insert(
      header::AUTHORIZATION,
      HeaderValue::from_static("Basic !!!not-base64!!!"),
    );
    assert_eq!(basic_credentials(&headers), None);
  }

  #[test]
  fn hashed_password_verifies() {
    let hash = hash_password("correct-horse").unwrap();
    let parsed = PasswordHash::new(&hash).unwrap();
    assert!(Argon2::default().verify_password(b"correct-horse", &parsed).is_ok());
    assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
  }

  #[test]
  fn cleared_cookie_expires_immediately() {
    let rendered = cleared_session_cookie().to_string();
    assert!(rendered.starts_with("sessionid=;"), "{rendered}");
    assert!(rendered.contains("Max-Age=0"), "{rendered}");
  }
}
