//! Registration, login and logout.
//!
//! A successful login opens a row in the sessions table and hands its token
//! back as the `sessionid` cookie. Logout closes the row and clears the
//! cookie.

use axum::{
  Form, Json,
  extract::{Query, State},
  http::{HeaderMap, HeaderValue, header},
  response::{IntoResponse, Response},
};
use cookie::Cookie;
use quill_core::{
  author::Registration,
  form::{FormErrors, FormValues, LOGIN_FORM, REGISTER_FORM, cleaned, validate},
  store::{BlogStore, ConflictError as _},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
  AppState,
  auth::{cleared_session_cookie, hash_password, session_cookie, session_token, verify_login},
  error::Error,
  handlers::{FormPage, LOGIN_PATH, found, safe_next},
};

pub const INVALID_REGISTRATION: &str = "Please provide valid information.";
pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";
pub const INVALID_LOGIN: &str =
  "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Form key for errors that belong to no single field.
pub const NON_FIELD: &str = "__all__";

// ─── Registration ────────────────────────────────────────────────────────────

/// `GET /accounts/register/`
pub async fn register_form<S>(State(_state): State<AppState<S>>) -> Json<FormPage>
where
  S: BlogStore + Clone + 'static,
{
  Json(FormPage::blank(REGISTER_FORM))
}

/// `POST /accounts/register/`: 302 to the login page, or 200 with the
/// field errors and an error flash.
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Form(values): Form<FormValues>,
) -> Result<Response, Error>
where
  S: BlogStore + Clone + 'static,
{
  let registration = match Registration::from_form(&values) {
    Ok(registration) => registration,
    Err(errors) => return Ok(invalid_registration(values, errors)),
  };

  let hash = hash_password(&registration.password)?;
  match state.store.add_author(registration.into_new_author(hash)).await {
    Ok(author) => {
      info!(username = %author.username, "account created, author may now log in");
      Ok(found(LOGIN_PATH))
    }
    Err(e) if e.conflicting_field().is_some() => Ok(invalid_registration(
      values,
      FormErrors::single("username", DUPLICATE_USERNAME),
    )),
    Err(e) => Err(Error::store(e)),
  }
}

fn invalid_registration(values: FormValues, errors: FormErrors) -> Response {
  let page = FormPage::with_errors(REGISTER_FORM, values, errors)
    .message("error", INVALID_REGISTRATION);
  Json(page).into_response()
}

// ─── Login / logout ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
  pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginContext {
  pub next: String,
  #[serde(flatten)]
  pub form: FormPage,
}

/// `GET /accounts/login/?next=…`
pub async fn login_form<S>(
  State(_state): State<AppState<S>>,
  Query(params): Query<LoginParams>,
) -> Json<LoginContext>
where
  S: BlogStore + Clone + 'static,
{
  Json(LoginContext {
    next: safe_next(params.next.as_deref()).to_owned(),
    form: FormPage::blank(LOGIN_FORM),
  })
}

/// `POST /accounts/login/`: on success sets the session cookie and
/// redirects to `next` (from the form body or the query string).
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<LoginParams>,
  Form(values): Form<FormValues>,
) -> Result<Response, Error>
where
  S: BlogStore + Clone + 'static,
{
  let next = safe_next(values.get("next").map(String::as_str).or(params.next.as_deref()))
    .to_owned();

  let errors = validate(LOGIN_FORM, &values);
  if !errors.is_empty() {
    return Ok(login_page(next, values, errors));
  }

  let username = cleaned(&values, "username").unwrap_or_default().to_owned();
  let password = values.get("password").map(String::as_str).unwrap_or_default();

  let Some(author) = verify_login(state.store.as_ref(), &username, password).await? else {
    warn!(username, "login rejected");
    return Ok(login_page(next, values, FormErrors::single(NON_FIELD, INVALID_LOGIN)));
  };

  let session = state
    .store
    .open_session(author.author_id)
    .await
    .map_err(Error::store)?;
  info!(username = %author.username, "logged in");

  let mut response = found(&next);
  set_cookie(&mut response, session_cookie(session.token));
  Ok(response)
}

fn login_page(next: String, values: FormValues, errors: FormErrors) -> Response {
  Json(LoginContext {
    next,
    form: FormPage::with_errors(LOGIN_FORM, values, errors),
  })
  .into_response()
}

/// `POST /accounts/logout/`
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: BlogStore + Clone + 'static,
{
  if let Some(token) = session_token(&headers) {
    state.store.close_session(&token).await.map_err(Error::store)?;
    info!("session closed");
  }

  let mut response = found("/");
  set_cookie(&mut response, cleared_session_cookie());
  Ok(response)
}

fn set_cookie(response: &mut Response, cookie: Cookie<'static>) {
  match HeaderValue::from_str(&cookie.to_string()) {
    Ok(value) => {
      response.headers_mut().append(header::SET_COOKIE, value);
    }
    Err(e) => warn!(error = %e, "session cookie is not a valid header value"),
  }
}
