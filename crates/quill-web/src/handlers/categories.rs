//! Category creation routes.

use axum::{
  Form, Json,
  extract::State,
  http::Uri,
  response::{IntoResponse, Response},
};
use quill_core::{
  authz::{Action, authorize},
  form::{CATEGORY_FORM, FormValues},
  publishing,
  store::BlogStore,
};
use serde::Serialize;

use crate::{
  AppState,
  auth::CurrentUser,
  error::Error,
  handlers::{FormPage, found},
};

#[derive(Debug, Serialize)]
pub struct CategoryFormContext {
  pub user: String,
  #[serde(flatten)]
  pub form: FormPage,
}

/// `GET /category/new/`
pub async fn create_form<S>(
  State(_state): State<AppState<S>>,
  CurrentUser(identity): CurrentUser,
  uri: Uri,
) -> Result<Json<CategoryFormContext>, Error>
where
  S: BlogStore + Clone + 'static,
{
  authorize(&identity, Action::CreateCategory)
    .into_result()
    .map_err(|e| Error::from_core(e, uri.path()))?;

  Ok(Json(CategoryFormContext {
    user: identity.author().map(|a| a.username.clone()).unwrap_or_default(),
    form: FormPage::blank(CATEGORY_FORM),
  }))
}

/// `POST /category/new/`: 302 to the category page, or 200 + field errors.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(identity): CurrentUser,
  uri: Uri,
  Form(values): Form<FormValues>,
) -> Result<Response, Error>
where
  S: BlogStore + Clone + 'static,
{
  match publishing::create_category(state.store.as_ref(), &identity, &values).await {
    Ok(category) => Ok(found(&category.path())),
    Err(quill_core::Error::Validation(errors)) => Ok(
      Json(CategoryFormContext {
        user: identity.author().map(|a| a.username.clone()).unwrap_or_default(),
        form: FormPage::with_errors(CATEGORY_FORM, values, errors),
      })
      .into_response(),
    ),
    Err(e) => Err(Error::from_core(e, uri.path())),
  }
}
