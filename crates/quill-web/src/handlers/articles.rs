//! Article publishing routes.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/article-new/` | form context; 302 to login if anonymous |
//! | `POST` | `/article-new/` | 302 to the new article, or 200 + field errors |
//! | `POST` | `/article/{slug}/delete/` | owner only; 302 to `/`, else 403 |

use axum::{
  Form, Json,
  extract::{Path, State},
  http::Uri,
  response::{IntoResponse, Response},
};
use quill_core::{
  authz::{Action, Identity, authorize},
  category::Category,
  form::{ARTICLE_FORM, FormErrors, FormValues},
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
pub struct ArticleFormContext {
  pub user:       String,
  pub categories: Vec<Category>,
  #[serde(flatten)]
  pub form:       FormPage,
}

async fn form_context<S: BlogStore>(
  store: &S,
  identity: &Identity,
  form: FormPage,
) -> Result<ArticleFormContext, Error> {
  let categories = store.list_categories().await.map_err(Error::store)?;
  Ok(ArticleFormContext {
    user: identity.author().map(|a| a.username.clone()).unwrap_or_default(),
    categories,
    form,
  })
}

/// `GET /article-new/`
pub async fn create_form<S>(
  State(state): State<AppState<S>>,
  CurrentUser(identity): CurrentUser,
  uri: Uri,
) -> Result<Json<ArticleFormContext>, Error>
where
  S: BlogStore + Clone + 'static,
{
  authorize(&identity, Action::CreateArticle)
    .into_result()
    .map_err(|e| Error::from_core(e, uri.path()))?;

  let page = FormPage::blank(ARTICLE_FORM);
  Ok(Json(form_context(state.store.as_ref(), &identity, page).await?))
}

/// `POST /article-new/`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(identity): CurrentUser,
  uri: Uri,
  Form(values): Form<FormValues>,
) -> Result<Response, Error>
where
  S: BlogStore + Clone + 'static,
{
  let store = state.store.as_ref();
  match publishing::create_article(store, &identity, &values).await {
    Ok(article) => Ok(found(&article.path())),
    Err(quill_core::Error::Validation(errors)) => {
      invalid(store, &identity, values, errors).await
    }
    Err(e) => Err(Error::from_core(e, uri.path())),
  }
}

async fn invalid<S: BlogStore>(
  store: &S,
  identity: &Identity,
  values: FormValues,
  errors: FormErrors,
) -> Result<Response, Error> {
  let page = FormPage::with_errors(ARTICLE_FORM, values, errors);
  Ok(Json(form_context(store, identity, page).await?).into_response())
}

/// `POST /article/{slug}/delete/`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  CurrentUser(identity): CurrentUser,
  Path(slug): Path<String>,
  uri: Uri,
) -> Result<Response, Error>
where
  S: BlogStore + Clone + 'static,
{
  publishing::delete_article(state.store.as_ref(), &identity, &slug)
    .await
    .map_err(|e| Error::from_core(e, uri.path()))?;
  Ok(found("/"))
}
