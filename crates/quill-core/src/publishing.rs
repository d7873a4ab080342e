//! Publishing operations: the write side of the blog.
//!
//! Every mutation is decided by [`authorize`] before the store is touched.
//! Uniqueness violations reported by the store come back as field errors on
//! the form the user submitted.

use tracing::{info, warn};

use crate::{
  Error, Result,
  article::{Article, NewArticle},
  authz::{Action, Decision, Identity, authorize},
  category::{Category, NewCategory},
  form::{FormErrors, FormValues},
  store::{BlogStore, ConflictError},
};

fn conflict_or_store<E>(err: E, field: &str, message: &str) -> Error
where
  E: std::error::Error + ConflictError + Send + Sync + 'static,
{
  if err.conflicting_field().is_some() {
    Error::Validation(FormErrors::single(field, message))
  } else {
    Error::store(err)
  }
}

/// Create an article owned by `identity` from a submitted form.
pub async fn create_article<S: BlogStore>(
  store: &S,
  identity: &Identity,
  values: &FormValues,
) -> Result<Article> {
  authorize(identity, Action::CreateArticle).into_result()?;
  let author_id = identity.author_id().ok_or(Error::Unauthenticated)?;

  let categories = store.list_categories().await.map_err(Error::store)?;
  let input = NewArticle::from_form(values, author_id, &categories)
    .map_err(Error::Validation)?;

  let article = store.add_article(input).await.map_err(|e| {
    conflict_or_store(e, "title", "Article with this Slug already exists.")
  })?;

  info!(slug = %article.slug, author = %article.author.username, "article created");
  Ok(article)
}

pub async fn create_category<S: BlogStore>(
  store: &S,
  identity: &Identity,
  values: &FormValues,
) -> Result<Category> {
  authorize(identity, Action::CreateCategory).into_result()?;

  let input = NewCategory::from_form(values).map_err(Error::Validation)?;
  let category = store.add_category(input).await.map_err(|e| {
    conflict_or_store(e, "name", "Category with this Name already exists.")
  })?;

  info!(slug = %category.slug, "category created");
  Ok(category)
}

/// Permanently delete the article at `slug` if `identity` owns it.
pub async fn delete_article<S: BlogStore>(
  store: &S,
  identity: &Identity,
  slug: &str,
) -> Result<Article> {
  let article = store
    .get_article(slug)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("article", slug))?;

  let decision = authorize(identity, Action::Delete(&article));
  if decision != Decision::Allow {
    warn!(
      slug,
      user = identity.author().map(|a| a.username.as_str()).unwrap_or("anonymous"),
      "article delete denied"
    );
  }
  decision.into_result()?;

  if !store.delete_article(article.article_id).await.map_err(Error::store)? {
    return Err(Error::not_found("article", slug));
  }

  info!(slug, "article deleted");
  Ok(article)
}
