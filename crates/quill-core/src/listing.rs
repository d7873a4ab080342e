//! Listing composer: the read side of the blog.
//!
//! Each operation resolves its lookup key, asks the store for candidates,
//! runs them through the visibility filter, optional title search and the
//! ordering policy, and returns a serialisable context.

use serde::Serialize;

use crate::{
  Error, Result,
  article::Article,
  author::Author,
  authz::Identity,
  category::Category,
  ordering::order,
  search::search,
  store::BlogStore,
  visibility::{DraftAccess, Scope, visible_articles},
};

#[derive(Debug, Clone, Serialize)]
pub struct HomeContext {
  pub categories: Vec<Category>,
  pub articles:   Vec<Article>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesContext {
  pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorsContext {
  pub authors: Vec<Author>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticlesContext {
  pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleContext {
  pub article: Article,
}

async fn scoped<S: BlogStore>(store: &S, scope: Scope) -> Result<Vec<Article>> {
  let query = scope.query();
  let candidates = store.list_articles(&query).await.map_err(Error::store)?;
  Ok(visible_articles(scope, candidates))
}

pub async fn home<S: BlogStore>(store: &S) -> Result<HomeContext> {
  let categories = store.list_categories().await.map_err(Error::store)?;
  let articles = order(scoped(store, Scope::Home).await?);
  Ok(HomeContext { categories, articles })
}

pub async fn categories<S: BlogStore>(store: &S) -> Result<CategoriesContext> {
  let categories = store.list_categories().await.map_err(Error::store)?;
  Ok(CategoriesContext { categories })
}

pub async fn authors<S: BlogStore>(store: &S) -> Result<AuthorsContext> {
  let authors = store.list_authors().await.map_err(Error::store)?;
  Ok(AuthorsContext { authors })
}

pub async fn category_articles<S: BlogStore>(
  store: &S,
  slug: &str,
) -> Result<ArticlesContext> {
  let category = store
    .get_category(slug)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("category", slug))?;

  let articles = order(scoped(store, Scope::Category(category.category_id)).await?);
  Ok(ArticlesContext { articles })
}

pub async fn author_articles<S: BlogStore>(
  store: &S,
  username: &str,
) -> Result<ArticlesContext> {
  let author = store
    .get_author(username)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("author", username))?;

  let articles = order(scoped(store, Scope::Author(author.author_id)).await?);
  Ok(ArticlesContext { articles })
}

/// Resolve one article by slug, subject to the configured draft policy.
pub async fn article_detail<S: BlogStore>(
  store: &S,
  slug: &str,
  viewer: &Identity,
  drafts: DraftAccess,
) -> Result<ArticleContext> {
  let article = store
    .get_article(slug)
    .await
    .map_err(Error::store)?
    .filter(|a| drafts.can_view(a, viewer))
    .ok_or_else(|| Error::not_found("article", slug))?;

  Ok(ArticleContext { article })
}

pub async fn search_articles<S: BlogStore>(
  store: &S,
  query: Option<&str>,
) -> Result<ArticlesContext> {
  let visible = scoped(store, Scope::Search).await?;
  Ok(ArticlesContext { articles: order(search(visible, query)) })
}
