//! Read-only listing routes.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | categories + published articles |
//! | `GET`  | `/categories/` | |
//! | `GET`  | `/authors/` | |
//! | `GET`  | `/category/{slug}/` | 404 if the slug is unknown |
//! | `GET`  | `/author/{username}/` | 404 if the username is unknown |
//! | `GET`  | `/article/{slug}/` | subject to the configured draft policy |
//! | `GET`  | `/search/?q=` | empty `q` lists everything visible |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use quill_core::{
  listing::{
    self, ArticleContext, ArticlesContext, AuthorsContext, CategoriesContext,
    HomeContext,
  },
  store::BlogStore,
};
use serde::Deserialize;

use crate::{AppState, auth::CurrentUser, error::Error};

pub async fn home<S>(State(state): State<AppState<S>>) -> Result<Json<HomeContext>, Error>
where
  S: BlogStore + Clone + 'static,
{
  Ok(Json(listing::home(state.store.as_ref()).await?))
}

pub async fn categories<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<CategoriesContext>, Error>
where
  S: BlogStore + Clone + 'static,
{
  Ok(Json(listing::categories(state.store.as_ref()).await?))
}

pub async fn authors<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<AuthorsContext>, Error>
where
  S: BlogStore + Clone + 'static,
{
  Ok(Json(listing::authors(state.store.as_ref()).await?))
}

pub async fn category_articles<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<ArticlesContext>, Error>
where
  S: BlogStore + Clone + 'static,
{
  Ok(Json(listing::category_articles(state.store.as_ref(), &slug).await?))
}

pub async fn author_articles<S>(
  State(state): State<AppState<S>>,
  Path(username): Path<String>,
) -> Result<Json<ArticlesContext>, Error>
where
  S: BlogStore + Clone + 'static,
{
  Ok(Json(listing::author_articles(state.store.as_ref(), &username).await?))
}

pub async fn article_detail<S>(
  State(state): State<AppState<S>>,
  CurrentUser(viewer): CurrentUser,
  Path(slug): Path<String>,
) -> Result<Json<ArticleContext>, Error>
where
  S: BlogStore + Clone + 'static,
{
  let drafts = state.config.draft_access;
  Ok(Json(
    listing::article_detail(state.store.as_ref(), &slug, &viewer, drafts).await?,
  ))
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  pub q: Option<String>,
}

/// `GET /search/[?q=...]`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<ArticlesContext>, Error>
where
  S: BlogStore + Clone + 'static,
{
  Ok(Json(
    listing::search_articles(state.store.as_ref(), params.q.as_deref()).await?,
  ))
}
