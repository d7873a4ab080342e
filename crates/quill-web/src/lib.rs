//! HTTP layer for the Quill blog.
//!
//! Exposes an axum [`Router`] serving the listing, search, publishing and
//! account routes, backed by any [`BlogStore`]. Page bodies are the JSON
//! contexts assembled by `quill_core::listing`; rendering them is left to
//! the client.

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use quill_core::{store::BlogStore, visibility::DraftAccess};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{accounts, articles, categories, listing};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `QUILL_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  /// Who may read a draft through its detail page.
  #[serde(default)]
  pub draft_access: DraftAccess,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: BlogStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the blog.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: BlogStore + Clone + 'static,
{
  Router::new()
    .route("/",                       get(listing::home::<S>))
    .route("/categories/",            get(listing::categories::<S>))
    .route("/authors/",               get(listing::authors::<S>))
    .route("/category/new/",          get(categories::create_form::<S>).post(categories::create::<S>))
    .route("/category/{slug}/",       get(listing::category_articles::<S>))
    .route("/author/{username}/",     get(listing::author_articles::<S>))
    .route("/article-new/",           get(articles::create_form::<S>).post(articles::create::<S>))
    .route("/article/{slug}/",        get(listing::article_detail::<S>))
    .route("/article/{slug}/delete/", post(articles::delete::<S>))
    .route("/search/",                get(listing::search::<S>))
    .route("/accounts/register/",     get(accounts::register_form::<S>).post(accounts::register::<S>))
    .route("/accounts/login/",        get(accounts::login_form::<S>).post(accounts::login::<S>))
    .route("/accounts/logout/",       post(accounts::logout::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
