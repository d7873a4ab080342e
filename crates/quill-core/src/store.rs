//! The `BlogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `quill-store-sqlite`).
//! The listing and publishing layers depend on this abstraction, not on any
//! concrete backend. Transactional isolation and uniqueness are the backend's
//! job; the core performs no locking of its own.

use std::future::Future;

use uuid::Uuid;

use crate::{
  article::{Article, ArticleStatus, NewArticle},
  author::{Author, Credentials, NewAuthor, Session},
  category::{Category, NewCategory},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Equality filters for [`BlogStore::list_articles`]. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleQuery {
  pub category: Option<Uuid>,
  pub author:   Option<Uuid>,
  pub status:   Option<ArticleStatus>,
}

// ─── Conflicts ───────────────────────────────────────────────────────────────

/// Store errors that can report a violated uniqueness constraint.
pub trait ConflictError {
  /// The field whose uniqueness was violated (e.g. `"slug"`), if this error
  /// is a conflict at all.
  fn conflicting_field(&self) -> Option<&str>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Quill blog store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait BlogStore: Send + Sync {
  type Error: std::error::Error + ConflictError + Send + Sync + 'static;

  // ── Categories ────────────────────────────────────────────────────────

  fn add_category(
    &self,
    input: NewCategory,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + '_;

  /// Resolve a category by slug. Returns `None` if not found.
  fn get_category<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + 'a;

  /// All categories, ordered by name.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  // ── Authors ───────────────────────────────────────────────────────────

  /// Persist an author together with their profile.
  fn add_author(
    &self,
    input: NewAuthor,
  ) -> impl Future<Output = Result<Author, Self::Error>> + Send + '_;

  /// Resolve an author by username. Returns `None` if not found.
  fn get_author<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<Author>, Self::Error>> + Send + 'a;

  /// All authors, ordered by username.
  fn list_authors(
    &self,
  ) -> impl Future<Output = Result<Vec<Author>, Self::Error>> + Send + '_;

  fn get_credentials<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<Credentials>, Self::Error>> + Send + 'a;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Start a login session for `author_id` with a fresh random token.
  fn open_session(
    &self,
    author_id: Uuid,
  ) -> impl Future<Output = Result<Session, Self::Error>> + Send + '_;

  /// The author owning `token`, if the session exists.
  fn session_author<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<Option<Author>, Self::Error>> + Send + 'a;

  fn close_session<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Articles ──────────────────────────────────────────────────────────

  /// Persist a new article. `date_created` is set by the store, as is
  /// `date_published` when the status is `Published`.
  fn add_article(
    &self,
    input: NewArticle,
  ) -> impl Future<Output = Result<Article, Self::Error>> + Send + '_;

  /// Resolve an article by slug regardless of status.
  fn get_article<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Article>, Self::Error>> + Send + 'a;

  /// Articles matching `query`, in no particular order.
  fn list_articles<'a>(
    &'a self,
    query: &'a ArticleQuery,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + 'a;

  /// Permanently remove an article. Returns `false` if it did not exist.
  fn delete_article(
    &self,
    article_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn count_articles(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
