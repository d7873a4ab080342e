//! Visibility filter: which articles a viewer may see.
//!
//! Every listing scope shows `Published` articles only. Direct access by slug
//! is governed separately by [`DraftAccess`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  article::{Article, ArticleStatus},
  authz::Identity,
  store::ArticleQuery,
};

/// The listing context an article set is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
  Home,
  Category(Uuid),
  Author(Uuid),
  Search,
}

impl Scope {
  /// The store query that fetches candidates for this scope.
  pub fn query(self) -> ArticleQuery {
    let published = ArticleQuery {
      status: Some(ArticleStatus::Published),
      ..ArticleQuery::default()
    };
    match self {
      Self::Home | Self::Search => published,
      Self::Category(id) => ArticleQuery { category: Some(id), ..published },
      Self::Author(id) => ArticleQuery { author: Some(id), ..published },
    }
  }

  fn admits(self, article: &Article) -> bool {
    article.is_published()
      && match self {
        Self::Home | Self::Search => true,
        Self::Category(id) => article.category.category_id == id,
        Self::Author(id) => article.author.author_id == id,
      }
  }
}

/// Keep only the articles eligible for display in `scope`.
pub fn visible_articles(scope: Scope, mut articles: Vec<Article>) -> Vec<Article> {
  articles.retain(|a| scope.admits(a));
  articles
}

/// Who may open a draft through its detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftAccess {
  /// Any viewer holding the slug may read a draft.
  #[default]
  Anyone,
  /// Drafts resolve only for their own author; everyone else gets NotFound.
  AuthorOnly,
}

impl DraftAccess {
  pub fn can_view(self, article: &Article, viewer: &Identity) -> bool {
    if article.is_published() {
      return true;
    }
    match self {
      Self::Anyone => true,
      Self::AuthorOnly => viewer
        .author_id()
        .is_some_and(|id| article.is_owned_by(id)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;

  #[test]
  fn listing_scopes_drop_drafts() {
    let a = author("ada");
    let c = category("news");
    let set = vec![article("live", 1, &a, &c), draft("wip", 2, &a, &c)];

    for scope in [Scope::Home, Scope::Search, Scope::Category(c.category_id), Scope::Author(a.author_id)] {
      let visible = visible_articles(scope, set.clone());
      assert_eq!(visible.len(), 1, "{scope:?}");
      assert!(visible.iter().all(Article::is_published));
    }
  }

  #[test]
  fn category_and_author_scopes_narrow() {
    let ada = author("ada");
    let bob = author("bob");
    let news = category("news");
    let tech = category("tech");
    let set = vec![
      article("a", 1, &ada, &news),
      article("b", 2, &bob, &news),
      article("c", 3, &ada, &tech),
    ];

    let in_news = visible_articles(Scope::Category(news.category_id), set.clone());
    assert_eq!(in_news.len(), 2);
    let by_ada = visible_articles(Scope::Author(ada.author_id), set);
    assert_eq!(by_ada.len(), 2);
    assert!(by_ada.iter().all(|x| x.author.username == "ada"));
  }

  #[test]
  fn scope_query_always_asks_for_published() {
    let id = Uuid::new_v4();
    assert_eq!(Scope::Home.query().status, Some(ArticleStatus::Published));
    assert_eq!(Scope::Category(id).query().category, Some(id));
    assert_eq!(Scope::Author(id).query().author, Some(id));
    assert_eq!(Scope::Author(id).query().category, None);
  }

  #[test]
  fn draft_access_policies() {
    let owner = author("ada");
    let wip = draft("wip", 0, &owner, &category("news"));
    let stranger = Identity::Author(author("bob"));
    let me = Identity::Author(owner);

    assert!(DraftAccess::Anyone.can_view(&wip, &Identity::Anonymous));
    assert!(!DraftAccess::AuthorOnly.can_view(&wip, &Identity::Anonymous));
    assert!(!DraftAccess::AuthorOnly.can_view(&wip, &stranger));
    assert!(DraftAccess::AuthorOnly.can_view(&wip, &me));
  }
}
