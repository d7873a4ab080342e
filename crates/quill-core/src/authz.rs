//! Authorization gate for mutating operations.
//!
//! Creation needs any authenticated identity; update and delete need the
//! identity to be the article's author.

use uuid::Uuid;

use crate::{Error, Result, article::Article, author::Author};

/// Who is making a request, resolved by the web layer before any operation.
#[derive(Debug, Clone, Default)]
pub enum Identity {
  #[default]
  Anonymous,
  Author(Author),
}

impl Identity {
  pub fn author(&self) -> Option<&Author> {
    match self {
      Self::Anonymous => None,
      Self::Author(a) => Some(a),
    }
  }

  pub fn author_id(&self) -> Option<Uuid> { self.author().map(|a| a.author_id) }

  pub fn is_authenticated(&self) -> bool { self.author().is_some() }
}

#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
  CreateArticle,
  CreateCategory,
  Update(&'a Article),
  Delete(&'a Article),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
  Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  Allow,
  /// Not a hard denial: the caller should log in and retry.
  RedirectToLogin,
  Deny(Denial),
}

impl Decision {
  /// Fold the decision into the core error taxonomy.
  pub fn into_result(self) -> Result<()> {
    match self {
      Self::Allow => Ok(()),
      Self::RedirectToLogin => Err(Error::Unauthenticated),
      Self::Deny(Denial::Forbidden) => Err(Error::Forbidden),
    }
  }
}

pub fn authorize(identity: &Identity, action: Action<'_>) -> Decision {
  match action {
    Action::CreateArticle | Action::CreateCategory => {
      if identity.is_authenticated() {
        Decision::Allow
      } else {
        Decision::RedirectToLogin
      }
    }
    Action::Update(article) | Action::Delete(article) => match identity.author_id() {
      Some(id) if article.is_owned_by(id) => Decision::Allow,
      _ => Decision::Deny(Denial::Forbidden),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;

  #[test]
  fn anonymous_create_redirects_to_login() {
    let decision = authorize(&Identity::Anonymous, Action::CreateArticle);
    assert_eq!(decision, Decision::RedirectToLogin);
    assert!(matches!(decision.into_result(), Err(Error::Unauthenticated)));
    assert_eq!(
      authorize(&Identity::Anonymous, Action::CreateCategory),
      Decision::RedirectToLogin
    );
  }

  #[test]
  fn any_author_may_create() {
    let id = Identity::Author(author("ada"));
    assert_eq!(authorize(&id, Action::CreateArticle), Decision::Allow);
    assert_eq!(authorize(&id, Action::CreateCategory), Decision::Allow);
  }

  #[test]
  fn only_the_owner_may_update_or_delete() {
    let owner = author("ada");
    let other = author("bob");
    let post = article("Hello", 0, &owner, &category("news"));

    let owner_id = Identity::Author(owner);
    let other_id = Identity::Author(other);

    assert_eq!(authorize(&owner_id, Action::Delete(&post)), Decision::Allow);
    assert_eq!(authorize(&owner_id, Action::Update(&post)), Decision::Allow);
    assert_eq!(
      authorize(&other_id, Action::Delete(&post)),
      Decision::Deny(Denial::Forbidden)
    );
    assert_eq!(
      authorize(&other_id, Action::Update(&post)),
      Decision::Deny(Denial::Forbidden)
    );
  }

  #[test]
  fn anonymous_delete_is_forbidden() {
    let post = article("Hello", 0, &author("ada"), &category("news"));
    let decision = authorize(&Identity::Anonymous, Action::Delete(&post));
    assert!(matches!(decision.into_result(), Err(Error::Forbidden)));
  }
}
