//! Article: the published unit of the blog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
  author::Author,
  category::Category,
  form::{ARTICLE_FORM, FormErrors, FormValues, cleaned, validate},
  slugify::slug_from,
};

/// Publication state; only `Published` articles appear in listings.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ArticleStatus {
  #[default]
  Draft,
  Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
  pub article_id:     Uuid,
  pub title:          String,
  /// Unique across all articles; derived from `title`.
  pub slug:           String,
  pub body:           String,
  pub image:          Option<String>,
  pub status:         ArticleStatus,
  pub author:         Author,
  pub category:       Category,
  /// Set once by the store at creation.
  pub date_created:   DateTime<Utc>,
  /// Set when the article becomes `Published`; `None` for drafts.
  pub date_published: Option<DateTime<Utc>>,
}

impl Article {
  pub fn is_published(&self) -> bool { self.status == ArticleStatus::Published }

  pub fn is_owned_by(&self, author_id: Uuid) -> bool {
    self.author.author_id == author_id
  }

  pub fn path(&self) -> String { format!("/article/{}/", self.slug) }
}

/// Input to [`crate::store::BlogStore::add_article`].
/// Timestamps are always set by the store; they are not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewArticle {
  pub title:       String,
  pub slug:        String,
  pub body:        String,
  pub image:       Option<String>,
  pub status:      ArticleStatus,
  pub author_id:   Uuid,
  pub category_id: Uuid,
}

impl NewArticle {
  /// Build from a submitted article form. `category` is matched by slug
  /// against `categories`.
  pub fn from_form(
    values: &FormValues,
    author_id: Uuid,
    categories: &[Category],
  ) -> Result<Self, FormErrors> {
    let mut errors = validate(ARTICLE_FORM, values);

    let category = cleaned(values, "category").and_then(|wanted| {
      let found = categories.iter().find(|c| c.slug == wanted);
      if found.is_none() {
        errors.push(
          "category",
          "Select a valid choice. That choice is not one of the available choices.",
        );
      }
      found
    });

    let title = cleaned(values, "title").unwrap_or_default();
    let slug = slug_from(title);
    if !title.is_empty() && slug.is_none() {
      errors.push("title", "Enter a title containing letters or numbers.");
    }

    errors.into_result()?;

    // Both are present once the schema and the checks above have passed.
    let (Some(category), Some(slug)) = (category, slug) else {
      return Err(FormErrors::single("title", crate::form::REQUIRED));
    };

    Ok(Self {
      title: title.to_owned(),
      slug,
      body: cleaned(values, "body").unwrap_or_default().to_owned(),
      image: cleaned(values, "image").map(str::to_owned),
      status: cleaned(values, "status")
        .and_then(|s| s.parse().ok())
        .unwrap_or_default(),
      author_id,
      category_id: category.category_id,
    })
  }
}
