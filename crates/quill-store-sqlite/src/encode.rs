//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings. Article status is stored as its uppercase name.

use chrono::{DateTime, Utc};
use quill_core::{
  article::{Article, ArticleStatus},
  author::{Author, Profile},
  category::Category,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ArticleStatus ───────────────────────────────────────────────────────────

pub fn encode_status(status: ArticleStatus) -> String { status.to_string() }

pub fn decode_status(s: &str) -> Result<ArticleStatus> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown article status: {s:?}")))
}

// ─── Select lists ────────────────────────────────────────────────────────────

/// Author joined with profile; column order matches [`RawAuthor::from_row`].
pub const AUTHOR_SELECT: &str = "
SELECT u.author_id, u.username, u.first_name, u.last_name, u.email, p.image
FROM authors u
JOIN profiles p ON p.author_id = u.author_id";

pub const CATEGORY_SELECT: &str =
  "SELECT category_id, name, slug, image FROM categories";

/// Article joined with author, profile and category; column order matches
/// [`RawArticle::from_row`].
pub const ARTICLE_SELECT: &str = "
SELECT
  a.article_id, a.title, a.slug, a.body, a.image, a.status,
  a.date_created, a.date_published,
  u.author_id, u.username, u.first_name, u.last_name, u.email, p.image,
  c.category_id, c.name, c.slug, c.image
FROM articles a
JOIN authors    u ON u.author_id   = a.author_id
JOIN profiles   p ON p.author_id   = u.author_id
JOIN categories c ON c.category_id = a.category_id";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `categories` row.
pub struct RawCategory {
  pub category_id: String,
  pub name:        String,
  pub slug:        String,
  pub image:       Option<String>,
}

impl RawCategory {
  pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      category_id: row.get(offset)?,
      name:        row.get(offset + 1)?,
      slug:        row.get(offset + 2)?,
      image:       row.get(offset + 3)?,
    })
  }

  pub fn into_category(self) -> Result<Category> {
    Ok(Category {
      category_id: decode_uuid(&self.category_id)?,
      name:        self.name,
      slug:        self.slug,
      image:       self.image,
    })
  }
}

/// Raw strings read from an `authors` row joined with its profile.
pub struct RawAuthor {
  pub author_id:  String,
  pub username:   String,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub image:      String,
}

impl RawAuthor {
  pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      author_id:  row.get(offset)?,
      username:   row.get(offset + 1)?,
      first_name: row.get(offset + 2)?,
      last_name:  row.get(offset + 3)?,
      email:      row.get(offset + 4)?,
      image:      row.get(offset + 5)?,
    })
  }

  pub fn into_author(self) -> Result<Author> {
    Ok(Author {
      author_id:  decode_uuid(&self.author_id)?,
      username:   self.username,
      first_name: self.first_name,
      last_name:  self.last_name,
      email:      self.email,
      profile:    Profile { image: self.image },
    })
  }
}

/// Raw strings read from an `articles` row joined with its relations.
pub struct RawArticle {
  pub article_id:     String,
  pub title:          String,
  pub slug:           String,
  pub body:           String,
  pub image:          Option<String>,
  pub status:         String,
  pub date_created:   String,
  pub date_published: Option<String>,
  pub author:         RawAuthor,
  pub category:       RawCategory,
}

impl RawArticle {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      article_id:     row.get(0)?,
      title:          row.get(1)?,
      slug:           row.get(2)?,
      body:           row.get(3)?,
      image:          row.get(4)?,
      status:         row.get(5)?,
      date_created:   row.get(6)?,
      date_published: row.get(7)?,
      author:         RawAuthor::from_row(row, 8)?,
      category:       RawCategory::from_row(row, 14)?,
    })
  }

  pub fn into_article(self) -> Result<Article> {
    Ok(Article {
      article_id:     decode_uuid(&self.article_id)?,
      title:          self.title,
      slug:           self.slug,
      body:           self.body,
      image:          self.image,
      status:         decode_status(&self.status)?,
      author:         self.author.into_author()?,
      category:       self.category.into_category()?,
      date_created:   decode_dt(&self.date_created)?,
      date_published: self.date_published.as_deref().map(decode_dt).transpose()?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_round_trips_through_column_text() {
    assert_eq!(encode_status(ArticleStatus::Published), "PUBLISHED");
    assert_eq!(decode_status("DRAFT").unwrap(), ArticleStatus::Draft);
    assert!(matches!(decode_status("draft"), Err(Error::Decode(_))));
  }

  #[test]
  fn bad_timestamp_is_a_date_parse_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
