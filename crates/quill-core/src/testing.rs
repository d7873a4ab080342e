//! Fixtures shared by the unit tests in this crate.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
  article::{Article, ArticleStatus},
  author::{Author, Profile},
  category::Category,
};

pub fn author(username: &str) -> Author {
  Author {
    author_id:  Uuid::new_v4(),
    username:   username.to_owned(),
    first_name: String::new(),
    last_name:  String::new(),
    email:      format!("{username}@example.com"),
    profile:    Profile { image: "profile_pics/default.jpg".to_owned() },
  }
}

pub fn category(slug: &str) -> Category {
  Category {
    category_id: Uuid::new_v4(),
    name:        slug.to_uppercase(),
    slug:        slug.to_owned(),
    image:       None,
  }
}

pub fn epoch() -> DateTime<Utc> {
  DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

/// A published article whose publication time is `minutes` after [`epoch`].
pub fn article(title: &str, minutes: i64, author: &Author, category: &Category) -> Article {
  let at = epoch() + Duration::minutes(minutes);
  Article {
    article_id:     Uuid::new_v4(),
    title:          title.to_owned(),
    slug:           crate::slugify::slug_from(title).unwrap_or_default(),
    body:           format!("{title} body"),
    image:          None,
    status:         ArticleStatus::Published,
    author:         author.clone(),
    category:       category.clone(),
    date_created:   at,
    date_published: Some(at),
  }
}

pub fn draft(title: &str, minutes: i64, author: &Author, category: &Category) -> Article {
  Article {
    status: ArticleStatus::Draft,
    date_published: None,
    ..article(title, minutes, author, category)
  }
}
