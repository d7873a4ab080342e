//! Ordering policy: newest publication first, deterministically.

use std::cmp::Ordering;

use crate::article::Article;

/// Newest `date_published` first (unpublished last), then newest
/// `date_created`, then ascending id so identical timestamps still order the
/// same way every time.
pub fn compare(a: &Article, b: &Article) -> Ordering {
  b.date_published
    .cmp(&a.date_published)
    .then_with(|| b.date_created.cmp(&a.date_created))
    .then_with(|| a.article_id.cmp(&b.article_id))
}

pub fn order(mut articles: Vec<Article>) -> Vec<Article> {
  articles.sort_by(compare);
  articles
}
