//! Title search over an already-visible article set.

use crate::article::Article;

/// Narrow `visible` to articles whose title contains `query`, ignoring case.
/// An absent or empty query returns the set unchanged.
pub fn search(visible: Vec<Article>, query: Option<&str>) -> Vec<Article> {
  let needle = match query {
    Some(q) if !q.is_empty() => q.to_lowercase(),
    _ => return visible,
  };
  visible
    .into_iter()
    .filter(|a| a.title.to_lowercase().contains(&needle))
    .collect()
}
