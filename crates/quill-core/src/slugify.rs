//! Slug derivation for URL lookup keys.

/// Derive a URL-safe slug from a human-readable field.
///
/// Returns `None` when nothing slug-worthy survives (e.g. punctuation only).
pub fn slug_from(text: &str) -> Option<String> {
  let slug = ::slug::slugify(text);
  if slug.is_empty() { None } else { Some(slug) }
}
