//! Category: the required grouping every article belongs to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  form::{CATEGORY_FORM, FormErrors, FormValues, cleaned, validate},
  slugify::slug_from,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub category_id: Uuid,
  /// Unique, human-readable.
  pub name:        String,
  /// Unique lookup key derived from `name`.
  pub slug:        String,
  pub image:       Option<String>,
}

impl Category {
  pub fn path(&self) -> String { format!("/category/{}/", self.slug) }
}

/// Input to [`crate::store::BlogStore::add_category`].
#[derive(Debug, Clone)]
pub struct NewCategory {
  pub name:  String,
  pub slug:  String,
  pub image: Option<String>,
}

impl NewCategory {
  /// Build from a submitted category form.
  pub fn from_form(values: &FormValues) -> Result<Self, FormErrors> {
    validate(CATEGORY_FORM, values).into_result()?;

    let name = cleaned(values, "name").unwrap_or_default().to_owned();
    let slug = slug_from(&name).ok_or_else(|| {
      FormErrors::single("name", "Enter a name containing letters or numbers.")
    })?;

    Ok(Self {
      name,
      slug,
      image: cleaned(values, "image").map(str::to_owned),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::form::REQUIRED;

  #[test]
  fn from_form_derives_slug() {
    let values = FormValues::from([("name".to_owned(), "Rust Tips".to_owned())]);
    let new = NewCategory::from_form(&values).unwrap();
    assert_eq!(new.slug, "rust-tips");
    assert_eq!(new.image, None);
  }

  #[test]
  fn from_form_requires_name() {
    let errors = NewCategory::from_form(&FormValues::new()).unwrap_err();
    assert_eq!(errors.for_field("name").collect::<Vec<_>>(), vec![REQUIRED]);
  }
}
