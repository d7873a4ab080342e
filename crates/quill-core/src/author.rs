//! Authors, their profiles, credentials and login sessions.
//!
//! Account lifecycle belongs to the identity layer; the core only reads
//! authorship and the public profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::{FormErrors, FormValues, REGISTER_FORM, cleaned, validate};

pub const DEFAULT_PROFILE_IMAGE: &str = "profile_pics/default.jpg";

/// Public 1:1 profile of an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  pub author_id:  Uuid,
  pub username:   String,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub profile:    Profile,
}

impl Author {
  pub fn path(&self) -> String { format!("/author/{}/", self.username) }
}

/// Input to [`crate::store::BlogStore::add_author`]. The password is already
/// hashed; the core never sees plaintext beyond form validation.
#[derive(Debug, Clone)]
pub struct NewAuthor {
  pub username:      String,
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  pub password_hash: String,
  pub profile_image: String,
}

/// Stored login material for one author.
#[derive(Debug, Clone)]
pub struct Credentials {
  pub author_id:     Uuid,
  /// PHC string produced by argon2.
  pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub token:      String,
  pub author_id:  Uuid,
  pub created_at: DateTime<Utc>,
}

// ─── Registration ────────────────────────────────────────────────────────────

/// A validated registration request, password still in plaintext.
#[derive(Debug, Clone)]
pub struct Registration {
  pub username:   String,
  pub email:      String,
  pub first_name: String,
  pub last_name:  String,
  pub password:   String,
}

fn raw<'a>(values: &'a FormValues, name: &str) -> &'a str {
  values.get(name).map(String::as_str).unwrap_or_default()
}

impl Registration {
  pub fn from_form(values: &FormValues) -> Result<Self, FormErrors> {
    let mut errors = validate(REGISTER_FORM, values);

    // Passwords are compared and kept verbatim; only the required check trims.
    let password1 = raw(values, "password1");
    let password2 = raw(values, "password2");
    if cleaned(values, "password1").is_some()
      && cleaned(values, "password2").is_some()
      && password1 != password2
    {
      errors.push("password2", "The two password fields didn't match.");
    }
    errors.into_result()?;

    let field = |name: &str| cleaned(values, name).unwrap_or_default().to_owned();
    Ok(Self {
      username:   field("username"),
      email:      field("email"),
      first_name: field("first_name"),
      last_name:  field("last_name"),
      password:   password1.to_owned(),
    })
  }

  pub fn into_new_author(self, password_hash: String) -> NewAuthor {
    NewAuthor {
      username: self.username,
      first_name: self.first_name,
      last_name: self.last_name,
      email: self.email,
      password_hash,
      profile_image: DEFAULT_PROFILE_IMAGE.to_owned(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(p1: &str, p2: &str) -> FormValues {
    [
      ("username", "ada"),
      ("email", "ada@example.com"),
      ("first_name", "Ada"),
      ("password1", p1),
      ("password2", p2),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
  }

  #[test]
  fn mismatched_passwords_are_rejected() {
    let errors = Registration::from_form(&form("correct-horse", "battery-staple"))
      .unwrap_err();
    assert_eq!(
      errors.for_field("password2").collect::<Vec<_>>(),
      vec!["The two password fields didn't match."]
    );
  }

  #[test]
  fn password_is_kept_verbatim() {
    let reg = Registration::from_form(&form("  correct-horse  ", "  correct-horse  "))
      .unwrap();
    assert_eq!(reg.password, "  correct-horse  ");
  }

  #[test]
  fn passwords_differing_only_in_spaces_do_not_match() {
    let errors = Registration::from_form(&form("correct-horse ", "correct-horse"))
      .unwrap_err();
    assert!(errors.has_field("password2"));
  }

  #[test]
  fn valid_registration_gets_default_profile_image() {
    let reg = Registration::from_form(&form("correct-horse", "correct-horse"))
      .unwrap();
    assert_eq!(reg.last_name, "");
    let new = reg.into_new_author("$argon2id$stub".to_owned());
    assert_eq!(new.username, "ada");
    assert_eq!(new.profile_image, DEFAULT_PROFILE_IMAGE);
  }
}
