//! Explicit form schemas and their evaluation.
//!
//! A schema is a static list of [`FieldSpec`]s. Evaluating it against the
//! submitted values yields either nothing or a [`FormErrors`] list with one
//! entry per failed check, in schema order.

use std::{collections::HashMap, fmt};

use serde::Serialize;

use crate::article::ArticleStatus;

pub const REQUIRED: &str = "This field is required.";

/// Submitted form values, keyed by field name.
pub type FormValues = HashMap<String, String>;

/// A field-level check run on non-empty input.
pub type Validator = fn(&str) -> Result<(), String>;

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
  pub name:      &'static str,
  pub required:  bool,
  pub validator: Option<Validator>,
}

impl FieldSpec {
  const fn required(name: &'static str, validator: Option<Validator>) -> Self {
    Self { name, required: true, validator }
  }

  const fn optional(name: &'static str, validator: Option<Validator>) -> Self {
    Self { name, required: false, validator }
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

/// Ordered field-level errors for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
  pub fn new() -> Self { Self::default() }

  pub fn single(field: &str, message: impl Into<String>) -> Self {
    let mut errors = Self::new();
    errors.push(field, message);
    errors
  }

  pub fn push(&mut self, field: &str, message: impl Into<String>) {
    self.0.push(FieldError { field: field.to_owned(), message: message.into() });
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn has_field(&self, field: &str) -> bool {
    self.0.iter().any(|e| e.field == field)
  }

  /// All messages recorded against `field`.
  pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    self.0.iter().filter(move |e| e.field == field).map(|e| e.message.as_str())
  }

  pub fn into_result(self) -> Result<(), FormErrors> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl fmt::Display for FormErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let fields: Vec<&str> = self.0.iter().map(|e| e.field.as_str()).collect();
    write!(f, "{} error(s) on [{}]", self.0.len(), fields.join(", "))
  }
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

/// The trimmed value of `name`, or `None` when absent or blank.
pub fn cleaned<'a>(values: &'a FormValues, name: &str) -> Option<&'a str> {
  values.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Run every spec in `schema` over `values`.
pub fn validate(schema: &[FieldSpec], values: &FormValues) -> FormErrors {
  let mut errors = FormErrors::new();
  for spec in schema {
    match cleaned(values, spec.name) {
      None if spec.required => errors.push(spec.name, REQUIRED),
      None => {}
      Some(value) => {
        if let Some(check) = spec.validator
          && let Err(message) = check(value)
        {
          errors.push(spec.name, message);
        }
      }
    }
  }
  errors
}

// ─── Validators ──────────────────────────────────────────────────────────────

fn max_chars(value: &str, limit: usize) -> Result<(), String> {
  let count = value.chars().count();
  if count > limit {
    Err(format!(
      "Ensure this value has at most {limit} characters (it has {count})."
    ))
  } else {
    Ok(())
  }
}

fn title_length(value: &str) -> Result<(), String> { max_chars(value, 250) }

fn status_choice(value: &str) -> Result<(), String> {
  value
    .parse::<ArticleStatus>()
    .map(|_| ())
    .map_err(|_| {
      format!("Select a valid choice. {value} is not one of the available choices.")
    })
}

fn username_chars(value: &str) -> Result<(), String> {
  max_chars(value, 150)?;
  let valid = value
    .chars()
    .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
  if valid {
    Ok(())
  } else {
    Err(
      "Enter a valid username. This value may contain only letters, numbers, \
       and @/./+/-/_ characters."
        .to_owned(),
    )
  }
}

fn email_shape(value: &str) -> Result<(), String> {
  match value.split_once('@') {
    Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
    _ => Err("Enter a valid email address.".to_owned()),
  }
}

fn password_strength(value: &str) -> Result<(), String> {
  if value.chars().count() < 8 {
    Err(
      "This password is too short. It must contain at least 8 characters."
        .to_owned(),
    )
  } else {
    Ok(())
  }
}

// ─── Schemas ─────────────────────────────────────────────────────────────────

pub const ARTICLE_FORM: &[FieldSpec] = &[
  FieldSpec::required("title", Some(title_length)),
  FieldSpec::required("category", None),
  FieldSpec::required("body", None),
  FieldSpec::optional("image", None),
  FieldSpec::optional("status", Some(status_choice)),
];

pub const CATEGORY_FORM: &[FieldSpec] = &[
  FieldSpec::required("name", Some(title_length)),
  FieldSpec::optional("image", None),
];

pub const REGISTER_FORM: &[FieldSpec] = &[
  FieldSpec::required("username", Some(username_chars)),
  FieldSpec::required("email", Some(email_shape)),
  FieldSpec::optional("first_name", None),
  FieldSpec::optional("last_name", None),
  FieldSpec::required("password1", Some(password_strength)),
  FieldSpec::required("password2", None),
];

pub const LOGIN_FORM: &[FieldSpec] = &[
  FieldSpec::required("username", None),
  FieldSpec::required("password", None),
];

/// Field names of a schema, in order; handed back to callers rendering a form.
pub fn field_names(schema: &[FieldSpec]) -> Vec<&'static str> {
  schema.iter().map(|s| s.name).collect()
}
