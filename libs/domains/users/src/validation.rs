//! Field validation for user payloads.
//!
//! Rules are declared on the payload types with `validator` attributes pointing at the rule
//! functions below; this module runs them and flattens the result into [`ValidationErrors`],
//! keyed by wire field name.
//!
//! Lengths are counted in UTF-8 bytes, so `"é"` satisfies a minimum of 2.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::models::{CreateUserParams, UpdateUserParams};

/// What rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Fewer than `min` bytes
    TooShort { min: u64 },
    InvalidFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    fn from_validator(err: &validator::ValidationError) -> Self {
        let kind = match err.code.as_ref() {
            "too_short" => ViolationKind::TooShort {
                min: err
                    .params
                    .get("min")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or_default(),
            },
            _ => ViolationKind::InvalidFormat,
        };
        // `err.params["value"]` is the rejected input and must not be copied
        let message = err
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string());

        Self { kind, message }
    }
}

/// Field name to violation. Empty means the input is valid.
///
/// Serializes as a flat `{ "<field>": "<message>" }` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, Violation>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&Violation> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Violated field names in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, violation: Violation) {
        self.0.insert(field.into(), violation);
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, violation)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field, violation.message)?;
        }
        Ok(())
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, violation) in &self.0 {
            map.serialize_entry(field, &violation.message)?;
        }
        map.end()
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = ValidationErrors::default();
        for (field, errs) in errors.field_errors() {
            if let Some(err) = errs.first() {
                out.insert(wire_name(field.as_ref()), Violation::from_validator(err));
            }
        }
        out
    }
}

/// `first_name` -> `firstName`
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 7;

fn min_len(value: &str, min: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.len() >= min {
        return Ok(());
    }
    let mut err = ValidationError::new("too_short").with_message(Cow::Borrowed(message));
    err.add_param(Cow::Borrowed("min"), &min);
    Err(err)
}

pub(crate) fn first_name_length(value: &str) -> Result<(), ValidationError> {
    min_len(
        value,
        MIN_NAME_LEN,
        "first name length should be at least 2 characters",
    )
}

pub(crate) fn last_name_length(value: &str) -> Result<(), ValidationError> {
    min_len(
        value,
        MIN_NAME_LEN,
        "last name length should be at least 2 characters",
    )
}

pub(crate) fn password_length(value: &str) -> Result<(), ValidationError> {
    min_len(
        value,
        MIN_PASSWORD_LEN,
        "password length should be at least 7 characters",
    )
}

/// A dot-atom local part: no leading, trailing or doubled dots.
fn is_dot_atom(local: &str) -> bool {
    !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
}

pub(crate) fn email_format(value: &str) -> Result<(), ValidationError> {
    let well_formed = value.validate_email()
        && value
            .rsplit_once('@')
            .is_some_and(|(local, _)| is_dot_atom(local));
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_format")
            .with_message(Cow::Borrowed("email address is not a valid mail address")))
    }
}

fn collect(result: Result<(), validator::ValidationErrors>) -> ValidationErrors {
    match result {
        Ok(()) => ValidationErrors::default(),
        Err(errors) => errors.into(),
    }
}

/// Check every creation rule in one pass.
pub fn validate_create(params: &CreateUserParams) -> ValidationErrors {
    collect(params.validate())
}

/// Check the update rules. There is no password rule here.
pub fn validate_update(params: &UpdateUserParams) -> ValidationErrors {
    collect(params.validate())
}
